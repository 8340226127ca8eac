use serde::{Deserialize, Serialize};

use super::scoring::{FlagLevel, ScoreProfile};

const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

/// One prioritized support action with a matched campus resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub domain: String,
    pub action: String,
    pub resource: String,
}

fn recommendation(
    priority: Priority,
    domain: &str,
    action: &str,
    resource: &str,
) -> Recommendation {
    Recommendation {
        priority,
        domain: domain.to_string(),
        action: action.to_string(),
        resource: resource.to_string(),
    }
}

/// Evaluates every rule independently (several may fire), stable-sorts the
/// hits by priority so rule order is preserved within a tier, and truncates
/// to the first five.
pub fn generate_recommendations(profile: &ScoreProfile) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    match profile.language_flag {
        FlagLevel::Red => recommendations.push(recommendation(
            Priority::High,
            "Language Support",
            "Connect with Academic English resources",
            "Writing Center, Language Labs",
        )),
        FlagLevel::Yellow => recommendations.push(recommendation(
            Priority::Medium,
            "Language Support",
            "Consider Academic English workshops",
            "Writing Center",
        )),
        FlagLevel::Green => {}
    }

    match profile.wellbeing_flag {
        FlagLevel::Red => recommendations.push(recommendation(
            Priority::High,
            "Wellbeing",
            "Schedule wellness check-in",
            "Counseling Services, Student Life",
        )),
        FlagLevel::Yellow => recommendations.push(recommendation(
            Priority::Medium,
            "Wellbeing",
            "Share stress management resources",
            "Wellness Programs",
        )),
        FlagLevel::Green => {}
    }

    match profile.attention_flag {
        FlagLevel::Red => recommendations.push(recommendation(
            Priority::High,
            "Focus & Attention",
            "Discuss attention support strategies; consider assessment referral",
            "Learning Support, Disability Services",
        )),
        FlagLevel::Yellow => recommendations.push(recommendation(
            Priority::Medium,
            "Focus & Attention",
            "Share focus strategies and resources",
            "Study Skills Workshop",
        )),
        FlagLevel::Green => {}
    }

    match profile.reading_flag {
        FlagLevel::Red => recommendations.push(recommendation(
            Priority::High,
            "Reading Support",
            "Discuss reading support options; consider assessment referral",
            "Learning Support, Disability Services",
        )),
        FlagLevel::Yellow => recommendations.push(recommendation(
            Priority::Medium,
            "Reading Support",
            "Share reading strategies",
            "Academic Skills Center",
        )),
        FlagLevel::Green => {}
    }

    match profile.numerical_processing_flag {
        FlagLevel::Red => recommendations.push(recommendation(
            Priority::High,
            "Quantitative Support",
            "Connect with math support resources",
            "Math Lab, Tutoring Services",
        )),
        FlagLevel::Yellow => recommendations.push(recommendation(
            Priority::Medium,
            "Quantitative Support",
            "Share quantitative strategies",
            "Math Lab",
        )),
        FlagLevel::Green => {}
    }

    if profile.academic_preparedness <= 14 {
        recommendations.push(recommendation(
            Priority::High,
            "Study Skills",
            "Prioritize study skills programming",
            "Academic Skills Workshop Series",
        ));
    } else if profile.academic_preparedness <= 18 {
        recommendations.push(recommendation(
            Priority::Medium,
            "Study Skills",
            "Invite to study skills workshop",
            "Academic Skills Center",
        ));
    }

    if profile.belonging_wellbeing <= 14 {
        recommendations.push(recommendation(
            Priority::High,
            "Community Connection",
            "Proactive outreach for community building",
            "Student Life, Peer Mentorship",
        ));
    }

    if profile.future_orientation <= 14 {
        recommendations.push(recommendation(
            Priority::Medium,
            "Career Development",
            "Connect with career counseling",
            "Career Services, Advising",
        ));
    }

    recommendations.sort_by_key(|entry| entry.priority);
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
