//! Narrative text shown back to the respondent on the results view.
//! Display-only; nothing here is persisted.

use super::scoring::FlagLevel;

/// Band for a 6-30 engagement domain sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementLevel {
    Developing,
    SolidFoundation,
    Strong,
}

impl EngagementLevel {
    pub const fn label(self) -> &'static str {
        match self {
            EngagementLevel::Developing => "Developing",
            EngagementLevel::SolidFoundation => "Solid Foundation",
            EngagementLevel::Strong => "Strong",
        }
    }

    pub fn for_score(score: u32) -> Self {
        if score <= 14 {
            EngagementLevel::Developing
        } else if score <= 22 {
            EngagementLevel::SolidFoundation
        } else {
            EngagementLevel::Strong
        }
    }
}

pub fn engagement_narrative(level: EngagementLevel, domain: &str) -> &'static str {
    match level {
        EngagementLevel::Developing => match domain {
            "Academic Preparedness" => {
                "You may benefit from developing some additional study strategies. Many students find that small adjustments to how they organize their time or approach revision make a significant difference."
            }
            "Classroom Engagement" => {
                "There may be opportunities to develop more active engagement strategies. This is something that often grows with practice and the right environment."
            }
            "Receptivity to Support" => {
                "You may prefer to work independently, which is valid. However, knowing about available resources can be helpful even if you don't use them immediately."
            }
            "Future Orientation" => {
                "Clarifying your goals and how your studies connect to them might help with motivation. This is something worth exploring with an advisor."
            }
            "Belonging & Wellbeing" => {
                "Building connections and feeling at home takes time, especially in a new environment. We'd like to help you find your community here."
            }
            _ => "This is an area where additional support might be beneficial.",
        },
        EngagementLevel::SolidFoundation => match domain {
            "Academic Preparedness" => {
                "You have a solid foundation of study skills. Refining some strategies could help you reach even higher levels of performance."
            }
            "Classroom Engagement" => {
                "You show good engagement with your learning. Continue building on these strengths."
            }
            "Receptivity to Support" => {
                "You're open to support when needed, which is a strength. Don't hesitate to reach out when challenges arise."
            }
            "Future Orientation" => {
                "You have a reasonable sense of direction. Periodically revisiting and refining your goals can keep you motivated."
            }
            "Belonging & Wellbeing" => {
                "You seem to be finding your place. Continue building those connections that matter to you."
            }
            _ => "You have a solid foundation in this area.",
        },
        EngagementLevel::Strong => match domain {
            "Academic Preparedness" => {
                "You have strong study skills and academic self-efficacy. You might be well-suited to help peers or take on leadership roles."
            }
            "Classroom Engagement" => {
                "You're highly engaged in your learning. This active approach will serve you well."
            }
            "Receptivity to Support" => {
                "You're very open to seeking and receiving support. This is a significant strength for long-term success."
            }
            "Future Orientation" => {
                "You have a clear sense of direction and purpose. This will help sustain your motivation through challenges."
            }
            "Belonging & Wellbeing" => {
                "You feel well-connected and grounded. This is a wonderful foundation for your journey here."
            }
            _ => "This is a strong area for you.",
        },
    }
}

pub fn flag_narrative(flag: FlagLevel, domain: &str) -> &'static str {
    match flag {
        FlagLevel::Green => "No particular support indicated in this area.",
        FlagLevel::Yellow => match domain {
            "Language" => {
                "You might benefit from Academic English workshops or writing center visits."
            }
            "Wellbeing" => {
                "Consider exploring stress management resources or wellness programs."
            }
            "Attention" => {
                "Some focus strategies like time-blocking or the Pomodoro technique might help."
            }
            "Reading" => {
                "Reading strategies like active annotation or audio support could be useful."
            }
            "Numerical" => {
                "Math lab drop-in sessions or quantitative tutoring might be helpful."
            }
            _ => "You may benefit from some strategies and resources in this area.",
        },
        FlagLevel::Red => {
            "We recommend a follow-up conversation to discuss support options. Many successful students benefit from these resources."
        }
    }
}

/// Interprets a cognitive sub-score as a fraction of its maximum.
pub fn cognitive_narrative(score: u32, total: u32, domain: &str) -> &'static str {
    let percentage = if total == 0 {
        0.0
    } else {
        score as f64 / total as f64 * 100.0
    };

    if percentage >= 75.0 {
        "This appears to be a strength area for you."
    } else if percentage >= 50.0 {
        "This is in the typical range."
    } else {
        match domain {
            "Abstract Reasoning" => {
                "Practice with pattern recognition puzzles might strengthen this skill."
            }
            "Numerical Reasoning" => {
                "Working through word problems regularly can help develop this area."
            }
            "Critical Thinking" => {
                "Analyzing arguments and questioning assumptions builds this skill over time."
            }
            _ => "This is an area you might enjoy developing further.",
        }
    }
}
