use serde::{Deserialize, Serialize};

use super::session::{AllResponses, SectionDResponses};

/// Coarse risk/support-need indicator derived from a threshold on a raw
/// score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlagLevel {
    Green,
    Yellow,
    Red,
}

impl FlagLevel {
    pub const fn label(self) -> &'static str {
        match self {
            FlagLevel::Green => "GREEN",
            FlagLevel::Yellow => "YELLOW",
            FlagLevel::Red => "RED",
        }
    }
}

/// Answer key for the timed reasoning section, one letter per item.
const SECTION_D_ANSWER_KEY: [(&str, &str); 12] = [
    ("D1", "B"),
    ("D2", "B"),
    ("D3", "A"),
    ("D4", "A"),
    ("D5", "C"),
    ("D6", "A"),
    ("D7", "B"),
    ("D8", "B"),
    ("D9", "B"),
    ("D10", "B"),
    ("D11", "B"),
    ("D12", "C"),
];

pub fn answer_key(question_id: &str) -> Option<&'static str> {
    SECTION_D_ANSWER_KEY
        .iter()
        .find(|(id, _)| *id == question_id)
        .map(|(_, key)| *key)
}

/// Everything derived from one response snapshot. Field names follow the
/// downstream wire format. Recomputation from the same snapshot always
/// produces the same profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreProfile {
    pub language_flag: FlagLevel,
    pub wellbeing_flag: FlagLevel,
    pub attention_flag: FlagLevel,
    pub reading_flag: FlagLevel,
    pub numerical_processing_flag: FlagLevel,

    pub wellbeing_baseline: f64,
    pub attention_score: u32,
    pub reading_score: u32,
    pub numerical_processing_score: u32,

    pub academic_preparedness: u32,
    pub classroom_engagement: u32,
    pub receptivity_to_support: u32,
    pub future_orientation: u32,
    pub belonging_wellbeing: u32,
    pub total_engagement: u32,
    pub grit_indicator: u32,

    pub abstract_reasoning: u32,
    pub numerical_reasoning: u32,
    pub critical_thinking: u32,
    pub total_cognitive: u32,

    pub self_identified_strengths: Vec<String>,
    pub requested_support: Vec<String>,
    pub support_preference: String,
    pub communication_preference: String,
    pub student_notes: String,
    pub success_vision: String,
}

/// Threshold tiers are closed on the upper bound: a score equal to the red
/// threshold is RED, equal to the yellow threshold is YELLOW.
fn flag_for(score: u32, yellow_threshold: u32, red_threshold: u32) -> FlagLevel {
    if score >= red_threshold {
        FlagLevel::Red
    } else if score >= yellow_threshold {
        FlagLevel::Yellow
    } else {
        FlagLevel::Green
    }
}

/// A3 (stress) is reverse-scored because higher stress lowers wellbeing.
/// The result spans 0.2-1.0.
fn wellbeing_baseline(a2: u8, a3: u8, a4: u8) -> f64 {
    let a3_reversed = 6 - i32::from(a3);
    (i32::from(a2) + a3_reversed + i32::from(a4)) as f64 / 15.0
}

fn round_two_places(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn sum(values: &[u8]) -> u32 {
    values.iter().map(|value| u32::from(*value)).sum()
}

fn count_correct(section_d: &SectionDResponses, ids: &[&str]) -> u32 {
    ids.iter()
        .filter(|id| {
            let answer = section_d_value(section_d, id);
            answer_key(id).is_some_and(|key| answer == key)
        })
        .count() as u32
}

fn section_d_value<'a>(section_d: &'a SectionDResponses, id: &str) -> &'a str {
    match id {
        "D1" => &section_d.d1,
        "D2" => &section_d.d2,
        "D3" => &section_d.d3,
        "D4" => &section_d.d4,
        "D5" => &section_d.d5,
        "D6" => &section_d.d6,
        "D7" => &section_d.d7,
        "D8" => &section_d.d8,
        "D9" => &section_d.d9,
        "D10" => &section_d.d10,
        "D11" => &section_d.d11,
        "D12" => &section_d.d12,
        _ => "",
    }
}

/// Deterministic, side-effect-free conversion of a complete snapshot into
/// the score profile.
pub fn calculate_scores(responses: &AllResponses) -> ScoreProfile {
    let a = &responses.section_a;
    let b = &responses.section_b;
    let c = &responses.section_c;
    let d = &responses.section_d;
    let e = &responses.section_e;

    // A1: 1-2 GREEN, 3 YELLOW, 4-5 RED.
    let language_flag = flag_for(u32::from(a.a1), 3, 4);

    let baseline = wellbeing_baseline(a.a2, a.a3, a.a4);
    let wellbeing_flag = if baseline <= 0.4 {
        FlagLevel::Red
    } else if baseline <= 0.6 {
        FlagLevel::Yellow
    } else {
        FlagLevel::Green
    };

    let attention_score = sum(&[b.b1, b.b2, b.b3, b.b4, b.b5, b.b6]);
    let attention_flag = flag_for(attention_score, 9, 14);

    let reading_score = sum(&[b.b7, b.b8, b.b9, b.b10, b.b11]);
    let reading_flag = flag_for(reading_score, 7, 12);

    let numerical_processing_score = sum(&[b.b12, b.b13, b.b14, b.b15]);
    let numerical_processing_flag = flag_for(numerical_processing_score, 6, 10);

    let academic_preparedness = sum(&[c.c1, c.c2, c.c3, c.c4, c.c5, c.c6]);
    let classroom_engagement = sum(&[c.c7, c.c8, c.c9, c.c10, c.c11, c.c12]);
    let receptivity_to_support = sum(&[c.c13, c.c14, c.c15, c.c16, c.c17, c.c18]);
    let future_orientation = sum(&[c.c19, c.c20, c.c21, c.c22, c.c23, c.c24]);
    let belonging_wellbeing = sum(&[c.c25, c.c26, c.c27, c.c28, c.c29, c.c30]);
    let total_engagement = academic_preparedness
        + classroom_engagement
        + receptivity_to_support
        + future_orientation
        + belonging_wellbeing;

    // Cross-domain perseverance proxy; independent of the five domain sums.
    let grit_indicator = sum(&[c.c4, c.c6, c.c11, c.c18, c.c21, c.c23]);

    let abstract_reasoning = count_correct(d, &["D1", "D2", "D3", "D4"]);
    let numerical_reasoning = count_correct(d, &["D5", "D6", "D7", "D8"]);
    let critical_thinking = count_correct(d, &["D9", "D10", "D11", "D12"]);
    let total_cognitive = abstract_reasoning + numerical_reasoning + critical_thinking;

    ScoreProfile {
        language_flag,
        wellbeing_flag,
        attention_flag,
        reading_flag,
        numerical_processing_flag,

        wellbeing_baseline: round_two_places(baseline),
        attention_score,
        reading_score,
        numerical_processing_score,

        academic_preparedness,
        classroom_engagement,
        receptivity_to_support,
        future_orientation,
        belonging_wellbeing,
        total_engagement,
        grit_indicator,

        abstract_reasoning,
        numerical_reasoning,
        critical_thinking,
        total_cognitive,

        self_identified_strengths: e.e1.clone(),
        requested_support: e.e2.clone(),
        support_preference: e.e3.clone(),
        communication_preference: e.e4.clone(),
        student_notes: e.e5.clone(),
        success_vision: e.e6.clone(),
    }
}
