use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{AssessmentCatalog, OptionValue, QuestionKind, SectionId};

/// Most characters accepted for a free-text answer.
pub const MAX_TEXT_LENGTH: usize = 500;

/// Most values accepted for a multi-select answer.
pub const MAX_SELECTIONS: usize = 3;

/// Identity captured before the assessment begins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub name: String,
    #[serde(rename = "intakeYear")]
    pub intake_year: String,
    pub program: String,
}

impl StudentInfo {
    /// Checks the three required fields; the intake year must match
    /// `[FO]` followed by two digits and is compared case-insensitively.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.intake_year.trim().is_empty() {
            return Err(ValidationError::MissingIntakeYear);
        }
        if !is_valid_intake_year(&self.intake_year) {
            return Err(ValidationError::InvalidIntakeYear(self.intake_year.clone()));
        }
        if self.program.trim().is_empty() {
            return Err(ValidationError::MissingProgram);
        }
        Ok(())
    }
}

fn is_valid_intake_year(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !matches!(first.to_ascii_uppercase(), 'F' | 'O') {
        return false;
    }
    let rest: Vec<char> = chars.collect();
    rest.len() == 2 && rest.iter().all(|c| c.is_ascii_digit())
}

/// Partial update merged into [`StudentInfo`]. The intake year is normalized
/// to uppercase on merge.
#[derive(Debug, Clone, Default)]
pub struct StudentInfoPatch {
    pub name: Option<String>,
    pub intake_year: Option<String>,
    pub program: Option<String>,
}

/// Student info or submission payload problems reported before navigation
/// proceeds. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("student name is required")]
    MissingName,
    #[error("intake year is required")]
    MissingIntakeYear,
    #[error("intake year '{0}' must be F or O followed by two digits (e.g. F24)")]
    InvalidIntakeYear(String),
    #[error("degree program is required")]
    MissingProgram,
}

/// A recorded answer. The variant must match the question kind; `Rating`
/// covers every numeric scale/select item, `Choice` the string-coded ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Rating(u8),
    Choice(String),
    Selections(Vec<String>),
    Text(String),
}

impl Answer {
    /// Whether this value counts as "answered" for navigation purposes:
    /// non-empty strings, non-empty lists, and any recorded scalar
    /// (a rating of 0 is a valid frequency answer).
    pub fn is_substantive(&self) -> bool {
        match self {
            Answer::Rating(_) => true,
            Answer::Choice(value) => !value.trim().is_empty(),
            Answer::Selections(values) => !values.is_empty(),
            Answer::Text(value) => !value.trim().is_empty(),
        }
    }
}

/// A rejected answer update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("question '{id}' does not accept this kind of answer")]
    KindMismatch { id: String },
    #[error("value {value} is not an option for question '{id}'")]
    ValueNotOffered { id: String, value: u8 },
    #[error("'{value}' is not an option for question '{id}'")]
    OptionNotOffered { id: String, value: String },
    #[error("question '{id}' accepts at most {max} selections")]
    TooManySelections { id: String, max: usize },
    #[error("free-text answer for '{id}' exceeds {max} characters")]
    TextTooLong { id: String, max: usize },
}

/// Holds the respondent's identity and the five partial response maps.
/// Updates merge; nothing is deleted individually, only fully reset.
#[derive(Debug, Default)]
pub struct SessionStore {
    student: StudentInfo,
    section_a: BTreeMap<&'static str, Answer>,
    section_b: BTreeMap<&'static str, Answer>,
    section_c: BTreeMap<&'static str, Answer>,
    section_d: BTreeMap<&'static str, Answer>,
    section_e: BTreeMap<&'static str, Answer>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn student(&self) -> &StudentInfo {
        &self.student
    }

    pub fn set_student_info(&mut self, patch: StudentInfoPatch) {
        if let Some(name) = patch.name {
            self.student.name = name;
        }
        if let Some(intake_year) = patch.intake_year {
            self.student.intake_year = intake_year.to_ascii_uppercase();
        }
        if let Some(program) = patch.program {
            self.student.program = program;
        }
    }

    /// Validates the answer against the catalog and merges it into the map
    /// of the section the catalog resolved for this id.
    pub fn record_answer(
        &mut self,
        catalog: &AssessmentCatalog,
        question_id: &str,
        answer: Answer,
    ) -> Result<(), ResponseError> {
        let location = catalog
            .locate(question_id)
            .ok_or_else(|| ResponseError::UnknownQuestion(question_id.to_string()))?;
        let question = catalog
            .question(question_id)
            .ok_or_else(|| ResponseError::UnknownQuestion(question_id.to_string()))?;

        match (question.kind, &answer) {
            (QuestionKind::Scale | QuestionKind::Select, Answer::Rating(value))
                if question.numeric_values().next().is_some() =>
            {
                if !question.numeric_values().any(|offered| offered == *value) {
                    return Err(ResponseError::ValueNotOffered {
                        id: question.id.to_string(),
                        value: *value,
                    });
                }
            }
            (
                QuestionKind::Select | QuestionKind::Cognitive | QuestionKind::Pattern,
                Answer::Choice(value),
            ) if question.code_values().next().is_some() => {
                if !question.code_values().any(|offered| offered == value) {
                    return Err(ResponseError::OptionNotOffered {
                        id: question.id.to_string(),
                        value: value.clone(),
                    });
                }
            }
            (QuestionKind::MultiSelect, Answer::Selections(values)) => {
                if values.len() > MAX_SELECTIONS {
                    return Err(ResponseError::TooManySelections {
                        id: question.id.to_string(),
                        max: MAX_SELECTIONS,
                    });
                }
                for value in values {
                    if !question.code_values().any(|offered| offered == value) {
                        return Err(ResponseError::OptionNotOffered {
                            id: question.id.to_string(),
                            value: value.clone(),
                        });
                    }
                }
            }
            (QuestionKind::Text, Answer::Text(value)) => {
                if value.chars().count() > MAX_TEXT_LENGTH {
                    return Err(ResponseError::TextTooLong {
                        id: question.id.to_string(),
                        max: MAX_TEXT_LENGTH,
                    });
                }
            }
            _ => {
                return Err(ResponseError::KindMismatch {
                    id: question.id.to_string(),
                });
            }
        }

        self.section_map_mut(location.section_id)
            .insert(question.id, answer);
        Ok(())
    }

    pub fn answer(&self, catalog: &AssessmentCatalog, question_id: &str) -> Option<&Answer> {
        let location = catalog.locate(question_id)?;
        self.section_map(location.section_id).get(question_id)
    }

    pub fn answered_in_section(&self, section_id: SectionId) -> usize {
        self.section_map(section_id).len()
    }

    /// Clears everything back to initial values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn section_map(&self, section_id: SectionId) -> &BTreeMap<&'static str, Answer> {
        match section_id {
            SectionId::A => &self.section_a,
            SectionId::B => &self.section_b,
            SectionId::C => &self.section_c,
            SectionId::D => &self.section_d,
            SectionId::E => &self.section_e,
        }
    }

    fn section_map_mut(&mut self, section_id: SectionId) -> &mut BTreeMap<&'static str, Answer> {
        match section_id {
            SectionId::A => &mut self.section_a,
            SectionId::B => &mut self.section_b,
            SectionId::C => &mut self.section_c,
            SectionId::D => &mut self.section_d,
            SectionId::E => &mut self.section_e,
        }
    }

    /// Produces the fully-defaulted response snapshot: every unanswered
    /// field takes its section-specific neutral default so scores can be
    /// computed even from a partially completed session.
    pub fn snapshot(&self) -> AllResponses {
        AllResponses {
            student_info: self.student.clone(),
            section_a: SectionAResponses {
                a1: rating(&self.section_a, "A1", 1),
                a2: rating(&self.section_a, "A2", 3),
                a3: rating(&self.section_a, "A3", 3),
                a4: rating(&self.section_a, "A4", 3),
                a5: rating(&self.section_a, "A5", 3),
                a6: selections(&self.section_a, "A6"),
            },
            section_b: SectionBResponses {
                b1: rating(&self.section_b, "B1", 0),
                b2: rating(&self.section_b, "B2", 0),
                b3: rating(&self.section_b, "B3", 0),
                b4: rating(&self.section_b, "B4", 0),
                b5: rating(&self.section_b, "B5", 0),
                b6: rating(&self.section_b, "B6", 0),
                b7: rating(&self.section_b, "B7", 0),
                b8: rating(&self.section_b, "B8", 0),
                b9: rating(&self.section_b, "B9", 0),
                b10: rating(&self.section_b, "B10", 0),
                b11: rating(&self.section_b, "B11", 0),
                b12: rating(&self.section_b, "B12", 0),
                b13: rating(&self.section_b, "B13", 0),
                b14: rating(&self.section_b, "B14", 0),
                b15: rating(&self.section_b, "B15", 0),
            },
            section_c: SectionCResponses {
                c1: rating(&self.section_c, "C1", 3),
                c2: rating(&self.section_c, "C2", 3),
                c3: rating(&self.section_c, "C3", 3),
                c4: rating(&self.section_c, "C4", 3),
                c5: rating(&self.section_c, "C5", 3),
                c6: rating(&self.section_c, "C6", 3),
                c7: rating(&self.section_c, "C7", 3),
                c8: rating(&self.section_c, "C8", 3),
                c9: rating(&self.section_c, "C9", 3),
                c10: rating(&self.section_c, "C10", 3),
                c11: rating(&self.section_c, "C11", 3),
                c12: rating(&self.section_c, "C12", 3),
                c13: rating(&self.section_c, "C13", 3),
                c14: rating(&self.section_c, "C14", 3),
                c15: rating(&self.section_c, "C15", 3),
                c16: rating(&self.section_c, "C16", 3),
                c17: rating(&self.section_c, "C17", 3),
                c18: rating(&self.section_c, "C18", 3),
                c19: rating(&self.section_c, "C19", 3),
                c20: rating(&self.section_c, "C20", 3),
                c21: rating(&self.section_c, "C21", 3),
                c22: rating(&self.section_c, "C22", 3),
                c23: rating(&self.section_c, "C23", 3),
                c24: rating(&self.section_c, "C24", 3),
                c25: rating(&self.section_c, "C25", 3),
                c26: rating(&self.section_c, "C26", 3),
                c27: rating(&self.section_c, "C27", 3),
                c28: rating(&self.section_c, "C28", 3),
                c29: rating(&self.section_c, "C29", 3),
                c30: rating(&self.section_c, "C30", 3),
            },
            section_d: SectionDResponses {
                d1: choice(&self.section_d, "D1"),
                d2: choice(&self.section_d, "D2"),
                d3: choice(&self.section_d, "D3"),
                d4: choice(&self.section_d, "D4"),
                d5: choice(&self.section_d, "D5"),
                d6: choice(&self.section_d, "D6"),
                d7: choice(&self.section_d, "D7"),
                d8: choice(&self.section_d, "D8"),
                d9: choice(&self.section_d, "D9"),
                d10: choice(&self.section_d, "D10"),
                d11: choice(&self.section_d, "D11"),
                d12: choice(&self.section_d, "D12"),
            },
            section_e: SectionEResponses {
                e1: selections(&self.section_e, "E1"),
                e2: selections(&self.section_e, "E2"),
                e3: choice(&self.section_e, "E3"),
                e4: choice(&self.section_e, "E4"),
                e5: text(&self.section_e, "E5"),
                e6: text(&self.section_e, "E6"),
            },
        }
    }
}

fn rating(map: &BTreeMap<&'static str, Answer>, id: &str, default: u8) -> u8 {
    match map.get(id) {
        Some(Answer::Rating(value)) => *value,
        _ => default,
    }
}

fn choice(map: &BTreeMap<&'static str, Answer>, id: &str) -> String {
    match map.get(id) {
        Some(Answer::Choice(value)) => value.clone(),
        _ => String::new(),
    }
}

fn selections(map: &BTreeMap<&'static str, Answer>, id: &str) -> Vec<String> {
    match map.get(id) {
        Some(Answer::Selections(values)) => values.clone(),
        _ => Vec::new(),
    }
}

fn text(map: &BTreeMap<&'static str, Answer>, id: &str) -> String {
    match map.get(id) {
        Some(Answer::Text(value)) => value.clone(),
        _ => String::new(),
    }
}

/// Section A snapshot. Field names follow the downstream wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAResponses {
    #[serde(rename = "A1")]
    pub a1: u8,
    #[serde(rename = "A2")]
    pub a2: u8,
    #[serde(rename = "A3")]
    pub a3: u8,
    #[serde(rename = "A4")]
    pub a4: u8,
    #[serde(rename = "A5")]
    pub a5: u8,
    #[serde(rename = "A6")]
    pub a6: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBResponses {
    #[serde(rename = "B1")]
    pub b1: u8,
    #[serde(rename = "B2")]
    pub b2: u8,
    #[serde(rename = "B3")]
    pub b3: u8,
    #[serde(rename = "B4")]
    pub b4: u8,
    #[serde(rename = "B5")]
    pub b5: u8,
    #[serde(rename = "B6")]
    pub b6: u8,
    #[serde(rename = "B7")]
    pub b7: u8,
    #[serde(rename = "B8")]
    pub b8: u8,
    #[serde(rename = "B9")]
    pub b9: u8,
    #[serde(rename = "B10")]
    pub b10: u8,
    #[serde(rename = "B11")]
    pub b11: u8,
    #[serde(rename = "B12")]
    pub b12: u8,
    #[serde(rename = "B13")]
    pub b13: u8,
    #[serde(rename = "B14")]
    pub b14: u8,
    #[serde(rename = "B15")]
    pub b15: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCResponses {
    #[serde(rename = "C1")]
    pub c1: u8,
    #[serde(rename = "C2")]
    pub c2: u8,
    #[serde(rename = "C3")]
    pub c3: u8,
    #[serde(rename = "C4")]
    pub c4: u8,
    #[serde(rename = "C5")]
    pub c5: u8,
    #[serde(rename = "C6")]
    pub c6: u8,
    #[serde(rename = "C7")]
    pub c7: u8,
    #[serde(rename = "C8")]
    pub c8: u8,
    #[serde(rename = "C9")]
    pub c9: u8,
    #[serde(rename = "C10")]
    pub c10: u8,
    #[serde(rename = "C11")]
    pub c11: u8,
    #[serde(rename = "C12")]
    pub c12: u8,
    #[serde(rename = "C13")]
    pub c13: u8,
    #[serde(rename = "C14")]
    pub c14: u8,
    #[serde(rename = "C15")]
    pub c15: u8,
    #[serde(rename = "C16")]
    pub c16: u8,
    #[serde(rename = "C17")]
    pub c17: u8,
    #[serde(rename = "C18")]
    pub c18: u8,
    #[serde(rename = "C19")]
    pub c19: u8,
    #[serde(rename = "C20")]
    pub c20: u8,
    #[serde(rename = "C21")]
    pub c21: u8,
    #[serde(rename = "C22")]
    pub c22: u8,
    #[serde(rename = "C23")]
    pub c23: u8,
    #[serde(rename = "C24")]
    pub c24: u8,
    #[serde(rename = "C25")]
    pub c25: u8,
    #[serde(rename = "C26")]
    pub c26: u8,
    #[serde(rename = "C27")]
    pub c27: u8,
    #[serde(rename = "C28")]
    pub c28: u8,
    #[serde(rename = "C29")]
    pub c29: u8,
    #[serde(rename = "C30")]
    pub c30: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDResponses {
    #[serde(rename = "D1")]
    pub d1: String,
    #[serde(rename = "D2")]
    pub d2: String,
    #[serde(rename = "D3")]
    pub d3: String,
    #[serde(rename = "D4")]
    pub d4: String,
    #[serde(rename = "D5")]
    pub d5: String,
    #[serde(rename = "D6")]
    pub d6: String,
    #[serde(rename = "D7")]
    pub d7: String,
    #[serde(rename = "D8")]
    pub d8: String,
    #[serde(rename = "D9")]
    pub d9: String,
    #[serde(rename = "D10")]
    pub d10: String,
    #[serde(rename = "D11")]
    pub d11: String,
    #[serde(rename = "D12")]
    pub d12: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEResponses {
    #[serde(rename = "E1")]
    pub e1: Vec<String>,
    #[serde(rename = "E2")]
    pub e2: Vec<String>,
    #[serde(rename = "E3")]
    pub e3: String,
    #[serde(rename = "E4")]
    pub e4: String,
    #[serde(rename = "E5")]
    pub e5: String,
    #[serde(rename = "E6")]
    pub e6: String,
}

/// The complete, fully-defaulted response snapshot handed to scoring and
/// persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllResponses {
    #[serde(rename = "studentInfo")]
    pub student_info: StudentInfo,
    #[serde(rename = "sectionA")]
    pub section_a: SectionAResponses,
    #[serde(rename = "sectionB")]
    pub section_b: SectionBResponses,
    #[serde(rename = "sectionC")]
    pub section_c: SectionCResponses,
    #[serde(rename = "sectionD")]
    pub section_d: SectionDResponses,
    #[serde(rename = "sectionE")]
    pub section_e: SectionEResponses,
}
