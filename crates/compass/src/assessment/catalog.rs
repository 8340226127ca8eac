use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Section identifiers in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionId {
    A,
    B,
    C,
    D,
    E,
}

impl SectionId {
    pub const fn label(self) -> &'static str {
        match self {
            SectionId::A => "A",
            SectionId::B => "B",
            SectionId::C => "C",
            SectionId::D => "D",
            SectionId::E => "E",
        }
    }
}

/// Presentation/answer mode of a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Scale,
    Select,
    MultiSelect,
    Text,
    Cognitive,
    Pattern,
}

/// The machine value carried by an answer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue {
    Number(u8),
    Code(&'static str),
}

/// A selectable value/label pair.
#[derive(Debug, Clone, Copy)]
pub struct AnswerOption {
    pub value: OptionValue,
    pub label: &'static str,
}

/// Endpoint labels shown on a 1-5 scale.
#[derive(Debug, Clone, Copy)]
pub struct ScaleLabels {
    pub low: &'static str,
    pub high: &'static str,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    pub options: Vec<AnswerOption>,
    pub scale_labels: Option<ScaleLabels>,
    /// Letter key for cognitive/pattern questions; None elsewhere.
    pub correct_answer: Option<&'static str>,
}

impl Question {
    pub fn numeric_values(&self) -> impl Iterator<Item = u8> + '_ {
        self.options.iter().filter_map(|option| match option.value {
            OptionValue::Number(value) => Some(value),
            OptionValue::Code(_) => None,
        })
    }

    pub fn code_values(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.options.iter().filter_map(|option| match option.value {
            OptionValue::Number(_) => None,
            OptionValue::Code(code) => Some(code),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Section {
    pub id: SectionId,
    pub title: &'static str,
    pub description: &'static str,
    pub time_estimate: &'static str,
    pub instructions: Option<&'static str>,
    pub is_timed: bool,
    pub time_limit_seconds: Option<u32>,
    pub questions: Vec<Question>,
}

/// Where a question lives inside the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionLocation {
    pub section_id: SectionId,
    pub section_index: usize,
    pub question_index: usize,
}

/// The ordered sections plus an id index resolved once at construction, so
/// per-update routing never inspects id strings.
#[derive(Debug, Clone)]
pub struct AssessmentCatalog {
    sections: Vec<Section>,
    index: HashMap<&'static str, QuestionLocation>,
}

impl AssessmentCatalog {
    pub fn standard() -> Self {
        Self::from_sections(standard_sections())
    }

    pub fn from_sections(sections: Vec<Section>) -> Self {
        let mut index = HashMap::new();
        for (section_index, section) in sections.iter().enumerate() {
            for (question_index, question) in section.questions.iter().enumerate() {
                index.insert(
                    question.id,
                    QuestionLocation {
                        section_id: section.id,
                        section_index,
                        question_index,
                    },
                );
            }
        }
        Self { sections, index }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn locate(&self, question_id: &str) -> Option<QuestionLocation> {
        self.index.get(question_id).copied()
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        let location = self.locate(question_id)?;
        self.sections
            .get(location.section_index)
            .and_then(|section| section.questions.get(location.question_index))
    }

    pub fn total_questions(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.questions.len())
            .sum()
    }
}

/// A degree program offered during intake.
#[derive(Debug, Clone, Copy)]
pub struct DegreeProgram {
    pub code: &'static str,
    pub label: &'static str,
}

pub fn degree_programs() -> Vec<DegreeProgram> {
    vec![
        DegreeProgram {
            code: "bsc-computing",
            label: "Bachelors of Science in Computing",
        },
        DegreeProgram {
            code: "bsc-software-engineering",
            label: "Bachelors of Science in Software Engineering",
        },
        DegreeProgram {
            code: "bsc-entrepreneurial-leadership",
            label: "Bachelors of Science in Entrepreneurial Leadership",
        },
        DegreeProgram {
            code: "bsc-international-business",
            label: "Bachelors of Science in International Business and Trade",
        },
    ]
}

fn numbered_scale() -> Vec<AnswerOption> {
    (1..=5)
        .map(|value| AnswerOption {
            value: OptionValue::Number(value),
            label: match value {
                1 => "1",
                2 => "2",
                3 => "3",
                4 => "4",
                _ => "5",
            },
        })
        .collect()
}

fn frequency_options() -> Vec<AnswerOption> {
    vec![
        AnswerOption {
            value: OptionValue::Number(0),
            label: "Never",
        },
        AnswerOption {
            value: OptionValue::Number(1),
            label: "Rarely",
        },
        AnswerOption {
            value: OptionValue::Number(2),
            label: "Sometimes",
        },
        AnswerOption {
            value: OptionValue::Number(3),
            label: "Often",
        },
        AnswerOption {
            value: OptionValue::Number(4),
            label: "Very Often",
        },
    ]
}

fn agreement_options() -> Vec<AnswerOption> {
    vec![
        AnswerOption {
            value: OptionValue::Number(1),
            label: "Strongly Disagree",
        },
        AnswerOption {
            value: OptionValue::Number(2),
            label: "Disagree",
        },
        AnswerOption {
            value: OptionValue::Number(3),
            label: "Neutral",
        },
        AnswerOption {
            value: OptionValue::Number(4),
            label: "Agree",
        },
        AnswerOption {
            value: OptionValue::Number(5),
            label: "Strongly Agree",
        },
    ]
}

fn letter_options(labels: [&'static str; 4]) -> Vec<AnswerOption> {
    ["A", "B", "C", "D"]
        .into_iter()
        .zip(labels)
        .map(|(code, label)| AnswerOption {
            value: OptionValue::Code(code),
            label,
        })
        .collect()
}

fn code_options(pairs: &[(&'static str, &'static str)]) -> Vec<AnswerOption> {
    pairs
        .iter()
        .map(|(code, label)| AnswerOption {
            value: OptionValue::Code(code),
            label,
        })
        .collect()
}

fn scale_question(
    id: &'static str,
    prompt: &'static str,
    low: &'static str,
    high: &'static str,
) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::Scale,
        options: numbered_scale(),
        scale_labels: Some(ScaleLabels { low, high }),
        correct_answer: None,
    }
}

fn frequency_question(id: &'static str, prompt: &'static str) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::Select,
        options: frequency_options(),
        scale_labels: None,
        correct_answer: None,
    }
}

fn agreement_question(id: &'static str, prompt: &'static str) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::Select,
        options: agreement_options(),
        scale_labels: None,
        correct_answer: None,
    }
}

fn cognitive_question(
    id: &'static str,
    prompt: &'static str,
    labels: [&'static str; 4],
    correct: &'static str,
) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::Cognitive,
        options: letter_options(labels),
        scale_labels: None,
        correct_answer: Some(correct),
    }
}

fn pattern_question(
    id: &'static str,
    prompt: &'static str,
    labels: [&'static str; 4],
    correct: &'static str,
) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::Pattern,
        options: letter_options(labels),
        scale_labels: None,
        correct_answer: Some(correct),
    }
}

fn text_question(id: &'static str, prompt: &'static str) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::Text,
        options: Vec::new(),
        scale_labels: None,
        correct_answer: None,
    }
}

fn multiselect_question(
    id: &'static str,
    prompt: &'static str,
    pairs: &[(&'static str, &'static str)],
) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::MultiSelect,
        options: code_options(pairs),
        scale_labels: None,
        correct_answer: None,
    }
}

fn section_a() -> Section {
    Section {
        id: SectionId::A,
        title: "Foundation",
        description: "Let's start with some context about you and how you're feeling right now.",
        time_estimate: "1-2 minutes",
        instructions: None,
        is_timed: false,
        time_limit_seconds: None,
        questions: vec![
            Question {
                id: "A1",
                prompt: "When reading academic texts in English, I usually...",
                kind: QuestionKind::Select,
                options: vec![
                    AnswerOption {
                        value: OptionValue::Number(1),
                        label: "Read fluently and rarely need to re-read passages",
                    },
                    AnswerOption {
                        value: OptionValue::Number(2),
                        label: "Read comfortably but occasionally need to slow down for complex ideas",
                    },
                    AnswerOption {
                        value: OptionValue::Number(3),
                        label: "Need to re-read sections several times to fully understand",
                    },
                    AnswerOption {
                        value: OptionValue::Number(4),
                        label: "Find it challenging and often need additional time or resources",
                    },
                    AnswerOption {
                        value: OptionValue::Number(5),
                        label: "Prefer to use translation tools alongside English texts",
                    },
                ],
                scale_labels: None,
                correct_answer: None,
            },
            scale_question(
                "A2",
                "Right now, I feel about starting/continuing my studies:",
                "Very anxious",
                "Very excited",
            ),
            scale_question(
                "A3",
                "In the past two weeks, my stress level has been:",
                "Very low",
                "Very high",
            ),
            scale_question(
                "A4",
                "I would describe my current energy level as:",
                "Exhausted",
                "Energized",
            ),
            scale_question(
                "A5",
                "Before this program, I would describe my academic performance as:",
                "Struggled significantly",
                "Excelled consistently",
            ),
            multiselect_question(
                "A6",
                "The education system I came from was: (select all that apply)",
                &[
                    ("lecture-exam", "Primarily lecture-based with exams"),
                    ("discussion-project", "Discussion and project-based"),
                    ("self-directed", "Self-directed / distance learning"),
                    ("vocational", "Vocational / practical training"),
                    ("mixed", "Mixed / varies by subject"),
                    ("other", "Other"),
                ],
            ),
        ],
    }
}

fn section_b() -> Section {
    Section {
        id: SectionId::B,
        title: "Learning Profile",
        description: "These questions help us understand your learning patterns. Answer honestly — there are no right or wrong answers.",
        time_estimate: "2-3 minutes",
        instructions: Some("For each statement, indicate how often this applies to you."),
        is_timed: false,
        time_limit_seconds: None,
        questions: vec![
            frequency_question(
                "B1",
                "I have difficulty concentrating on what people say to me, even when they are speaking directly to me.",
            ),
            frequency_question(
                "B2",
                "I have difficulty organizing tasks and activities (e.g., managing time, keeping materials in order, meeting deadlines).",
            ),
            frequency_question(
                "B3",
                "I avoid or delay starting tasks that require sustained mental effort.",
            ),
            frequency_question(
                "B4",
                "I fidget or feel restless when I have to sit for long periods.",
            ),
            frequency_question(
                "B5",
                "I feel overly active or compelled to do things, as if driven by a motor.",
            ),
            frequency_question(
                "B6",
                "I make careless mistakes when working on something boring or difficult.",
            ),
            frequency_question(
                "B7",
                "I find it easier to understand information when someone explains it aloud than when I read it.",
            ),
            frequency_question(
                "B8",
                "I sometimes lose my place when reading or skip lines without noticing.",
            ),
            frequency_question("B9", "Reading takes me longer than it seems to take others."),
            frequency_question(
                "B10",
                "I find it difficult to skim text quickly to find specific information.",
            ),
            frequency_question(
                "B11",
                "I often know what I want to say but struggle to find the right words or spell them correctly.",
            ),
            frequency_question(
                "B12",
                "I feel anxious when I have to work with numbers, even for everyday tasks.",
            ),
            frequency_question(
                "B13",
                "I find it difficult to estimate quantities (time, money, distances) accurately.",
            ),
            frequency_question(
                "B14",
                "I struggle to remember numerical sequences like phone numbers or PINs.",
            ),
            frequency_question(
                "B15",
                "I find it hard to understand charts, graphs, or tables with numerical data.",
            ),
        ],
    }
}

fn section_c() -> Section {
    Section {
        id: SectionId::C,
        title: "Engagement Orientation",
        description: "Tell us about your approach to learning and engagement. This helps us understand how to best support you.",
        time_estimate: "4-5 minutes",
        instructions: Some("Indicate how much you agree with each statement."),
        is_timed: false,
        time_limit_seconds: None,
        questions: vec![
            agreement_question("C1", "I have effective strategies for managing my study time."),
            agreement_question(
                "C2",
                "When I don't understand something, I know how to figure it out.",
            ),
            agreement_question("C3", "I am confident I can succeed in challenging courses."),
            agreement_question("C4", "I can maintain focus during long study sessions."),
            agreement_question(
                "C5",
                "I know how to prepare effectively for different types of assessments.",
            ),
            agreement_question(
                "C6",
                "I regularly review material even when there's no upcoming test.",
            ),
            agreement_question(
                "C7",
                "I actively participate in class discussions when I have something to contribute.",
            ),
            agreement_question(
                "C8",
                "I ask questions when I don't understand something, even if it feels uncomfortable.",
            ),
            agreement_question(
                "C9",
                "I take notes in a way that helps me learn, not just record information.",
            ),
            agreement_question(
                "C10",
                "I try to connect new information to things I already know.",
            ),
            agreement_question(
                "C11",
                "I prefer to understand concepts deeply rather than just memorize them.",
            ),
            agreement_question(
                "C12",
                "I seek feedback on my work, even when it's not required.",
            ),
            agreement_question(
                "C13",
                "I would use tutoring services if I was struggling in a course.",
            ),
            agreement_question(
                "C14",
                "I am comfortable talking to professors or advisors about challenges.",
            ),
            agreement_question(
                "C15",
                "I believe asking for help is a sign of strength, not weakness.",
            ),
            agreement_question(
                "C16",
                "I would attend a workshop on study skills if it was offered.",
            ),
            agreement_question(
                "C17",
                "I want my advisor to check in with me regularly, not just when there's a problem.",
            ),
            agreement_question(
                "C18",
                "I am open to trying new approaches if my current methods aren't working.",
            ),
            agreement_question(
                "C19",
                "I have a clear idea of what I want to achieve through my education.",
            ),
            agreement_question(
                "C20",
                "I can see how my current courses connect to my future career.",
            ),
            agreement_question(
                "C21",
                "I think about my long-term goals when making decisions about my studies.",
            ),
            agreement_question(
                "C22",
                "I am studying this subject because I am genuinely interested in it, not just for a qualification.",
            ),
            agreement_question(
                "C23",
                "I have specific professional or personal goals I am working toward.",
            ),
            agreement_question(
                "C24",
                "I believe my education will open doors that would otherwise be closed to me.",
            ),
            agreement_question("C25", "I feel like I belong at this institution."),
            agreement_question(
                "C26",
                "I have people here I can turn to when I'm stressed or struggling.",
            ),
            agreement_question(
                "C27",
                "I feel respected and valued by others in my academic community.",
            ),
            agreement_question("C28", "I can be my authentic self in this environment."),
            agreement_question(
                "C29",
                "I believe I can handle the challenges that come with being a student here.",
            ),
            agreement_question(
                "C30",
                "I take care of my physical and mental health even when academics are demanding.",
            ),
        ],
    }
}

fn section_d() -> Section {
    Section {
        id: SectionId::D,
        title: "Thinking Patterns",
        description: "This section assesses different types of reasoning. Work quickly but carefully.",
        time_estimate: "5 minutes",
        instructions: Some(
            "This section is timed. You'll have 5 minutes to complete 12 questions. It's normal not to finish all questions — answer as many as you can. The timer will start when you begin this section.",
        ),
        is_timed: true,
        time_limit_seconds: Some(300),
        questions: vec![
            cognitive_question(
                "D1",
                "What number comes next in this sequence?\n\n2, 6, 18, 54, ___",
                ["108", "162", "148", "216"],
                "B",
            ),
            pattern_question(
                "D2",
                "Look at the pattern. Each row and column follows a rule.\n\nWhich shape completes the grid?",
                ["●", "■", "▲", "◆"],
                "B",
            ),
            cognitive_question(
                "D3",
                "What comes next in this sequence?\n\nAZ, BY, CX, DW, ___",
                ["EV", "EU", "FV", "EX"],
                "A",
            ),
            pattern_question(
                "D4",
                "Look at the pattern in each row. Which option completes the third row?",
                ["△▲▲", "▲▲▲", "△△▲", "▲△△"],
                "A",
            ),
            cognitive_question(
                "D5",
                "A store offers 25% off all items. If a shirt originally costs $80, what is the sale price?",
                ["$20", "$55", "$60", "$65"],
                "C",
            ),
            cognitive_question(
                "D6",
                "If 3 workers can complete a task in 12 days, how many days would it take 4 workers to complete the same task (assuming equal productivity)?",
                ["9 days", "10 days", "16 days", "8 days"],
                "A",
            ),
            cognitive_question(
                "D7",
                "A company's revenue increased from $2.4 million to $3.0 million. What was the percentage increase?",
                ["20%", "25%", "30%", "60%"],
                "B",
            ),
            cognitive_question(
                "D8",
                "A train travels 180 km in 2 hours. If it maintains the same speed, how far will it travel in 3.5 hours?",
                ["270 km", "315 km", "350 km", "360 km"],
                "B",
            ),
            cognitive_question(
                "D9",
                "Read the following argument:\n\n\"Studies show that students who eat breakfast perform better academically. Therefore, schools should provide free breakfast to all students to improve academic outcomes.\"\n\nWhich of the following, if true, would most WEAKEN this argument?",
                [
                    "The studies controlled for socioeconomic factors",
                    "Students who eat breakfast also tend to get more sleep and exercise",
                    "Free breakfast programs have been successful in several districts",
                    "Some students prefer not to eat in the morning",
                ],
                "B",
            ),
            cognitive_question(
                "D10",
                "\"All successful entrepreneurs take risks. Maria takes risks. Therefore, Maria is a successful entrepreneur.\"\n\nThis argument is:",
                [
                    "Valid — the conclusion follows logically from the premises",
                    "Invalid — it assumes all risk-takers are successful entrepreneurs",
                    "Valid — because the premises are true",
                    "Invalid — because Maria might not want to be an entrepreneur",
                ],
                "B",
            ),
            cognitive_question(
                "D11",
                "A university reports: \"Our graduates have a 95% employment rate within 6 months of graduation.\"\n\nWhich question would be MOST important to ask before concluding this is a strong program?",
                [
                    "What is the average salary of graduates?",
                    "How is \"employment\" defined, and how many graduates responded to the survey?",
                    "Does the university offer career services?",
                    "What percentage of students graduate on time?",
                ],
                "B",
            ),
            cognitive_question(
                "D12",
                "Consider this data:\n\n\"In Country X, regions with more doctors per capita have higher rates of a certain disease.\"\n\nWhich interpretation is MOST reasonable?",
                [
                    "Doctors are causing the disease to spread",
                    "The disease is contagious and spreading in urban areas",
                    "Regions with higher disease rates may attract more doctors",
                    "This proves that medical care is ineffective for this disease",
                ],
                "C",
            ),
        ],
    }
}

fn section_e() -> Section {
    Section {
        id: SectionId::E,
        title: "Reflection & Priorities",
        description: "Finally, tell us about your strengths and what kind of support would be most helpful for you.",
        time_estimate: "1-2 minutes",
        instructions: None,
        is_timed: false,
        time_limit_seconds: None,
        questions: vec![
            multiselect_question(
                "E1",
                "Which of these do you consider your GREATEST STRENGTHS as a student? (Select up to 3)",
                &[
                    ("time-management", "Time management and organization"),
                    ("complex-concepts", "Understanding complex concepts"),
                    ("written-communication", "Written communication"),
                    ("numbers-data", "Working with numbers and data"),
                    ("creative-thinking", "Creative and original thinking"),
                    ("persistence", "Persistence through challenges"),
                    ("collaboration", "Working with others"),
                    ("presenting", "Presenting and speaking"),
                    ("research", "Research and finding information"),
                    ("asking-questions", "Asking good questions"),
                ],
            ),
            multiselect_question(
                "E2",
                "Which areas would you most like SUPPORT developing? (Select up to 3)",
                &[
                    ("time-management", "Time management and organization"),
                    ("complex-concepts", "Understanding complex concepts"),
                    ("written-communication", "Written communication"),
                    ("numbers-data", "Working with numbers and data"),
                    ("creative-thinking", "Creative and original thinking"),
                    ("stress-management", "Managing stress and pressure"),
                    ("building-connections", "Building connections with others"),
                    ("presenting", "Presenting and speaking"),
                    ("research", "Research and finding information"),
                    ("confidence", "Feeling confident in my abilities"),
                ],
            ),
            Question {
                id: "E3",
                prompt: "When you need academic support, you prefer to:",
                kind: QuestionKind::Select,
                options: code_options(&[
                    ("one-on-one", "Get help one-on-one from a tutor or advisor"),
                    ("study-group", "Work through problems in a small study group"),
                    (
                        "online-self",
                        "Use online resources and figure things out independently",
                    ),
                    ("workshops", "Attend workshops or structured support sessions"),
                    (
                        "unsure",
                        "I'm not sure — I'd like guidance on what might work best for me",
                    ),
                ]),
                scale_labels: None,
                correct_answer: None,
            },
            Question {
                id: "E4",
                prompt: "If your success team wanted to check in with you, you would prefer:",
                kind: QuestionKind::Select,
                options: code_options(&[
                    ("email", "Email"),
                    ("text", "Text / WhatsApp message"),
                    ("phone", "Phone call"),
                    ("drop-in", "In-person drop-in"),
                    ("appointment", "Scheduled appointment"),
                    (
                        "self-initiate",
                        "I prefer to reach out myself when I need support",
                    ),
                ]),
                scale_labels: None,
                correct_answer: None,
            },
            text_question(
                "E5",
                "Is there anything about your background, circumstances, or learning that you want your success team to know? (Optional)",
            ),
            text_question(
                "E6",
                "What does success look like for you by the end of this academic year?",
            ),
        ],
    }
}

fn standard_sections() -> Vec<Section> {
    vec![section_a(), section_b(), section_c(), section_d(), section_e()]
}
