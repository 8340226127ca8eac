//! Flat-row encoding of a submission, plus the CSV-file store that stands in
//! for the remote spreadsheet. One submission becomes one row under a fixed
//! header, with multi-select values joined as delimited text.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::gateway::{PortalStatus, ResponseStore, StoreError, SubmissionRecord};

const RESPONSES_FILE: &str = "responses.csv";
const STATUS_FILE: &str = "status";
const MULTI_VALUE_SEPARATOR: &str = ", ";

/// Fixed column order for the persisted sheet. The header row is written
/// once, before the first data row.
pub fn column_headers() -> Vec<&'static str> {
    vec![
        "Timestamp",
        "Name",
        "Intake Year",
        "Program",
        "A1_LanguageComfort",
        "A2_Excitement",
        "A3_Stress",
        "A4_Energy",
        "A5_PriorPerformance",
        "A6_EducationBackground",
        "B1_Concentration",
        "B2_Organization",
        "B3_TaskAvoidance",
        "B4_Fidgeting",
        "B5_OverlyActive",
        "B6_CarelessMistakes",
        "B7_AuralPreference",
        "B8_LosePlace",
        "B9_SlowReading",
        "B10_SkimmingDifficulty",
        "B11_WordFinding",
        "B12_NumberAnxiety",
        "B13_EstimationDifficulty",
        "B14_SequenceMemory",
        "B15_ChartDifficulty",
        "C1_TimeManagement",
        "C2_FigureItOut",
        "C3_Confidence",
        "C4_FocusDuration",
        "C5_AssessmentPrep",
        "C6_RegularReview",
        "C7_ClassParticipation",
        "C8_AskQuestions",
        "C9_NoteTaking",
        "C10_ConnectInfo",
        "C11_DeepUnderstanding",
        "C12_SeekFeedback",
        "C13_UseTutoring",
        "C14_TalkToAdvisors",
        "C15_HelpIsStrength",
        "C16_AttendWorkshops",
        "C17_RegularCheckins",
        "C18_OpenToChange",
        "C19_ClearGoals",
        "C20_CareerConnection",
        "C21_LongTermThinking",
        "C22_GenuineInterest",
        "C23_SpecificGoals",
        "C24_OpenDoors",
        "C25_Belonging",
        "C26_SupportNetwork",
        "C27_Respected",
        "C28_AuthenticSelf",
        "C29_HandleChallenges",
        "C30_SelfCare",
        "D1_PatternSequence",
        "D2_MatrixPattern",
        "D3_LetterPattern",
        "D4_ProgressiveFill",
        "D5_Percentage",
        "D6_WorkerDays",
        "D7_PercentIncrease",
        "D8_SpeedDistance",
        "D9_WeakenArgument",
        "D10_LogicalFallacy",
        "D11_CriticalQuestion",
        "D12_Correlation",
        "E1_Strengths",
        "E2_SupportAreas",
        "E3_SupportPreference",
        "E4_CommunicationPreference",
        "E5_AdditionalInfo",
        "E6_SuccessVision",
        "Flag_Language",
        "Flag_Wellbeing",
        "Flag_Attention",
        "Flag_Reading",
        "Flag_NumericalProcessing",
        "Score_WellbeingBaseline",
        "Score_Attention",
        "Score_Reading",
        "Score_NumericalProcessing",
        "Score_AcademicPreparedness",
        "Score_ClassroomEngagement",
        "Score_ReceptivityToSupport",
        "Score_FutureOrientation",
        "Score_BelongingWellbeing",
        "Score_TotalEngagement",
        "Score_GritIndicator",
        "Score_AbstractReasoning",
        "Score_NumericalReasoning",
        "Score_CriticalThinking",
        "Score_TotalCognitive",
    ]
}

/// Encodes one submission into the header order above.
pub fn row_values(record: &SubmissionRecord) -> Vec<String> {
    let student = &record.responses.student_info;
    let a = &record.responses.section_a;
    let b = &record.responses.section_b;
    let c = &record.responses.section_c;
    let d = &record.responses.section_d;
    let e = &record.responses.section_e;
    let scores = &record.scores;

    let mut row = vec![
        record.submitted_at.clone(),
        student.name.clone(),
        student.intake_year.clone(),
        student.program.clone(),
        a.a1.to_string(),
        a.a2.to_string(),
        a.a3.to_string(),
        a.a4.to_string(),
        a.a5.to_string(),
        a.a6.join(MULTI_VALUE_SEPARATOR),
    ];

    row.extend(
        [
            b.b1, b.b2, b.b3, b.b4, b.b5, b.b6, b.b7, b.b8, b.b9, b.b10, b.b11, b.b12, b.b13,
            b.b14, b.b15,
        ]
        .iter()
        .map(u8::to_string),
    );

    row.extend(
        [
            c.c1, c.c2, c.c3, c.c4, c.c5, c.c6, c.c7, c.c8, c.c9, c.c10, c.c11, c.c12, c.c13,
            c.c14, c.c15, c.c16, c.c17, c.c18, c.c19, c.c20, c.c21, c.c22, c.c23, c.c24, c.c25,
            c.c26, c.c27, c.c28, c.c29, c.c30,
        ]
        .iter()
        .map(u8::to_string),
    );

    row.extend(
        [
            &d.d1, &d.d2, &d.d3, &d.d4, &d.d5, &d.d6, &d.d7, &d.d8, &d.d9, &d.d10, &d.d11, &d.d12,
        ]
        .iter()
        .map(|value| value.to_string()),
    );

    row.push(e.e1.join(MULTI_VALUE_SEPARATOR));
    row.push(e.e2.join(MULTI_VALUE_SEPARATOR));
    row.push(e.e3.clone());
    row.push(e.e4.clone());
    row.push(e.e5.clone());
    row.push(e.e6.clone());

    row.push(scores.language_flag.label().to_string());
    row.push(scores.wellbeing_flag.label().to_string());
    row.push(scores.attention_flag.label().to_string());
    row.push(scores.reading_flag.label().to_string());
    row.push(scores.numerical_processing_flag.label().to_string());

    row.push(format!("{:.2}", scores.wellbeing_baseline));
    row.push(scores.attention_score.to_string());
    row.push(scores.reading_score.to_string());
    row.push(scores.numerical_processing_score.to_string());

    row.push(scores.academic_preparedness.to_string());
    row.push(scores.classroom_engagement.to_string());
    row.push(scores.receptivity_to_support.to_string());
    row.push(scores.future_orientation.to_string());
    row.push(scores.belonging_wellbeing.to_string());
    row.push(scores.total_engagement.to_string());
    row.push(scores.grit_indicator.to_string());

    row.push(scores.abstract_reasoning.to_string());
    row.push(scores.numerical_reasoning.to_string());
    row.push(scores.critical_thinking.to_string());
    row.push(scores.total_cognitive.to_string());

    row
}

/// File-backed store: one CSV sheet of responses plus a one-word status
/// file. A missing or unreadable status file reads as closed.
pub struct CsvResponseStore {
    data_dir: PathBuf,
    // Serializes header checks against row appends.
    write_lock: Mutex<()>,
}

impl CsvResponseStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn responses_path(&self) -> PathBuf {
        self.data_dir.join(RESPONSES_FILE)
    }

    fn status_path(&self) -> PathBuf {
        self.data_dir.join(STATUS_FILE)
    }

    fn needs_header(path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(metadata) => metadata.len() == 0,
            Err(_) => true,
        }
    }
}

impl ResponseStore for CsvResponseStore {
    fn status(&self) -> Result<PortalStatus, StoreError> {
        match fs::read_to_string(self.status_path()) {
            Ok(contents) => Ok(PortalStatus::parse(&contents).unwrap_or(PortalStatus::Closed)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(PortalStatus::Closed),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn set_status(&self, status: PortalStatus) -> Result<(), StoreError> {
        fs::write(self.status_path(), status.label())?;
        Ok(())
    }

    fn append(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        let path = self.responses_path();
        let needs_header = Self::needs_header(&path);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(column_headers())?;
        }
        writer.write_record(row_values(record))?;
        writer.flush().map_err(StoreError::Io)?;
        Ok(())
    }
}
