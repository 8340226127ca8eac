use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::assessment::catalog::{AssessmentCatalog, OptionValue, Question, QuestionKind};
use crate::assessment::gateway::{
    PortalStatus, ResponseStore, StoreError, SubmissionGateway, SubmissionRecord,
};
use crate::assessment::navigator::{Navigator, NavigatorError, Progress};
use crate::assessment::service::SubmissionService;
use crate::assessment::session::{Answer, SessionStore, StudentInfoPatch};

/// In-memory stand-in for the spreadsheet store. Starts open unless stated
/// otherwise; `fail_appends` simulates a remote outage.
#[derive(Default)]
pub(super) struct MemoryStore {
    status: Mutex<Option<PortalStatus>>,
    records: Mutex<Vec<SubmissionRecord>>,
    fail_appends: AtomicBool,
}

impl MemoryStore {
    pub(super) fn open() -> Self {
        let store = Self::default();
        store
            .set_status(PortalStatus::Open)
            .expect("status settable");
        store
    }

    pub(super) fn closed() -> Self {
        let store = Self::default();
        store
            .set_status(PortalStatus::Closed)
            .expect("status settable");
        store
    }

    pub(super) fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().expect("records lock").clone()
    }

    pub(super) fn set_failing(&self, failing: bool) {
        self.fail_appends.store(failing, Ordering::Relaxed);
    }
}

impl ResponseStore for MemoryStore {
    fn status(&self) -> Result<PortalStatus, StoreError> {
        Ok(self
            .status
            .lock()
            .expect("status lock")
            .unwrap_or(PortalStatus::Closed))
    }

    fn set_status(&self, status: PortalStatus) -> Result<(), StoreError> {
        *self.status.lock().expect("status lock") = Some(status);
        Ok(())
    }

    fn append(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        if self.fail_appends.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("sheet offline".to_string()));
        }
        self.records.lock().expect("records lock").push(record.clone());
        Ok(())
    }
}

pub(super) fn build_navigator(
    store: Arc<MemoryStore>,
) -> Navigator<SubmissionService<MemoryStore>> {
    let service = Arc::new(SubmissionService::new(store));
    Navigator::new(AssessmentCatalog::standard(), service)
}

pub(super) fn respondent_patch() -> StudentInfoPatch {
    StudentInfoPatch {
        name: Some("Amina Diallo".to_string()),
        intake_year: Some("f24".to_string()),
        program: Some("bsc-computing".to_string()),
    }
}

/// A plausible answer for any question: mid-scale ratings, the first code
/// for choices, a single selection, short text.
pub(super) fn plausible_answer(question: &Question) -> Answer {
    match question.kind {
        QuestionKind::Scale => Answer::Rating(3),
        QuestionKind::Select => {
            if let Some(value) = question.numeric_values().nth(2) {
                Answer::Rating(value)
            } else {
                let code = question.code_values().next().expect("option available");
                Answer::Choice(code.to_string())
            }
        }
        QuestionKind::MultiSelect => {
            let code = question.code_values().next().expect("option available");
            Answer::Selections(vec![code.to_string()])
        }
        QuestionKind::Text => Answer::Text("Looking forward to the year.".to_string()),
        QuestionKind::Cognitive | QuestionKind::Pattern => Answer::Choice("A".to_string()),
    }
}

/// Drives the current section from its introduction through its last
/// question, answering each one.
pub(super) fn complete_section<G>(
    navigator: &mut Navigator<G>,
    answer_for: impl Fn(&Question) -> Answer,
) -> Result<Progress, NavigatorError>
where
    G: SubmissionGateway,
{
    navigator.start_section()?;
    loop {
        let question = navigator
            .current_question()
            .expect("a question is presented")
            .clone();
        navigator.answer_current(answer_for(&question))?;
        match navigator.next()? {
            Progress::NextQuestion => continue,
            progress => return Ok(progress),
        }
    }
}

/// A full-session store fixture with every scoring-relevant answer chosen
/// explicitly; see the scoring tests for the expected profile.
pub(super) fn answered_session(catalog: &AssessmentCatalog) -> SessionStore {
    let mut session = SessionStore::new();
    session.set_student_info(respondent_patch());

    session
        .record_answer(catalog, "A1", Answer::Rating(2))
        .expect("A1 recorded");
    for id in ["A2", "A3", "A4", "A5"] {
        session
            .record_answer(catalog, id, Answer::Rating(4))
            .expect("section A recorded");
    }
    session
        .record_answer(
            catalog,
            "A6",
            Answer::Selections(vec!["lecture-exam".to_string()]),
        )
        .expect("A6 recorded");

    for index in 1..=15 {
        let id = format!("B{index}");
        session
            .record_answer(catalog, &id, Answer::Rating(1))
            .expect("section B recorded");
    }

    for index in 1..=30 {
        let id = format!("C{index}");
        session
            .record_answer(catalog, &id, Answer::Rating(4))
            .expect("section C recorded");
    }

    for (id, choice) in [
        ("D1", "B"),
        ("D2", "B"),
        ("D3", "A"),
        ("D4", "A"),
        ("D5", "C"),
        ("D6", "A"),
        ("D7", "B"),
        ("D8", "B"),
        ("D9", "A"),
        ("D10", "A"),
        ("D11", "B"),
        ("D12", "C"),
    ] {
        session
            .record_answer(catalog, id, Answer::Choice(choice.to_string()))
            .expect("section D recorded");
    }

    session
        .record_answer(
            catalog,
            "E1",
            Answer::Selections(vec!["persistence".to_string(), "research".to_string()]),
        )
        .expect("E1 recorded");
    session
        .record_answer(
            catalog,
            "E2",
            Answer::Selections(vec!["time-management".to_string()]),
        )
        .expect("E2 recorded");
    session
        .record_answer(catalog, "E3", Answer::Choice("study-group".to_string()))
        .expect("E3 recorded");
    session
        .record_answer(catalog, "E4", Answer::Choice("email".to_string()))
        .expect("E4 recorded");
    session
        .record_answer(catalog, "E5", Answer::Text(String::new()))
        .expect("E5 recorded");
    session
        .record_answer(
            catalog,
            "E6",
            Answer::Text("Pass every module on the first attempt.".to_string()),
        )
        .expect("E6 recorded");

    session
}

/// Confirms the fixture helpers agree with the catalog they are built on.
#[test]
fn catalog_resolves_every_question_once() {
    let catalog = AssessmentCatalog::standard();
    assert_eq!(catalog.sections().len(), 5);
    assert_eq!(catalog.total_questions(), 6 + 15 + 30 + 12 + 6);

    for section in catalog.sections() {
        for question in &section.questions {
            let location = catalog.locate(question.id).expect("question indexed");
            assert_eq!(location.section_id, section.id);
        }
    }

    let timed: Vec<_> = catalog
        .sections()
        .iter()
        .filter(|section| section.is_timed)
        .collect();
    assert_eq!(timed.len(), 1);
    assert_eq!(timed[0].id.label(), "D");
    assert_eq!(timed[0].time_limit_seconds, Some(300));
}

#[test]
fn catalog_answer_key_matches_scoring_key() {
    let catalog = AssessmentCatalog::standard();
    for section in catalog.sections() {
        for question in &section.questions {
            let expected = crate::assessment::scoring::answer_key(question.id);
            assert_eq!(question.correct_answer, expected, "key for {}", question.id);
        }
    }
}

#[test]
fn catalog_options_expose_machine_values() {
    let catalog = AssessmentCatalog::standard();
    let b1 = catalog.question("B1").expect("B1 exists");
    let values: Vec<u8> = b1.numeric_values().collect();
    assert_eq!(values, vec![0, 1, 2, 3, 4]);

    let d1 = catalog.question("D1").expect("D1 exists");
    let codes: Vec<&str> = d1.code_values().collect();
    assert_eq!(codes, vec!["A", "B", "C", "D"]);
    assert!(matches!(
        d1.options[0].value,
        OptionValue::Code(_)
    ));
}

#[test]
fn degree_program_codes_are_distinct() {
    let programs = crate::assessment::catalog::degree_programs();
    assert_eq!(programs.len(), 4);
    let mut codes: Vec<&str> = programs.iter().map(|program| program.code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), programs.len());
}
