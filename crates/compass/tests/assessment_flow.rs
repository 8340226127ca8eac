//! End-to-end run of the assessment against the CSV-backed store: gate
//! check, full navigation including the timed section, scoring, and the
//! persisted sheet shape.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use compass::assessment::sheet::{column_headers, row_values, CsvResponseStore};
use compass::assessment::{
    calculate_scores, Answer, AssessmentCatalog, Navigator, PortalStatus, Progress, Question,
    QuestionKind, ResponseStore, StudentInfoPatch, SubmissionRecord, SubmissionService,
};

static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

fn scratch_dir(label: &str) -> PathBuf {
    let unique = DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "compass-{label}-{}-{unique}",
        process::id()
    ))
}

fn answer_for(question: &Question) -> Answer {
    match question.kind {
        QuestionKind::Scale => Answer::Rating(4),
        QuestionKind::Select => {
            if let Some(value) = question.numeric_values().nth(1) {
                Answer::Rating(value)
            } else {
                let code = question
                    .code_values()
                    .next()
                    .expect("select option available");
                Answer::Choice(code.to_string())
            }
        }
        QuestionKind::MultiSelect => {
            let code = question
                .code_values()
                .next()
                .expect("multiselect option available");
            Answer::Selections(vec![code.to_string()])
        }
        QuestionKind::Text => Answer::Text("Settle in and find a study rhythm.".to_string()),
        QuestionKind::Cognitive | QuestionKind::Pattern => {
            Answer::Choice(question.correct_answer.unwrap_or("A").to_string())
        }
    }
}

fn run_full_assessment(store: Arc<CsvResponseStore>) {
    let service = Arc::new(SubmissionService::new(store));
    let mut navigator = Navigator::new(AssessmentCatalog::standard(), service);

    navigator
        .set_student_info(StudentInfoPatch {
            name: Some("Jonas Weber".to_string()),
            intake_year: Some("o25".to_string()),
            program: Some("bsc-software-engineering".to_string()),
        })
        .expect("info accepted");
    navigator.begin().expect("gate open");

    let mut completed = false;
    while !completed {
        navigator.start_section().expect("section starts");
        loop {
            let question = navigator
                .current_question()
                .expect("question presented")
                .clone();
            navigator
                .answer_current(answer_for(&question))
                .expect("answer accepted");
            match navigator.next().expect("advance") {
                Progress::NextQuestion => continue,
                Progress::SectionIntro => break,
                Progress::Complete(profile) => {
                    assert_eq!(profile.total_cognitive, 12);
                    completed = true;
                    break;
                }
            }
        }
    }
}

#[test]
fn csv_store_defaults_to_closed_and_blocks_the_session() {
    let dir = scratch_dir("closed");
    let store = Arc::new(CsvResponseStore::new(&dir).expect("store created"));
    assert_eq!(store.status().expect("status"), PortalStatus::Closed);

    let service = Arc::new(SubmissionService::new(store));
    let mut navigator = Navigator::new(AssessmentCatalog::standard(), service);
    navigator
        .set_student_info(StudentInfoPatch {
            name: Some("Jonas Weber".to_string()),
            intake_year: Some("O25".to_string()),
            program: Some("bsc-software-engineering".to_string()),
        })
        .expect("info accepted");
    assert!(navigator.begin().is_err());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn full_run_appends_one_row_under_a_single_header() {
    let dir = scratch_dir("flow");
    let store = Arc::new(CsvResponseStore::new(&dir).expect("store created"));
    store
        .set_status(PortalStatus::Open)
        .expect("portal opened");

    run_full_assessment(store.clone());
    run_full_assessment(store.clone());

    let contents = fs::read_to_string(store.responses_path()).expect("sheet readable");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3, "one header plus two data rows");

    let header_hits = lines
        .iter()
        .filter(|line| line.starts_with("Timestamp,"))
        .count();
    assert_eq!(header_hits, 1, "header is written exactly once");

    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let headers = reader.headers().expect("header row").clone();
    assert_eq!(headers.len(), column_headers().len());

    for record in reader.records() {
        let record = record.expect("data row parses");
        assert_eq!(record.len(), headers.len());
        assert_eq!(&record[2], "O25");
        assert_eq!(&record[headers.len() - 1], "12");
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn row_encoding_matches_the_header_order() {
    let catalog = AssessmentCatalog::standard();
    let service_session = {
        let mut session = compass::assessment::SessionStore::new();
        session.set_student_info(StudentInfoPatch {
            name: Some("Amina Diallo".to_string()),
            intake_year: Some("F24".to_string()),
            program: Some("bsc-computing".to_string()),
        });
        session
            .record_answer(
                &catalog,
                "A6",
                Answer::Selections(vec![
                    "lecture-exam".to_string(),
                    "vocational".to_string(),
                ]),
            )
            .expect("A6 recorded");
        session
            .record_answer(&catalog, "D1", Answer::Choice("B".to_string()))
            .expect("D1 recorded");
        session
    };

    let responses = service_session.snapshot();
    let scores = calculate_scores(&responses);
    let record = SubmissionRecord {
        submitted_at: "2026-08-07T09:00:00+00:00".to_string(),
        responses,
        scores,
    };

    let headers = column_headers();
    let row = row_values(&record);
    assert_eq!(row.len(), headers.len());

    assert_eq!(row[0], "2026-08-07T09:00:00+00:00");
    assert_eq!(row[1], "Amina Diallo");
    assert_eq!(row[2], "F24");
    assert_eq!(row[3], "bsc-computing");

    let a6_index = headers
        .iter()
        .position(|name| *name == "A6_EducationBackground")
        .expect("A6 column present");
    assert_eq!(row[a6_index], "lecture-exam, vocational");

    let abstract_index = headers
        .iter()
        .position(|name| *name == "Score_AbstractReasoning")
        .expect("abstract column present");
    assert_eq!(row[abstract_index], "1");

    let baseline_index = headers
        .iter()
        .position(|name| *name == "Score_WellbeingBaseline")
        .expect("baseline column present");
    assert_eq!(row[baseline_index], "0.60");
}
