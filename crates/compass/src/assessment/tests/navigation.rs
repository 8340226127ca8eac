use std::sync::Arc;

use super::common::{
    build_navigator, complete_section, plausible_answer, respondent_patch, MemoryStore,
};
use crate::assessment::catalog::{AssessmentCatalog, Question, QuestionKind, Section, SectionId};
use crate::assessment::navigator::{Navigator, NavigatorError, Phase, Progress, TickOutcome};
use crate::assessment::service::SubmissionService;
use crate::assessment::session::Answer;

fn begun_navigator(store: Arc<MemoryStore>) -> Navigator<SubmissionService<MemoryStore>> {
    let mut navigator = build_navigator(store);
    navigator
        .set_student_info(respondent_patch())
        .expect("info accepted");
    navigator.begin().expect("gate open");
    navigator
}

#[test]
fn begin_requires_valid_student_info() {
    let mut navigator = build_navigator(Arc::new(MemoryStore::open()));
    assert!(matches!(
        navigator.begin(),
        Err(NavigatorError::Validation(_))
    ));
    assert_eq!(navigator.phase(), Phase::Ready);
}

#[test]
fn begin_refuses_when_gate_is_closed() {
    let mut navigator = build_navigator(Arc::new(MemoryStore::closed()));
    navigator
        .set_student_info(respondent_patch())
        .expect("info accepted");
    assert!(matches!(navigator.begin(), Err(NavigatorError::GateClosed)));
    assert_eq!(navigator.phase(), Phase::Ready);
}

#[test]
fn student_info_locks_once_the_assessment_begins() {
    let mut navigator = begun_navigator(Arc::new(MemoryStore::open()));
    assert!(matches!(
        navigator.set_student_info(respondent_patch()),
        Err(NavigatorError::InfoLocked)
    ));
}

#[test]
fn untimed_sections_never_start_a_countdown() {
    let mut navigator = begun_navigator(Arc::new(MemoryStore::open()));
    navigator.start_section().expect("section A starts");
    assert_eq!(navigator.remaining_seconds(), None);
}

#[test]
fn next_requires_an_answer_for_required_questions() {
    let mut navigator = begun_navigator(Arc::new(MemoryStore::open()));
    navigator.start_section().expect("section A starts");
    assert!(matches!(
        navigator.next(),
        Err(NavigatorError::AnswerRequired)
    ));

    navigator
        .answer_current(Answer::Rating(2))
        .expect("A1 answered");
    assert!(matches!(navigator.next(), Ok(Progress::NextQuestion)));
}

#[test]
fn completing_a_section_shows_the_next_introduction() {
    let mut navigator = begun_navigator(Arc::new(MemoryStore::open()));
    let progress =
        complete_section(&mut navigator, plausible_answer).expect("section A completes");
    assert_eq!(progress, Progress::SectionIntro);
    assert_eq!(navigator.phase(), Phase::Intro);
    assert_eq!(navigator.section_index(), 1);
}

#[test]
fn previous_steps_back_and_suppresses_the_intro() {
    let mut navigator = begun_navigator(Arc::new(MemoryStore::open()));
    navigator.start_section().expect("section A starts");

    assert!(matches!(
        navigator.previous(),
        Err(NavigatorError::BackUnavailable)
    ));

    navigator
        .answer_current(Answer::Rating(2))
        .expect("A1 answered");
    navigator.next().expect("advance to A2");
    navigator.previous().expect("back to A1");
    assert_eq!(navigator.question_index(), 0);

    // Cross the section boundary, then step back into section A's last
    // question without an intro in between.
    complete_section(&mut navigator, plausible_answer).expect("section A completes");
    navigator.start_section().expect("section B starts");
    navigator.previous().expect("back into section A");
    assert_eq!(navigator.phase(), Phase::Questioning);
    assert_eq!(navigator.section_index(), 0);
    assert_eq!(navigator.question_index(), 5);
}

#[test]
fn timed_section_starts_countdown_and_blocks_back_navigation() {
    let mut navigator = begun_navigator(Arc::new(MemoryStore::open()));
    for _ in 0..3 {
        complete_section(&mut navigator, plausible_answer).expect("section completes");
    }
    assert_eq!(navigator.section_index(), 3);

    navigator.start_section().expect("section D starts");
    assert_eq!(navigator.remaining_seconds(), Some(300));

    navigator
        .answer_current(Answer::Choice("B".to_string()))
        .expect("D1 answered");
    navigator.next().expect("advance to D2");
    assert!(matches!(
        navigator.previous(),
        Err(NavigatorError::BackDisabledInTimedSection)
    ));
}

#[test]
fn timer_expiry_forces_the_next_section_intro() {
    let mut navigator = begun_navigator(Arc::new(MemoryStore::open()));
    for _ in 0..3 {
        complete_section(&mut navigator, plausible_answer).expect("section completes");
    }
    navigator.start_section().expect("section D starts");
    let generation = navigator.timer_generation();

    // Partial progress; most questions stay unanswered.
    navigator
        .answer_current(Answer::Choice("B".to_string()))
        .expect("D1 answered");
    navigator.next().expect("advance to D2");

    let mut last = TickOutcome::Ignored;
    for _ in 0..300 {
        last = navigator.tick(generation);
    }
    assert_eq!(last, TickOutcome::Expired);
    assert_eq!(navigator.phase(), Phase::Intro);
    assert_eq!(navigator.section_index(), 4);
    assert_eq!(navigator.remaining_seconds(), None);

    // The expired countdown can never fire again.
    assert_eq!(navigator.tick(generation), TickOutcome::Ignored);
}

#[test]
fn stale_generation_ticks_are_ignored() {
    let mut navigator = begun_navigator(Arc::new(MemoryStore::open()));
    for _ in 0..3 {
        complete_section(&mut navigator, plausible_answer).expect("section completes");
    }
    navigator.start_section().expect("section D starts");
    let generation = navigator.timer_generation();

    assert_eq!(navigator.tick(generation + 1), TickOutcome::Ignored);
    assert_eq!(navigator.remaining_seconds(), Some(300));
    assert_eq!(navigator.tick(generation), TickOutcome::Remaining(299));
}

#[test]
fn leaving_the_timed_section_by_answering_cancels_the_timer() {
    let mut navigator = begun_navigator(Arc::new(MemoryStore::open()));
    for _ in 0..3 {
        complete_section(&mut navigator, plausible_answer).expect("section completes");
    }
    let generation_before = navigator.timer_generation();
    let progress = complete_section(&mut navigator, |question| {
        plausible_answer(question)
    })
    .expect("section D completes");

    assert_eq!(progress, Progress::SectionIntro);
    assert_eq!(navigator.remaining_seconds(), None);
    assert!(navigator.timer_generation() > generation_before);
    assert_eq!(navigator.tick(generation_before), TickOutcome::Ignored);
}

#[test]
fn optional_text_questions_may_be_skipped() {
    let mut navigator = begun_navigator(Arc::new(MemoryStore::open()));
    for _ in 0..4 {
        complete_section(&mut navigator, plausible_answer).expect("section completes");
    }
    assert_eq!(navigator.section_index(), 4);
    navigator.start_section().expect("section E starts");

    // E1-E4 are required.
    assert!(matches!(
        navigator.next(),
        Err(NavigatorError::AnswerRequired)
    ));
    for _ in 0..4 {
        let question = navigator
            .current_question()
            .expect("question present")
            .clone();
        navigator
            .answer_current(plausible_answer(&question))
            .expect("answer accepted");
        navigator.next().expect("advance");
    }

    // E5 and E6 are free text and optional; skipping is next() unanswered.
    assert_eq!(
        navigator.current_question().map(|question| question.id),
        Some("E5")
    );
    assert!(!navigator.has_answer());
    navigator.next().expect("skip E5");
    let result = navigator.next().expect("skip E6 and submit");
    assert!(matches!(result, Progress::Complete(_)));
    assert_eq!(navigator.phase(), Phase::Complete);
}

#[test]
fn full_run_submits_once_with_scores_attached() {
    let store = Arc::new(MemoryStore::open());
    let mut navigator = begun_navigator(store.clone());

    let mut last = Progress::NextQuestion;
    for _ in 0..5 {
        last = complete_section(&mut navigator, plausible_answer).expect("section completes");
    }

    let Progress::Complete(profile) = last else {
        panic!("expected completion, got {last:?}");
    };
    assert_eq!(navigator.phase(), Phase::Complete);
    assert_eq!(
        navigator.score_profile().map(|p| p.total_engagement),
        Some(profile.total_engagement)
    );

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].responses.student_info.intake_year, "F24");
    assert_eq!(records[0].scores, *profile);
}

#[test]
fn failed_submission_keeps_state_and_allows_retry() {
    let store = Arc::new(MemoryStore::open());
    store.set_failing(true);
    let mut navigator = begun_navigator(store.clone());

    let mut result = Ok(Progress::NextQuestion);
    for _ in 0..5 {
        result = complete_section(&mut navigator, plausible_answer);
        if result.is_err() {
            break;
        }
    }
    assert!(matches!(
        result,
        Err(NavigatorError::Submission(_))
    ));
    assert_eq!(navigator.phase(), Phase::Submitting);
    assert!(navigator.submit_error().is_some());
    assert!(store.records().is_empty());

    // Identical retry once the store recovers.
    store.set_failing(false);
    let progress = navigator.submit().expect("retry succeeds");
    assert!(matches!(progress, Progress::Complete(_)));
    assert_eq!(navigator.phase(), Phase::Complete);
    assert!(navigator.submit_error().is_none());
    assert_eq!(store.records().len(), 1);
}

#[test]
fn reset_returns_to_identity_capture() {
    let mut navigator = begun_navigator(Arc::new(MemoryStore::open()));
    complete_section(&mut navigator, plausible_answer).expect("section A completes");

    navigator.reset();
    assert_eq!(navigator.phase(), Phase::Ready);
    assert_eq!(navigator.section_index(), 0);
    assert_eq!(navigator.session().student().name, "");
    navigator
        .set_student_info(respondent_patch())
        .expect("info reopens after reset");
}

#[test]
fn timer_expiry_on_a_final_timed_section_is_a_no_op() {
    // A reduced catalog whose timed section is last.
    let sections = vec![
        Section {
            id: SectionId::A,
            title: "Warmup",
            description: "One quick question.",
            time_estimate: "1 minute",
            instructions: None,
            is_timed: false,
            time_limit_seconds: None,
            questions: vec![Question {
                id: "A2",
                prompt: "Right now, I feel about starting/continuing my studies:",
                kind: QuestionKind::Scale,
                options: (1..=5)
                    .map(|value| crate::assessment::catalog::AnswerOption {
                        value: crate::assessment::catalog::OptionValue::Number(value),
                        label: "",
                    })
                    .collect(),
                scale_labels: None,
                correct_answer: None,
            }],
        },
        Section {
            id: SectionId::D,
            title: "Reasoning",
            description: "Timed finale.",
            time_estimate: "1 minute",
            instructions: None,
            is_timed: true,
            time_limit_seconds: Some(2),
            questions: vec![Question {
                id: "D1",
                prompt: "What number comes next in this sequence?",
                kind: QuestionKind::Cognitive,
                options: ["A", "B", "C", "D"]
                    .into_iter()
                    .map(|code| crate::assessment::catalog::AnswerOption {
                        value: crate::assessment::catalog::OptionValue::Code(code),
                        label: code,
                    })
                    .collect(),
                scale_labels: None,
                correct_answer: Some("B"),
            }],
        },
    ];

    let store = Arc::new(MemoryStore::open());
    let service = Arc::new(SubmissionService::new(store.clone()));
    let mut navigator = Navigator::new(AssessmentCatalog::from_sections(sections), service);
    navigator
        .set_student_info(respondent_patch())
        .expect("info accepted");
    navigator.begin().expect("gate open");

    navigator.start_section().expect("warmup starts");
    navigator
        .answer_current(Answer::Rating(3))
        .expect("answer accepted");
    navigator.next().expect("reach timed intro");
    navigator.start_section().expect("timed section starts");
    let generation = navigator.timer_generation();

    navigator.tick(generation);
    assert_eq!(navigator.tick(generation), TickOutcome::Expired);

    // No auto-submit: still questioning the final section, nothing stored.
    assert_eq!(navigator.phase(), Phase::Questioning);
    assert_eq!(navigator.section_index(), 1);
    assert!(store.records().is_empty());
    assert_eq!(navigator.tick(generation), TickOutcome::Ignored);
}
