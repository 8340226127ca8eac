use std::sync::Arc;

use clap::Args;
use compass::assessment::interpretation::{
    cognitive_narrative, engagement_narrative, flag_narrative, EngagementLevel,
};
use compass::assessment::sheet::{column_headers, row_values};
use compass::assessment::{
    generate_recommendations, Answer, AssessmentCatalog, Navigator, Progress, Question,
    QuestionKind, ScoreProfile, StudentInfoPatch, SubmissionService, TickOutcome,
};
use compass::error::AppError;

use crate::infra::InMemoryResponseStore;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Answer every timed question instead of letting the countdown lapse
    #[arg(long)]
    pub(crate) complete_cognitive: bool,
    /// Print the encoded sheet row that would be appended downstream
    #[arg(long)]
    pub(crate) show_sheet: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Student Success Compass demo");

    let store = Arc::new(InMemoryResponseStore::open());
    let service = Arc::new(SubmissionService::new(store.clone()));
    let mut navigator = Navigator::new(AssessmentCatalog::standard(), service);

    navigator
        .set_student_info(StudentInfoPatch {
            name: Some("Amina Diallo".to_string()),
            intake_year: Some("f24".to_string()),
            program: Some("bsc-computing".to_string()),
        })
        .expect("identity accepted before the assessment begins");

    match navigator.begin() {
        Ok(()) => {}
        Err(err) => {
            println!("  Could not start: {err}");
            return Ok(());
        }
    }
    let student = navigator.session().student().clone();
    let program_label = compass::assessment::catalog::degree_programs()
        .iter()
        .find(|program| program.code == student.program)
        .map(|program| program.label)
        .unwrap_or(student.program.as_str());
    println!(
        "Respondent: {} ({}, {})",
        student.name, student.intake_year, program_label
    );

    let mut completed: Option<ScoreProfile> = None;
    while completed.is_none() {
        let section = navigator
            .current_section()
            .expect("a section is presented")
            .clone();
        println!("\nSection {}: {}", section.id.label(), section.title);

        navigator.start_section().expect("section starts");
        if section.is_timed {
            println!(
                "  Timed section - {} seconds on the clock",
                navigator.remaining_seconds().unwrap_or(0)
            );
        }

        if section.is_timed && !args.complete_cognitive {
            run_timed_section_with_expiry(&mut navigator);
            continue;
        }

        loop {
            let question = navigator
                .current_question()
                .expect("a question is presented")
                .clone();
            if let Some(answer) = scripted_answer(&question) {
                navigator
                    .answer_current(answer)
                    .expect("scripted answer matches the question");
            }
            match navigator.next() {
                Ok(Progress::NextQuestion) => continue,
                Ok(Progress::SectionIntro) => {
                    println!(
                        "  Answered {} questions",
                        section.questions.len()
                    );
                    break;
                }
                Ok(Progress::Complete(profile)) => {
                    println!("  Answered {} questions", section.questions.len());
                    completed = Some(*profile);
                    break;
                }
                Err(err) => {
                    println!("  Submission failed: {err}");
                    return Ok(());
                }
            }
        }
    }

    let profile = completed.expect("profile available after completion");
    render_profile(&profile);

    let records = store.records();
    println!("\nPersisted submissions: {}", records.len());
    if args.show_sheet {
        if let Some(record) = records.first() {
            println!("Sheet row ({} columns):", column_headers().len());
            for (name, value) in column_headers().iter().zip(row_values(record)) {
                if !value.is_empty() {
                    println!("  {name} = {value}");
                }
            }
        }
    }

    Ok(())
}

/// Answers the first seven timed questions, then lets the countdown run out
/// to show the forced advance.
fn run_timed_section_with_expiry(
    navigator: &mut Navigator<SubmissionService<InMemoryResponseStore>>,
) {
    let generation = navigator.timer_generation();

    for _ in 0..7 {
        let question = navigator
            .current_question()
            .expect("a question is presented")
            .clone();
        if let Some(answer) = scripted_answer(&question) {
            navigator
                .answer_current(answer)
                .expect("scripted answer matches the question");
        }
        navigator.next().expect("advance within the timed section");
    }

    println!("  Answered 7 of 12 before running out of time");
    let mut expired = false;
    while !expired {
        expired = matches!(navigator.tick(generation), TickOutcome::Expired);
    }
    println!("  Countdown reached zero - moving on with partial answers");
}

fn scripted_answer(question: &Question) -> Option<Answer> {
    let scripted = match question.id {
        "A1" => Answer::Rating(3),
        "A2" => Answer::Rating(4),
        "A3" => Answer::Rating(4),
        "A4" => Answer::Rating(3),
        "A5" => Answer::Rating(4),
        "A6" => Answer::Selections(vec!["lecture-exam".to_string(), "mixed".to_string()]),

        "B1" | "B2" | "B3" | "B4" => Answer::Rating(2),
        "B5" | "B6" | "B7" | "B8" | "B10" | "B12" | "B14" => Answer::Rating(1),
        "B9" | "B11" | "B13" | "B15" => Answer::Rating(0),

        "C3" | "C6" => Answer::Rating(2),
        "C1" | "C2" | "C4" | "C5" | "C9" | "C16" => Answer::Rating(3),
        id if id.starts_with('C') => Answer::Rating(4),

        "D1" => Answer::Choice("B".to_string()),
        "D2" => Answer::Choice("B".to_string()),
        "D3" => Answer::Choice("A".to_string()),
        "D4" => Answer::Choice("A".to_string()),
        "D5" => Answer::Choice("C".to_string()),
        "D6" => Answer::Choice("A".to_string()),
        "D7" => Answer::Choice("B".to_string()),
        "D8" => Answer::Choice("B".to_string()),
        "D9" => Answer::Choice("A".to_string()),
        "D10" => Answer::Choice("B".to_string()),
        "D11" => Answer::Choice("B".to_string()),
        "D12" => Answer::Choice("A".to_string()),

        "E1" => Answer::Selections(vec![
            "persistence".to_string(),
            "collaboration".to_string(),
        ]),
        "E2" => Answer::Selections(vec![
            "time-management".to_string(),
            "stress-management".to_string(),
        ]),
        "E3" => Answer::Choice("one-on-one".to_string()),
        "E4" => Answer::Choice("email".to_string()),
        // E5 is optional; the scripted respondent skips it.
        "E5" => return None,
        "E6" => Answer::Text(
            "Finish the year with solid grades and a study group I trust.".to_string(),
        ),
        _ => match question.kind {
            QuestionKind::Cognitive | QuestionKind::Pattern => Answer::Choice("A".to_string()),
            _ => Answer::Rating(3),
        },
    };
    Some(scripted)
}

fn render_profile(profile: &ScoreProfile) {
    println!("\nLearning profile flags");
    for (domain, flag) in [
        ("Language", profile.language_flag),
        ("Wellbeing", profile.wellbeing_flag),
        ("Attention", profile.attention_flag),
        ("Reading", profile.reading_flag),
        ("Numerical", profile.numerical_processing_flag),
    ] {
        println!(
            "- {domain}: {} | {}",
            flag.label(),
            flag_narrative(flag, domain)
        );
    }
    println!(
        "  Wellbeing baseline {:.2} | attention {} | reading {} | numerical {}",
        profile.wellbeing_baseline,
        profile.attention_score,
        profile.reading_score,
        profile.numerical_processing_score
    );

    println!("\nEngagement domains (6-30 each)");
    for (domain, score) in [
        ("Academic Preparedness", profile.academic_preparedness),
        ("Classroom Engagement", profile.classroom_engagement),
        ("Receptivity to Support", profile.receptivity_to_support),
        ("Future Orientation", profile.future_orientation),
        ("Belonging & Wellbeing", profile.belonging_wellbeing),
    ] {
        let level = EngagementLevel::for_score(score);
        println!(
            "- {domain}: {score} ({})\n    {}",
            level.label(),
            engagement_narrative(level, domain)
        );
    }
    println!(
        "  Total engagement {} | grit indicator {}",
        profile.total_engagement, profile.grit_indicator
    );

    println!("\nThinking patterns (timed)");
    for (domain, score) in [
        ("Abstract Reasoning", profile.abstract_reasoning),
        ("Numerical Reasoning", profile.numerical_reasoning),
        ("Critical Thinking", profile.critical_thinking),
    ] {
        println!(
            "- {domain}: {score}/4 | {}",
            cognitive_narrative(score, 4, domain)
        );
    }
    println!("  Total cognitive {}/12", profile.total_cognitive);

    let recommendations = generate_recommendations(profile);
    if recommendations.is_empty() {
        println!("\nRecommended follow-ups: none");
    } else {
        println!("\nRecommended follow-ups");
        for entry in &recommendations {
            println!(
                "- [{}] {}: {} ({})",
                entry.priority.label(),
                entry.domain,
                entry.action,
                entry.resource
            );
        }
    }
}
