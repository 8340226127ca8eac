use std::sync::Arc;

use super::catalog::{AssessmentCatalog, Question, QuestionKind, Section, SectionId};
use super::gateway::{SubmissionError, SubmissionGateway};
use super::scoring::{calculate_scores, ScoreProfile};
use super::session::{Answer, ResponseError, SessionStore, StudentInfoPatch, ValidationError};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Identity capture; the gate has not been consulted yet.
    Ready,
    /// Showing a section introduction.
    Intro,
    /// Presenting a question.
    Questioning,
    /// Terminal submit; retained until the gateway accepts or the caller
    /// retries.
    Submitting,
    /// Persisted; the profile is available.
    Complete,
}

/// Result of a successful `next()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Moved to another question within the section.
    NextQuestion,
    /// Left the section; the following section's introduction is showing.
    SectionIntro,
    /// The run was persisted; the session is complete.
    Complete(Box<ScoreProfile>),
}

/// Outcome of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick carried a stale generation or no timer is active.
    Ignored,
    /// Seconds remaining after the tick.
    Remaining(u32),
    /// The countdown hit zero and the section was left (or, on a final
    /// timed section, nothing further happened).
    Expired,
}

#[derive(Debug, thiserror::Error)]
pub enum NavigatorError {
    #[error("the assessment is not currently accepting responses")]
    GateClosed,
    #[error("student information can only change before the assessment begins")]
    InfoLocked,
    #[error("an answer is required before continuing")]
    AnswerRequired,
    #[error("back navigation is not available here")]
    BackUnavailable,
    #[error("back navigation is disabled during the timed section")]
    BackDisabledInTimedSection,
    #[error("invalid transition: {0}")]
    InvalidTransition(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

#[derive(Debug, Clone, Copy)]
struct SectionTimer {
    remaining: u32,
    generation: u64,
}

/// Drives one respondent through the sections and owns all session state.
/// Transitions happen strictly in response to discrete calls; the countdown
/// is a cooperative tick guarded by a generation counter so a cancelled
/// timer can never fire late.
pub struct Navigator<G> {
    catalog: AssessmentCatalog,
    session: SessionStore,
    gateway: Arc<G>,
    phase: Phase,
    section_index: usize,
    question_index: usize,
    timer: Option<SectionTimer>,
    timer_generation: u64,
    submit_error: Option<String>,
    profile: Option<ScoreProfile>,
}

impl<G> Navigator<G>
where
    G: SubmissionGateway,
{
    pub fn new(catalog: AssessmentCatalog, gateway: Arc<G>) -> Self {
        Self {
            catalog,
            session: SessionStore::new(),
            gateway,
            phase: Phase::Ready,
            section_index: 0,
            question_index: 0,
            timer: None,
            timer_generation: 0,
            submit_error: None,
            profile: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn catalog(&self) -> &AssessmentCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn section_index(&self) -> usize {
        self.section_index
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn current_section(&self) -> Option<&Section> {
        self.catalog.section(self.section_index)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_section()
            .and_then(|section| section.questions.get(self.question_index))
    }

    /// Seconds left on the active countdown, if one is running.
    pub fn remaining_seconds(&self) -> Option<u32> {
        self.timer.map(|timer| timer.remaining)
    }

    /// Generation the external tick source must echo back. Bumped whenever
    /// a timer starts or is cancelled, so late ticks from a previous
    /// countdown are ignored.
    pub fn timer_generation(&self) -> u64 {
        self.timer_generation
    }

    pub fn score_profile(&self) -> Option<&ScoreProfile> {
        self.profile.as_ref()
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Merges identity fields. Locked once the assessment begins; only a
    /// full reset reopens it.
    pub fn set_student_info(&mut self, patch: StudentInfoPatch) -> Result<(), NavigatorError> {
        if self.phase != Phase::Ready {
            return Err(NavigatorError::InfoLocked);
        }
        self.session.set_student_info(patch);
        Ok(())
    }

    /// Validates identity, consults the gate once, and enters the first
    /// section introduction. A closed gate leaves the navigator in `Ready`.
    pub fn begin(&mut self) -> Result<(), NavigatorError> {
        if self.phase != Phase::Ready {
            return Err(NavigatorError::InvalidTransition(
                "the assessment is already in progress",
            ));
        }
        self.session.student().validate()?;
        if !self.gateway.is_open()? {
            return Err(NavigatorError::GateClosed);
        }
        self.section_index = 0;
        self.question_index = 0;
        self.phase = Phase::Intro;
        Ok(())
    }

    /// Leaves the introduction and presents the section's first question,
    /// starting the countdown iff the section is timed.
    pub fn start_section(&mut self) -> Result<(), NavigatorError> {
        if self.phase != Phase::Intro {
            return Err(NavigatorError::InvalidTransition(
                "no section introduction is showing",
            ));
        }
        let section = self
            .current_section()
            .ok_or(NavigatorError::InvalidTransition("no such section"))?;
        if section.is_timed {
            let limit = section.time_limit_seconds.unwrap_or(0);
            self.timer_generation += 1;
            self.timer = Some(SectionTimer {
                remaining: limit,
                generation: self.timer_generation,
            });
        }
        self.question_index = 0;
        self.phase = Phase::Questioning;
        Ok(())
    }

    /// Records an answer for the currently presented question.
    pub fn answer_current(&mut self, answer: Answer) -> Result<(), NavigatorError> {
        if self.phase != Phase::Questioning {
            return Err(NavigatorError::InvalidTransition(
                "no question is being presented",
            ));
        }
        let question_id = self
            .current_question()
            .ok_or(NavigatorError::InvalidTransition("no such question"))?
            .id;
        self.session
            .record_answer(&self.catalog, question_id, answer)?;
        Ok(())
    }

    /// Whether the current question counts as answered: a non-empty string,
    /// a non-empty selection list, or any recorded scalar (0 included).
    pub fn has_answer(&self) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        self.session
            .answer(&self.catalog, question.id)
            .is_some_and(Answer::is_substantive)
    }

    fn current_question_is_optional(&self) -> bool {
        self.current_section()
            .zip(self.current_question())
            .is_some_and(|(section, question)| {
                section.id == SectionId::E && question.kind == QuestionKind::Text
            })
    }

    fn cancel_timer(&mut self) {
        if self.timer.take().is_some() {
            self.timer_generation += 1;
        }
    }

    fn is_last_section(&self) -> bool {
        self.section_index + 1 >= self.catalog.sections().len()
    }

    fn leave_section_forward(&mut self) {
        self.cancel_timer();
        self.section_index += 1;
        self.question_index = 0;
        self.phase = Phase::Intro;
    }

    /// Advances within the section, or to the next section's introduction,
    /// or from the final question into the terminal submit.
    pub fn next(&mut self) -> Result<Progress, NavigatorError> {
        match self.phase {
            Phase::Questioning => {}
            Phase::Submitting => return self.try_submit(),
            _ => {
                return Err(NavigatorError::InvalidTransition(
                    "no question is being presented",
                ))
            }
        }

        if !self.has_answer() && !self.current_question_is_optional() {
            return Err(NavigatorError::AnswerRequired);
        }

        let section_len = self
            .current_section()
            .map(|section| section.questions.len())
            .unwrap_or(0);

        if self.question_index + 1 < section_len {
            self.question_index += 1;
            return Ok(Progress::NextQuestion);
        }

        if !self.is_last_section() {
            self.leave_section_forward();
            return Ok(Progress::SectionIntro);
        }

        self.cancel_timer();
        self.phase = Phase::Submitting;
        self.try_submit()
    }

    /// Steps back within the section, or to the previous section's last
    /// question with the introduction suppressed. Disallowed entirely while
    /// the active section is timed.
    pub fn previous(&mut self) -> Result<(), NavigatorError> {
        if self.phase != Phase::Questioning {
            return Err(NavigatorError::BackUnavailable);
        }
        if self.current_section().is_some_and(|section| section.is_timed) {
            return Err(NavigatorError::BackDisabledInTimedSection);
        }
        if self.question_index > 0 {
            self.question_index -= 1;
            return Ok(());
        }
        if self.section_index > 0 {
            self.section_index -= 1;
            self.question_index = self
                .current_section()
                .map(|section| section.questions.len().saturating_sub(1))
                .unwrap_or(0);
            return Ok(());
        }
        Err(NavigatorError::BackUnavailable)
    }

    /// One second of countdown. Ticks carrying a stale generation are
    /// ignored. Reaching zero performs the same leave-section transition as
    /// a manual advance, without requiring answers; on a final timed
    /// section expiry does nothing further (no auto-submit).
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        let Some(timer) = self.timer.as_mut() else {
            return TickOutcome::Ignored;
        };
        if timer.generation != generation || self.phase != Phase::Questioning {
            return TickOutcome::Ignored;
        }

        timer.remaining = timer.remaining.saturating_sub(1);
        if timer.remaining > 0 {
            return TickOutcome::Remaining(timer.remaining);
        }

        self.cancel_timer();
        if !self.is_last_section() {
            self.section_index += 1;
            self.question_index = 0;
            self.phase = Phase::Intro;
        }
        TickOutcome::Expired
    }

    /// Retries a failed submission. Equivalent to calling `next()` again
    /// from the submitting state.
    pub fn submit(&mut self) -> Result<Progress, NavigatorError> {
        if self.phase != Phase::Submitting {
            return Err(NavigatorError::InvalidTransition(
                "the session is not submitting",
            ));
        }
        self.try_submit()
    }

    fn try_submit(&mut self) -> Result<Progress, NavigatorError> {
        let responses = self.session.snapshot();
        let scores = calculate_scores(&responses);

        match self.gateway.submit(&responses, &scores) {
            Ok(()) => {
                self.submit_error = None;
                self.profile = Some(scores.clone());
                self.phase = Phase::Complete;
                Ok(Progress::Complete(Box::new(scores)))
            }
            Err(err) => {
                self.submit_error = Some(err.to_string());
                Err(NavigatorError::Submission(err))
            }
        }
    }

    /// Clears all state back to identity capture.
    pub fn reset(&mut self) {
        self.session.reset();
        self.phase = Phase::Ready;
        self.section_index = 0;
        self.question_index = 0;
        self.cancel_timer();
        self.submit_error = None;
        self.profile = None;
    }
}
