use std::sync::Arc;

use chrono::Utc;

use super::gateway::{
    PortalStatus, ResponseStore, StoreError, SubmissionError, SubmissionGateway, SubmissionRecord,
};
use super::scoring::ScoreProfile;
use super::session::AllResponses;

/// Server-side submission path over a response store. The gate is
/// re-checked here on every submit, independent of whatever the respondent
/// saw when the session started.
pub struct SubmissionService<S> {
    store: Arc<S>,
}

impl<S> SubmissionService<S>
where
    S: ResponseStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn portal_status(&self) -> Result<PortalStatus, StoreError> {
        self.store.status()
    }

    pub fn set_portal_status(&self, status: PortalStatus) -> Result<(), StoreError> {
        self.store.set_status(status)
    }

    /// Validates and persists one completed run. Nothing is mutated on
    /// failure, so the caller may retry the identical submission.
    pub fn submit(
        &self,
        responses: &AllResponses,
        scores: &ScoreProfile,
    ) -> Result<(), SubmissionError> {
        if !self.store.status()?.is_open() {
            return Err(SubmissionError::Closed);
        }

        responses.student_info.validate()?;

        let record = SubmissionRecord {
            submitted_at: Utc::now().to_rfc3339(),
            responses: responses.clone(),
            scores: scores.clone(),
        };
        self.store.append(&record)?;
        Ok(())
    }
}

impl<S> SubmissionGateway for SubmissionService<S>
where
    S: ResponseStore,
{
    fn is_open(&self) -> Result<bool, SubmissionError> {
        Ok(self.portal_status()?.is_open())
    }

    fn submit(
        &self,
        responses: &AllResponses,
        scores: &ScoreProfile,
    ) -> Result<(), SubmissionError> {
        SubmissionService::submit(self, responses, scores)
    }
}
