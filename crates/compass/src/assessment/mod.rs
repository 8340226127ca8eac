//! Assessment session flow, scoring, and submission plumbing.
//!
//! The respondent-facing half (catalog, session store, navigator) drives a
//! single person through the five sections; the collaborator-facing half
//! (gateway, service, sheet, router) persists each completed run as one flat
//! row behind an open/closed gate.

pub mod catalog;
pub mod gateway;
pub mod interpretation;
pub mod navigator;
pub mod recommendation;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;
pub mod sheet;

#[cfg(test)]
mod tests;

pub use catalog::{AssessmentCatalog, Question, QuestionKind, Section, SectionId};
pub use gateway::{
    PortalStatus, ResponseStore, StoreError, SubmissionError, SubmissionGateway, SubmissionRecord,
};
pub use navigator::{Navigator, NavigatorError, Phase, Progress, TickOutcome};
pub use recommendation::{generate_recommendations, Priority, Recommendation};
pub use router::{assessment_router, AssessmentRouterState};
pub use scoring::{calculate_scores, FlagLevel, ScoreProfile};
pub use service::SubmissionService;
pub use session::{
    AllResponses, Answer, ResponseError, SessionStore, StudentInfo, StudentInfoPatch,
    ValidationError,
};
