use serde::{Deserialize, Serialize};

use super::scoring::ScoreProfile;
use super::session::{AllResponses, ValidationError};

/// Whether the portal is accepting submissions. Flipped externally by an
/// administrator; everything else only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalStatus {
    Open,
    Closed,
}

impl PortalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PortalStatus::Open => "open",
            PortalStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Some(PortalStatus::Open),
            "closed" => Some(PortalStatus::Closed),
            _ => None,
        }
    }

    pub const fn is_open(self) -> bool {
        matches!(self, PortalStatus::Open)
    }
}

/// One completed run, stamped at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(rename = "submittedAt")]
    pub submitted_at: String,
    pub responses: AllResponses,
    pub scores: ScoreProfile,
}

/// Storage abstraction for the persistence collaborator so the submission
/// path can be exercised in isolation.
pub trait ResponseStore: Send + Sync {
    fn status(&self) -> Result<PortalStatus, StoreError>;
    fn set_status(&self, status: PortalStatus) -> Result<(), StoreError>;
    /// Appends one flat row; the implementation writes the header row first
    /// if it is absent.
    fn append(&self, record: &SubmissionRecord) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("row encoding failure: {0}")]
    Encode(#[from] csv::Error),
}

/// A failed or refused submission. Everything except `Closed` is
/// recoverable by re-invoking submit with unchanged state.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("assessment is currently closed")]
    Closed,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The two narrow contracts the session core needs from the persistence
/// collaborator: the gate check and the persist call.
pub trait SubmissionGateway: Send + Sync {
    fn is_open(&self) -> Result<bool, SubmissionError>;
    fn submit(
        &self,
        responses: &AllResponses,
        scores: &ScoreProfile,
    ) -> Result<(), SubmissionError>;
}
