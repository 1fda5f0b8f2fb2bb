use thiserror::Error;

use crate::domains::assistant::DatasetError;

/// Why a prompt produced no answer.
///
/// Validation, quota and no-answer rejections are client-visible outcomes;
/// a dataset failure is a server fault and gets logged at the boundary
/// before being surfaced as a generic failure.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("The message field is required and may not be greater than 500 characters.")]
    Validation,

    #[error("Please log in to continue using AI.")]
    QuotaExceeded,

    #[error("Sorry, your request is out of range. Please contact the administrator.")]
    NoAnswer,

    #[error(transparent)]
    DatasetUnavailable(#[from] DatasetError),
}

impl PromptError {
    /// True when the caller should be sent to the login page.
    pub fn requires_login(&self) -> bool {
        matches!(self, PromptError::QuotaExceeded)
    }

    /// True for server faults (as opposed to client-visible rejections).
    pub fn is_fault(&self) -> bool {
        matches!(self, PromptError::DatasetUnavailable(_))
    }
}
