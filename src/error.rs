use thiserror::Error;

/// Reasons a motion layer could not be set up. All of them are fail-soft:
/// the affected layer is skipped and the page keeps working.
#[derive(Debug, Error)]
pub enum MotionError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("no document body")]
    NoBody,
    #[error("2d context unavailable for {0} canvas")]
    NoContext2d(&'static str),
    #[error("dom call failed: {0}")]
    Dom(String),
}

pub type MotionResult<T> = Result<T, MotionError>;
