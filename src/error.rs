//! Typed errors for forge operations.
//!
//! The publisher treats "release already exists" as a warning and every
//! other failure as a per-tag error, so the forge layer classifies API
//! failures here instead of handing back an opaque report.

use reqwest::StatusCode;
use thiserror::Error;

/// Error code GitHub reports in `errors[].code` for duplicate releases.
const ALREADY_EXISTS_CODE: &str = "already_exists";

/// Failure modes of a release-creation call.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Release already exists for tag {0}")]
    AlreadyExists(String),

    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,
}

/// Result type for forge calls.
pub type ForgeResult<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create a conflict error for the given tag
    pub fn already_exists(tag: impl Into<String>) -> Self {
        Self::AlreadyExists(tag.into())
    }

    /// Whether this error means the release was already published.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }
}

/// Returns true when a GitHub error payload reports a duplicate resource.
///
/// The structured `errors[].code` field is checked first. The message text
/// is only consulted when the payload carries no error entries.
pub fn is_already_exists(
    status: StatusCode,
    errors: Option<&[serde_json::Value]>,
    message: &str,
) -> bool {
    if let Some(errors) = errors
        && !errors.is_empty()
    {
        return status == StatusCode::UNPROCESSABLE_ENTITY
            && errors.iter().any(|e| {
                e.get("code").and_then(|c| c.as_str())
                    == Some(ALREADY_EXISTS_CODE)
            });
    }

    let message = message.to_lowercase();
    message.contains(ALREADY_EXISTS_CODE) || message.contains("already exists")
}

// Classification for octocrab errors (GitHub API). The tag is unknown at
// this level so conflicts carry the API message and get re-labelled by the
// caller.
impl From<octocrab::Error> for ReleaseError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                if is_already_exists(
                    source.status_code,
                    source.errors.as_deref(),
                    &source.message,
                ) {
                    Self::AlreadyExists(source.message.clone())
                } else if source.message.contains("rate limit") {
                    Self::RateLimitExceeded
                } else if source.status_code == StatusCode::UNAUTHORIZED
                    || source.status_code == StatusCode::FORBIDDEN
                {
                    Self::AuthenticationError(source.message.clone())
                } else {
                    Self::ForgeError(format!(
                        "GitHub API error ({}): {}",
                        source.status_code, source.message
                    ))
                }
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}
