//! Unified error handling for configuration, transport, and job failures.

use thiserror::Error;

/// Unified error type for the crate.
///
/// Aggregates every failure mode of a transcription run: invalid
/// configuration, unreadable local files, transport failures, non-200
/// answers from the service, and jobs that end in a failure status.
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration field is missing or empty, or the
    /// configuration record could not be read or parsed.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A local file (audio or alignment text) could not be opened.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP exchange itself failed (connect, timeout, body read).
    #[error("Network transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-200 status code.
    ///
    /// `message` is a human-readable diagnostic; for job submission it
    /// lists the common causes of the specific status code.
    #[error("Remote error: HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// The job reached a terminal failure status on the service side.
    #[error("Job failed: {message}")]
    JobFailed { message: String },

    /// A 200 response body could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn remote(status: u16, message: impl Into<String>) -> Self {
        Error::Remote {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn job_failed(message: impl Into<String>) -> Self {
        Error::JobFailed {
            message: message.into(),
        }
    }

    /// The HTTP status code carried by [`Error::Remote`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
