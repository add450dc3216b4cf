use reqwest::StatusCode;
use std::process::ExitStatus;
use thiserror::Error;

/// Failures surfaced by providers, tools and loaders.
///
/// Every operation fails with exactly one of these kinds. Nothing in the crate
/// retries or downgrades a failure, so callers can branch on the variant.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    #[error("Backend request failed: {0}")]
    BackendRequest(#[from] BackendError),

    #[error("Backend returned no candidates")]
    NoCandidates,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// `code` and `signal` are both `None` only when the child never started.
    #[error("Execution failed ({}): {stderr}", display_status(.code, .signal))]
    ExecutionFailed {
        code: Option<i32>,
        signal: Option<i32>,
        stderr: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("pdftotext not found")]
    PdfToTextNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The backend's own failure, tagged by where in the round trip it happened.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("openai: {0}")]
    Http(#[from] reqwest::Error),

    #[error("openai: request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("openai: {0}")]
    Api(String),

    #[error("openai: malformed response: {0}")]
    Decode(String),
}

impl Error {
    /// Failure for a child that ran and exited unsuccessfully.
    pub fn from_exit_status(status: ExitStatus, stderr: String) -> Self {
        Error::ExecutionFailed {
            code: status.code(),
            signal: exit_signal(&status),
            stderr,
        }
    }

    /// Failure for a child that could not be launched at all.
    pub fn launch_failed(stderr: String) -> Self {
        Error::ExecutionFailed {
            code: None,
            signal: None,
            stderr,
        }
    }
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

fn display_status(code: &Option<i32>, signal: &Option<i32>) -> String {
    match (code, signal) {
        (Some(code), _) => format!("exit code {}", code),
        (None, Some(signal)) => format!("terminated by signal {}", signal),
        (None, None) => "exit code none".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failed_display() {
        let err = Error::ExecutionFailed {
            code: Some(3),
            signal: None,
            stderr: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Execution failed (exit code 3): boom");

        let err = Error::launch_failed("No such file or directory".to_string());
        assert!(err.to_string().contains("exit code none"));

        let err = Error::ExecutionFailed {
            code: None,
            signal: Some(9),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "Execution failed (terminated by signal 9): ");
    }

    #[test]
    fn test_backend_error_converts() {
        let err: Error = BackendError::Api("rate limited".to_string()).into();
        assert!(matches!(err, Error::BackendRequest(BackendError::Api(_))));
        assert_eq!(
            err.to_string(),
            "Backend request failed: openai: rate limited"
        );
    }
}
