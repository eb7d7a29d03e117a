//! Failures of a single catalog request

use thiserror::Error;

/// Why a page (or thumbnail) could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, DNS, timeout and similar
    #[error("{0}")]
    Transport(String),

    /// Non-success status with the server-supplied message
    #[error("Error {status}: {message}")]
    Status { status: u16, message: String },

    /// Success status but the body was not the expected JSON
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        let is_decode = e.is_decode();

        // The request URL carries the API key; keep it out of messages
        let e = e.without_url();
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }

        if is_decode {
            FetchError::Decode(message)
        } else {
            FetchError::Transport(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = FetchError::Status {
            status: 403,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "Error 403: quota exceeded");
    }
}
