//! Error types for interpretation providers.

use std::time::Duration;

/// Alias for `Result<T, InterpretationError>`.
pub type InterpretationResult<T> = Result<T, InterpretationError>;

/// Why a generated interpretation could not be obtained.
#[derive(Debug, thiserror::Error)]
pub enum InterpretationError {
    /// The provider needs an API key and none is set.
    #[error("no API key found for provider '{0}'")]
    MissingApiKey(String),

    /// No provider is configured under this name.
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    /// The request did not complete in time.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The request failed before a response arrived.
    #[error("request failed: {0}")]
    Http(String),

    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response contained no text.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// The response body did not have the expected shape.
    #[error("could not decode provider response: {0}")]
    Decode(String),
}

impl InterpretationError {
    /// Classify a transport error, separating timeouts from other failures.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            InterpretationError::MissingApiKey("claude".into()).to_string(),
            "no API key found for provider 'claude'"
        );
        assert_eq!(
            InterpretationError::Timeout(Duration::from_secs(30)).to_string(),
            "request timed out after 30s"
        );
        assert_eq!(
            InterpretationError::Status {
                code: 401,
                body: "unauthorized".into()
            }
            .to_string(),
            "provider returned HTTP 401: unauthorized"
        );
    }
}
