use crate::schema::SchemaViolation;
use thiserror::Error;

/// Message shown to the user for every failure that is not a configuration problem.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to complete analysis. Please check the URL and try again.";

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Gemini API key is missing. Please set the API_KEY environment variable.")]
    MissingCredential,

    #[error("HTTP request failed: {0}")]
    HttpError(#[source] reqwest::Error),

    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Model returned no text output")]
    EmptyResponse,

    #[error("Response is not valid report JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Response does not match the report schema: {0}")]
    SchemaError(#[from] SchemaViolation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fatal setup problem, reported before any network activity
    Configuration,
    /// Anything that went wrong reaching or parsing the remote service
    Analysis,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::MissingCredential => ErrorKind::Configuration,
            _ => ErrorKind::Analysis,
        }
    }

    /// Text safe to put in front of the user. Analysis failures collapse to a
    /// single generic message; the cause goes to the log instead.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Configuration => self.to_string(),
            ErrorKind::Analysis => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

// Request URLs are dropped from transport errors before they reach any log
impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        AnalysisError::HttpError(e.without_url())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_is_configuration() {
        let err = AnalysisError::MissingCredential;
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.user_message().contains("API key is missing"));
    }

    #[test]
    fn test_analysis_errors_use_generic_message() {
        let err = AnalysisError::ApiError {
            status: 500,
            body: "internal stack trace".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Analysis);
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(!err.user_message().contains("stack trace"));

        let parse = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = AnalysisError::from(parse);
        assert_eq!(err.kind(), ErrorKind::Analysis);
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}
