use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur when prompting the Gemini API.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a usable HTTP exchange (DNS, TCP, TLS, or a
    /// broken body read).
    #[error("Could not establish connection : {detail}")]
    Connection {
        detail: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("Request failed. ( {status}) : {reason}{}", detail_suffix(.detail))]
    Status {
        status: u16,
        reason: String,
        detail: Option<String>,
    },

    /// The response body did not contain `candidates[0].content.parts[0].text`.
    #[error("Error parsing JSON: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(" - {detail}"),
        None => String::new(),
    }
}

impl Error {
    /// Wrap a transport error. The request URL is stripped first since it
    /// carries the API key.
    pub fn connection(source: reqwest::Error) -> Self {
        let source = source.without_url();
        let mut detail = source.to_string();
        let mut cause = source.source();
        while let Some(err) = cause {
            detail.push_str(": ");
            detail.push_str(&err.to_string());
            cause = err.source();
        }
        Error::Connection { detail, source }
    }

    pub fn status(status: u16, reason: impl Into<String>, detail: Option<String>) -> Self {
        Error::Status {
            status,
            reason: reason.into(),
            detail,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// HTTP status code for `Status` errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_text() {
        let error = Error::status(429, "Too Many Requests", None);
        assert_eq!(error.to_string(), "Request failed. ( 429) : Too Many Requests");
        assert_eq!(error.status_code(), Some(429));

        let error = Error::status(
            400,
            "Bad Request",
            Some("API key not valid. Please pass a valid API key.".to_string()),
        );
        assert_eq!(
            error.to_string(),
            "Request failed. ( 400) : Bad Request - API key not valid. Please pass a valid API key."
        );
    }

    #[test]
    fn test_parse_and_config_error_text() {
        let error = Error::parse("missing field `candidates`");
        assert!(error.to_string().starts_with("Error parsing JSON: "));
        assert!(error.to_string().contains("candidates"));
        assert_eq!(error.status_code(), None);

        let error = Error::config("no TLS backend");
        assert!(error.to_string().contains("Invalid configuration"));
    }
}
