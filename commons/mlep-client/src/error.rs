use std::fmt;

use thiserror::Error;

/// One of the three APIs of the managed service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Control,
    Runtime,
    Metrics,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Control => "control",
            Self::Runtime => "runtime",
            Self::Metrics => "metrics",
        })
    }
}

/// Failures talking to the managed service
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("{0} service URL is not configured")]
    UrlNotConfigured(Surface),

    #[error("{surface} service URL '{url}' is invalid: {reason}")]
    InvalidUrl {
        surface: Surface,
        url: String,
        reason: String,
    },

    #[error("service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unreadable service response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl ClientError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_url(
        surface: Surface,
        url: &str,
        reason: impl fmt::Display,
    ) -> Self {
        Self::InvalidUrl {
            surface,
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
