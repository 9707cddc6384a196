use reqwest::StatusCode;
use thiserror::Error;

/// Returned by a page validator when a page breaks the expected contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} on {}", describe_page(.page))]
    Status {
        page: Option<u32>,
        status: StatusCode,
    },

    #[error("malformed search response on {}: {source}", describe_page(.page))]
    Decode {
        page: Option<u32>,
        #[source]
        source: serde_json::Error,
    },

    #[error("nothing found for query {query:?}")]
    NothingFound { query: String },

    #[error("validation failed on page {page}: {message}")]
    Validation {
        page: u32,
        message: String,
        body: String,
    },
}

impl ProbeError {
    /// Page index the failure is attributed to, `None` for the discovery request.
    pub fn page(&self) -> Option<u32> {
        match self {
            ProbeError::Status { page, .. } | ProbeError::Decode { page, .. } => *page,
            ProbeError::Validation { page, .. } => Some(*page),
            _ => None,
        }
    }
}

fn describe_page(page: &Option<u32>) -> String {
    match page {
        Some(idx) => format!("page {idx}"),
        None => "discovery request".to_string(),
    }
}
