//! Error taxonomy shared by the API client and the synchronizer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected locally; never reaches the network.
    #[error("{0}")]
    Validation(String),

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{resource}: request failed with status {status}")]
    Request { status: u16, resource: String },

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("sync worker is not running")]
    Disconnected,
}

impl Error {
    /// HTTP status behind this error, if the store answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::NotFound { .. } => Some(404),
            Error::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub(crate) fn from_status(status: reqwest::StatusCode, resource: &str) -> Self {
        if status == reqwest::StatusCode::NOT_FOUND {
            Error::NotFound {
                resource: resource.to_string(),
            }
        } else {
            Error::Request {
                status: status.as_u16(),
                resource: resource.to_string(),
            }
        }
    }
}
