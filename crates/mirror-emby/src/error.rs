//! Error types for mirror-emby

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `endpoint` never carries the query string, so the
    /// API key stays out of logs.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Invalid server URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<Error> for mirror_core::Error {
    fn from(e: Error) -> Self {
        mirror_core::Error::upstream(e.to_string())
    }
}
