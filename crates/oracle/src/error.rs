use thiserror::Error;

pub type Result<T> = std::result::Result<T, OracleError>;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Malformed venue response: {0}")]
    MalformedResponse(String),
}
