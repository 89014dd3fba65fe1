use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("bad credentials")]
    Auth,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("malformed field: {0}")]
    Format(String),

    #[error("operation failed: {0}")]
    Operation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
