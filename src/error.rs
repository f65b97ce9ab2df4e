use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported chart format: {0} (expected a .usc or .sus file)")]
    UnsupportedFormat(String),

    #[error("Chart data could not be decoded: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error("Chart data is not in the expected shape: {0}")]
    UnexpectedSchema(String),

    #[error("Chart file is not valid UTF-8 text")]
    InvalidUtf8,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
