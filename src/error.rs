use thiserror::Error;

pub const PATTERN_REQUIRED: &str = "The regex pattern is required";
pub const INPUT_REQUIRED: &str = "The input is required";
pub const NO_MATCH_FOUND: &str = "No match found";

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0}")]
    IllegalState(&'static str),
    // syntax errors are handed back from the engine untouched
    #[error(transparent)]
    Compile(Box<fancy_regex::Error>),
    #[error("matching failed: {0}")]
    Match(Box<fancy_regex::Error>),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Error {
        Error::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
