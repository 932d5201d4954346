use std::error::Error;
use thiserror::Error;

/// Errors raised by the response model.
///
/// None of these are transient: they signal a middleware bug or an application value the
/// model cannot send. They are returned to the immediate caller and never logged here.
#[derive(Error, Debug)]
pub enum ResponseError {
    /// A mutator was called after the response was finalized.
    #[error("the response is not writable")]
    NotWritable,

    /// The body is set but could not be converted into bytes.
    #[error("response body set but could not be converted: {source}")]
    UnconvertibleBody { source: Box<dyn Error + Send + Sync> },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },
}

impl ResponseError {
    pub fn unconvertible_body<E: Into<Box<dyn Error + Send + Sync>>>(e: E) -> Self {
        Self::UnconvertibleBody { source: e.into() }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn is_not_writable(&self) -> bool {
        matches!(self, Self::NotWritable)
    }
}

impl From<http::Error> for ResponseError {
    fn from(e: http::Error) -> Self {
        Self::invalid_header(e)
    }
}
