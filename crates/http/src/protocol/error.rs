use std::error::Error;
use std::io;
use thiserror::Error;

/// Errors produced while a [`PayloadBody`](crate::protocol::PayloadBody) is being polled.
#[derive(Error, Debug)]
pub enum BodyError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("body stream error: {source}")]
    Stream { source: Box<dyn Error + Send + Sync> },
}

impl BodyError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    pub fn stream<E: Into<Box<dyn Error + Send + Sync>>>(e: E) -> Self {
        Self::Stream { source: e.into() }
    }
}
