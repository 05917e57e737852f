//! Error taxonomy for the generation pipeline.
//!
//! Every failure aborts the whole request. Nothing is retried and no partial
//! artifact set is ever packaged. [`GenerateError::class`] splits failures into
//! caller mistakes (bad config, bad base name, unreadable source) and internal
//! failures (resizer, encoder or packager rejected the work), which is what a request
//! surface maps onto 4xx/5xx.

use crate::formats::OutputFormat;
use crate::imaging::CodecError;
use crate::package::PackageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid base name {name:?}: {reason}")]
    InvalidBaseName { name: String, reason: String },
    #[error("Failed to decode source image: {0}")]
    Decode(#[source] CodecError),
    #[error("Failed to resize to {width}x{height}: {source}")]
    Resize {
        width: u32,
        height: u32,
        #[source]
        source: CodecError,
    },
    #[error("Failed to encode {width}px {format}: {source}")]
    Encode {
        width: u32,
        format: OutputFormat,
        #[source]
        source: CodecError,
    },
    #[error("Unsupported output format: {0:?}")]
    UnsupportedFormat(String),
    #[error("Filename does not follow the <name>-<width>.<format> convention: {0}")]
    FilenameParse(String),
    #[error("Packaging failed: {0}")]
    Package(#[from] PackageError),
}

/// Who is responsible for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller supplied bad input and can fix it.
    ClientInput,
    /// The pipeline itself failed on valid input.
    Internal,
}

impl ErrorClass {
    pub fn label(self) -> &'static str {
        match self {
            ErrorClass::ClientInput => "input error",
            ErrorClass::Internal => "internal error",
        }
    }
}

impl GenerateError {
    pub fn class(&self) -> ErrorClass {
        match self {
            GenerateError::InvalidConfig(_)
            | GenerateError::InvalidBaseName { .. }
            | GenerateError::Decode(_)
            | GenerateError::UnsupportedFormat(_)
            | GenerateError::FilenameParse(_) => ErrorClass::ClientInput,
            GenerateError::Resize { .. }
            | GenerateError::Encode { .. }
            | GenerateError::Package(_) => ErrorClass::Internal,
        }
    }
}
