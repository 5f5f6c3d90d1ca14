use std::path::PathBuf;

use thiserror::Error;

/// The document could not be opened or decoded. Fatal to the whole parse.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode PDF text: {0}")]
    Decode(String),
}

/// A record could not be built with its invariants intact
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordError {
    #[error("description is empty")]
    EmptyDescription,

    #[error("amount must be a positive number, got {0}")]
    InvalidAmount(f64),

    #[error("exactly one of debit/credit must be nonzero, got debit {debit} and credit {credit}")]
    Sides { debit: f64, credit: f64 },
}

/// A primary line matched the grammar but failed secondary validation.
/// The scanner skips the line and keeps going.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LineParseError {
    #[error("invalid date/time '{input}': {reason}")]
    DateTime { input: String, reason: String },

    #[error("invalid amount '{0}'")]
    Amount(String),

    #[error("unknown transaction type '{0}'")]
    Kind(String),

    #[error(transparent)]
    Record(#[from] RecordError),
}
