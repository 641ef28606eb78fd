//! Error types for moodledger

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Index specification '{spec_id}' failed validation: {reason}")]
    SpecValidation { spec_id: String, reason: String },

    #[error("Index specification '{spec_id}' cites unknown evidence '{citation_id}'")]
    UnknownCitation {
        spec_id: String,
        citation_id: String,
    },

    #[error("Duplicate index specification id: {0}")]
    DuplicateSpec(String),
}

pub type Result<T> = std::result::Result<T, Error>;
