use crate::domain::listing::ListingId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("A payment attempt is already in progress")]
    AttemptInProgress,
    #[error("Unknown listing: {0}")]
    UnknownListing(ListingId),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
