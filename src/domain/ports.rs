use super::payment::{ConfirmationOutcome, PaymentRequest};
use super::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Stand-in for the external payment confirmation (the buyer approving the
/// push prompt on their phone).
///
/// Implementations decide how long the confirmation takes and whether it
/// goes through. The simulator awaits exactly one call per attempt.
#[async_trait]
pub trait ConfirmationProvider: Send + Sync {
    async fn confirm(&self, request: &PaymentRequest) -> ConfirmationOutcome;
}

/// Append-only order history.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    async fn record(&self, tx: Transaction) -> Result<()>;
    /// Most recent first.
    async fn all(&self) -> Result<Vec<Transaction>>;
}

pub type ConfirmationProviderRef = Arc<dyn ConfirmationProvider>;
pub type TransactionLogBox = Box<dyn TransactionLog>;
