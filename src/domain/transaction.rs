use super::money::Amount;
use super::payment::{ContactId, PaymentAttempt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const ID_PREFIX: &str = "MPX";
const ID_DIGITS: i64 = 100_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
}

/// A completed purchase. Appended to the order history, never changed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: Amount,
    pub contact: ContactId,
    pub timestamp: DateTime<Utc>,
    /// Number of cart lines paid for.
    pub items: usize,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Builds the record for a confirmed attempt.
    pub fn completed(id: TransactionId, attempt: &PaymentAttempt, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            amount: attempt.request.amount,
            contact: attempt.request.contact.clone(),
            timestamp,
            items: attempt.request.line_items,
            status: TransactionStatus::Completed,
        }
    }
}

/// Derives transaction ids from the attempt time.
///
/// Ids are `MPX` followed by the last eight digits of the epoch
/// milliseconds. Two attempts in the same millisecond get consecutive
/// values instead of the same id.
#[derive(Debug, Default)]
pub struct TransactionIdGenerator {
    last_millis: Option<i64>,
}

impl TransactionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, at: DateTime<Utc>) -> TransactionId {
        let mut millis = at.timestamp_millis();
        if let Some(last) = self.last_millis
            && millis <= last
        {
            millis = last + 1;
        }
        self.last_millis = Some(millis);
        TransactionId(format!("{ID_PREFIX}{:08}", millis.rem_euclid(ID_DIGITS)))
    }
}
