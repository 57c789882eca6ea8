use super::money::Amount;
use crate::error::PaymentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phone-like identifier the confirmation request is sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Validates `raw` after trimming surrounding whitespace.
    ///
    /// The trimmed identifier must contain at least `min_len` characters;
    /// padding does not count towards the length.
    pub fn parse(raw: &str, min_len: usize) -> Result<Self, PaymentError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().count() < min_len {
            return Err(PaymentError::ValidationError(format!(
                "Please enter a valid phone number (at least {min_len} characters)"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the buyer is asked to confirm: frozen when checkout starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub contact: ContactId,
    pub amount: Amount,
    /// Number of cart lines being paid for.
    pub line_items: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AttemptId(pub u64);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl PaymentStatus {
    /// Succeeded and failed attempts are only waiting out their display window.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Succeeded | PaymentStatus::Failed)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Idle => "idle",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Answer of the (simulated) external confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationOutcome {
    Confirmed,
    Declined,
}

/// One checkout confirmation cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentAttempt {
    pub id: AttemptId,
    pub request: PaymentRequest,
    pub initiated_at: DateTime<Utc>,
    /// Never `Idle`: an idle simulator has no attempt.
    pub status: PaymentStatus,
}

/// What the display layer sees of the payment state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSnapshot {
    pub status: PaymentStatus,
    pub attempt: Option<PaymentAttempt>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_too_short() {
        assert!(matches!(
            ContactId::parse("123", 10),
            Err(PaymentError::ValidationError(_))
        ));
        assert!(ContactId::parse("", 10).is_err());
        assert!(ContactId::parse("    0712    ", 10).is_err());
    }

    #[test]
    fn test_contact_valid() {
        let contact = ContactId::parse(" 0712345678 ", 10).unwrap();
        assert_eq!(contact.as_str(), "0712345678");
    }

    #[test]
    fn test_contact_length_counts_trimmed_characters() {
        // Eleven characters raw, eight once surrounding spaces are dropped.
        let padded = "  07123456 ";
        assert_eq!(padded.chars().count(), 11);
        assert!(matches!(
            ContactId::parse(padded, 10),
            Err(PaymentError::ValidationError(_))
        ));

        let contact = ContactId::parse("  0712345678  ", 10).unwrap();
        assert_eq!(contact.as_str(), "0712345678");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&PaymentStatus::Succeeded).unwrap();
        assert_eq!(json, "\"succeeded\"");
        assert_eq!(PaymentStatus::default(), PaymentStatus::Idle);
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(!PaymentStatus::Pending.is_terminal());
    }
}
