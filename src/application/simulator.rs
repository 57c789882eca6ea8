use crate::config::SimulatorConfig;
use crate::domain::money::{Amount, Money};
use crate::domain::payment::{
    AttemptId, ConfirmationOutcome, ContactId, PaymentAttempt, PaymentRequest, PaymentSnapshot,
    PaymentStatus,
};
use crate::domain::ports::{ConfirmationProviderRef, TransactionLog};
use crate::domain::transaction::{Transaction, TransactionIdGenerator};
use crate::error::{PaymentError, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info, warn};

/// Scheduled inputs to the state machine, sent by background tasks.
#[derive(Debug)]
enum PaymentEvent {
    Resolved {
        attempt: AttemptId,
        outcome: ConfirmationOutcome,
    },
    DisplayWindowElapsed {
        attempt: AttemptId,
    },
}

/// A state change applied by [`PaymentSimulator::next_transition`].
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Confirmation went through and the transaction was recorded.
    Succeeded(Transaction),
    /// Confirmation was declined. Nothing was recorded.
    Failed,
    /// The display window elapsed and the simulator is idle again.
    Reset { after: PaymentStatus },
}

impl Transition {
    /// Whether the owner of the cart should now empty it.
    pub fn clears_cart(&self) -> bool {
        matches!(
            self,
            Transition::Reset {
                after: PaymentStatus::Succeeded
            }
        )
    }
}

/// Owns the single in-flight payment attempt.
///
/// The lifecycle is `idle -> pending -> succeeded | failed -> idle`.
/// [`initiate`](Self::initiate) moves to pending and spawns the confirmation
/// on the Tokio runtime; the resolution and the end of the display window
/// arrive later as events, applied one at a time by
/// [`next_transition`](Self::next_transition). Only one attempt exists at a
/// time, so nothing here needs a lock.
pub struct PaymentSimulator {
    config: SimulatorConfig,
    provider: ConfirmationProviderRef,
    attempt: Option<PaymentAttempt>,
    next_attempt: u64,
    ids: TransactionIdGenerator,
    events_tx: UnboundedSender<PaymentEvent>,
    events_rx: UnboundedReceiver<PaymentEvent>,
}

impl PaymentSimulator {
    pub fn new(provider: ConfirmationProviderRef, config: SimulatorConfig) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            config,
            provider,
            attempt: None,
            next_attempt: 1,
            ids: TransactionIdGenerator::new(),
            events_tx,
            events_rx,
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn status(&self) -> PaymentStatus {
        self.attempt
            .as_ref()
            .map_or(PaymentStatus::Idle, |attempt| attempt.status)
    }

    pub fn attempt(&self) -> Option<&PaymentAttempt> {
        self.attempt.as_ref()
    }

    pub fn snapshot(&self) -> PaymentSnapshot {
        PaymentSnapshot {
            status: self.status(),
            attempt: self.attempt.clone(),
        }
    }

    /// Starts a payment attempt for `amount`, confirmed by `contact`.
    ///
    /// Fails with `AttemptInProgress` unless idle, and with a
    /// `ValidationError` for a short contact or a zero amount. In both cases
    /// the state is left as it was. Must be called inside a Tokio runtime.
    pub fn initiate(
        &mut self,
        contact: &str,
        amount: Money,
        line_items: usize,
    ) -> Result<&PaymentAttempt> {
        if self.attempt.is_some() {
            return Err(PaymentError::AttemptInProgress);
        }
        let contact = ContactId::parse(contact, self.config.min_contact_len)?;
        let amount = Amount::try_from(amount)?;

        let id = AttemptId(self.next_attempt);
        self.next_attempt += 1;
        let request = PaymentRequest {
            contact,
            amount,
            line_items,
        };

        let provider = Arc::clone(&self.provider);
        let events = self.events_tx.clone();
        let pending = request.clone();
        tokio::spawn(async move {
            let outcome = provider.confirm(&pending).await;
            if events
                .send(PaymentEvent::Resolved {
                    attempt: id,
                    outcome,
                })
                .is_err()
            {
                debug!(attempt = %id, "Simulator gone before confirmation arrived");
            }
        });

        info!(attempt = %id, contact = %request.contact, amount = %request.amount, "Payment initiated");
        Ok(&*self.attempt.insert(PaymentAttempt {
            id,
            request,
            initiated_at: Utc::now(),
            status: PaymentStatus::Pending,
        }))
    }

    /// Waits for and applies the next scheduled transition.
    ///
    /// Returns `None` straight away when idle. On a confirmed payment the
    /// transaction is appended to `log` before returning.
    pub async fn next_transition(
        &mut self,
        log: &dyn TransactionLog,
    ) -> Result<Option<Transition>> {
        loop {
            let Some(current) = self.attempt.as_ref().map(|attempt| (attempt.id, attempt.status))
            else {
                return Ok(None);
            };
            let Some(event) = self.events_rx.recv().await else {
                return Ok(None);
            };

            match event {
                PaymentEvent::Resolved { attempt, outcome }
                    if attempt == current.0 && current.1 == PaymentStatus::Pending =>
                {
                    return self.resolve(outcome, log).await.map(Some);
                }
                PaymentEvent::DisplayWindowElapsed { attempt }
                    if attempt == current.0 && current.1.is_terminal() =>
                {
                    return Ok(self.reset());
                }
                stale => warn!(?stale, "Ignoring event for another attempt"),
            }
        }
    }

    async fn resolve(
        &mut self,
        outcome: ConfirmationOutcome,
        log: &dyn TransactionLog,
    ) -> Result<Transition> {
        let Some(attempt) = self.attempt.as_mut() else {
            return Err(PaymentError::ValidationError(
                "No payment attempt to resolve".to_string(),
            ));
        };
        let id = attempt.id;

        match outcome {
            ConfirmationOutcome::Confirmed => {
                attempt.status = PaymentStatus::Succeeded;
                let now = Utc::now();
                let tx = Transaction::completed(self.ids.next_id(now), attempt, now);
                self.schedule_reset(id, self.config.display_window(true));

                log.record(tx.clone()).await?;
                info!(attempt = %id, transaction = %tx.id, amount = %tx.amount, "Payment succeeded");
                Ok(Transition::Succeeded(tx))
            }
            ConfirmationOutcome::Declined => {
                attempt.status = PaymentStatus::Failed;
                self.schedule_reset(id, self.config.display_window(false));
                info!(attempt = %id, "Payment failed");
                Ok(Transition::Failed)
            }
        }
    }

    fn reset(&mut self) -> Option<Transition> {
        let attempt = self.attempt.take()?;
        info!(attempt = %attempt.id, after = %attempt.status, "Payment state reset to idle");
        Some(Transition::Reset {
            after: attempt.status,
        })
    }

    fn schedule_reset(&self, attempt: AttemptId, window: Duration) {
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if events
                .send(PaymentEvent::DisplayWindowElapsed { attempt })
                .is_err()
            {
                debug!(%attempt, "Simulator gone before display window elapsed");
            }
        });
    }
}
