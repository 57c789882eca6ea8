use crate::config::SimulatorConfig;
use crate::domain::payment::{ConfirmationOutcome, PaymentRequest};
use crate::domain::ports::ConfirmationProvider;
use crate::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Confirms after a fixed delay with a fixed probability of success.
pub struct RandomConfirmation {
    delay: Duration,
    success_rate: f64,
    rng: Mutex<StdRng>,
}

impl RandomConfirmation {
    /// Seeds the draw from OS entropy.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible draws for a given `seed`.
    pub fn seeded(config: &SimulatorConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &SimulatorConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            delay: config.confirmation_delay,
            success_rate: config.success_rate,
            rng: Mutex::new(rng),
        })
    }
}

#[async_trait]
impl ConfirmationProvider for RandomConfirmation {
    async fn confirm(&self, request: &PaymentRequest) -> ConfirmationOutcome {
        tokio::time::sleep(self.delay).await;
        let confirmed = self.rng.lock().await.gen_bool(self.success_rate);
        debug!(contact = %request.contact, confirmed, "Drew confirmation outcome");
        if confirmed {
            ConfirmationOutcome::Confirmed
        } else {
            ConfirmationOutcome::Declined
        }
    }
}

/// Answers with a predetermined sequence of outcomes.
///
/// Once the script runs out every further request gets `fallback`. Requests
/// are kept so callers can inspect what was asked.
pub struct ScriptedConfirmation {
    delay: Duration,
    outcomes: Mutex<VecDeque<ConfirmationOutcome>>,
    fallback: ConfirmationOutcome,
    requests: Mutex<Vec<PaymentRequest>>,
}

impl ScriptedConfirmation {
    pub fn new(outcomes: impl IntoIterator<Item = ConfirmationOutcome>) -> Self {
        Self {
            delay: Duration::ZERO,
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            fallback: ConfirmationOutcome::Declined,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn always(outcome: ConfirmationOutcome) -> Self {
        Self {
            fallback: outcome,
            ..Self::new([])
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn requests(&self) -> Vec<PaymentRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ConfirmationProvider for ScriptedConfirmation {
    async fn confirm(&self, request: &PaymentRequest) -> ConfirmationOutcome {
        self.requests.lock().await.push(request.clone());
        tokio::time::sleep(self.delay).await;
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or(self.fallback)
    }
}
