use crate::error::{PaymentError, Result};
use std::time::Duration;

/// Wait before the simulated confirmation answers.
pub const DEFAULT_CONFIRMATION_DELAY: Duration = Duration::from_secs(2);
/// How long a succeeded attempt stays visible before resetting.
pub const DEFAULT_SUCCESS_WINDOW: Duration = Duration::from_secs(3);
/// How long a failed attempt stays visible before resetting.
pub const DEFAULT_FAILURE_WINDOW: Duration = Duration::from_secs(3);
pub const DEFAULT_SUCCESS_RATE: f64 = 0.8;
pub const DEFAULT_MIN_CONTACT_LEN: usize = 10;

/// Timing and probability parameters of the payment simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub confirmation_delay: Duration,
    pub success_window: Duration,
    pub failure_window: Duration,
    /// Probability that a random confirmation goes through.
    pub success_rate: f64,
    pub min_contact_len: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            confirmation_delay: DEFAULT_CONFIRMATION_DELAY,
            success_window: DEFAULT_SUCCESS_WINDOW,
            failure_window: DEFAULT_FAILURE_WINDOW,
            success_rate: DEFAULT_SUCCESS_RATE,
            min_contact_len: DEFAULT_MIN_CONTACT_LEN,
        }
    }
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err(PaymentError::ValidationError(format!(
                "Success rate must be between 0 and 1, got {}",
                self.success_rate
            )));
        }
        Ok(())
    }

    /// Display window for an attempt that ended with `succeeded`.
    pub fn display_window(&self, succeeded: bool) -> Duration {
        if succeeded {
            self.success_window
        } else {
            self.failure_window
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulatorConfig::default();
        assert_eq!(config.confirmation_delay, Duration::from_secs(2));
        assert_eq!(config.display_window(true), Duration::from_secs(3));
        assert_eq!(config.display_window(false), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_success_rate_out_of_range() {
        let config = SimulatorConfig {
            success_rate: 1.5,
            ..SimulatorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PaymentError::ValidationError(_))
        ));

        let config = SimulatorConfig {
            success_rate: f64::NAN,
            ..SimulatorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
