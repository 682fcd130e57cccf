/*!
 * Pacing between backend calls.
 *
 * Free translation endpoints throttle or ban clients that call them too
 * quickly, so every backend call is preceded or followed by a delay. The
 * policy lives here, separate from chunking, and is chosen by configuration.
 */

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

/// Decides how long the pipeline waits around backend calls
pub trait Pacer: Send + Sync + Debug {
    /// Wait before the single call made for a short input
    fn initial_delay(&self) -> Duration;

    /// Wait after a chunk translated successfully
    fn delay_after_success(&self, chunk_index: usize) -> Duration;

    /// Wait before retry number `attempt` (1-based) of the same chunk
    fn delay_before_retry(&self, attempt: u32) -> Duration;
}

/// Constant delays
#[derive(Debug, Clone, PartialEq)]
pub struct FixedDelayPacer {
    pub initial: Duration,
    pub after_success: Duration,
    pub before_retry: Duration,
}

impl FixedDelayPacer {
    /// A pacer that never waits, for tests and local mock runs
    pub fn none() -> Self {
        Self {
            initial: Duration::ZERO,
            after_success: Duration::ZERO,
            before_retry: Duration::ZERO,
        }
    }
}

impl Default for FixedDelayPacer {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(default_initial_delay_ms()),
            after_success: Duration::from_millis(default_success_delay_ms()),
            before_retry: Duration::from_millis(default_retry_delay_ms()),
        }
    }
}

impl Pacer for FixedDelayPacer {
    fn initial_delay(&self) -> Duration {
        self.initial
    }

    fn delay_after_success(&self, _chunk_index: usize) -> Duration {
        self.after_success
    }

    fn delay_before_retry(&self, _attempt: u32) -> Duration {
        self.before_retry
    }
}

/// Retry delay doubles with every attempt, up to a cap
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialBackoffPacer {
    pub initial: Duration,
    pub after_success: Duration,
    pub base: Duration,
    pub max: Duration,
}

impl Pacer for ExponentialBackoffPacer {
    fn initial_delay(&self) -> Duration {
        self.initial
    }

    fn delay_after_success(&self, _chunk_index: usize) -> Duration {
        self.after_success
    }

    fn delay_before_retry(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.base.saturating_mul(1u32 << shift).min(self.max)
    }
}

/// Pacing strategy name
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PacingStrategy {
    #[default]
    Fixed,
    Exponential,
}

/// Serialized pacing settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PacingConfig {
    /// Which policy to build
    #[serde(default)]
    pub strategy: PacingStrategy,

    /// Delay before the single request of a short input
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Delay after each successful chunk
    #[serde(default = "default_success_delay_ms")]
    pub success_delay_ms: u64,

    /// Retry delay (fixed) or base retry delay (exponential)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Upper bound for exponential retry delays
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            strategy: PacingStrategy::default(),
            initial_delay_ms: default_initial_delay_ms(),
            success_delay_ms: default_success_delay_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl PacingConfig {
    /// Build the configured pacer
    pub fn build(&self) -> Box<dyn Pacer> {
        let initial = Duration::from_millis(self.initial_delay_ms);
        let after_success = Duration::from_millis(self.success_delay_ms);
        let retry = Duration::from_millis(self.retry_delay_ms);

        match self.strategy {
            PacingStrategy::Fixed => Box::new(FixedDelayPacer {
                initial,
                after_success,
                before_retry: retry,
            }),
            PacingStrategy::Exponential => Box::new(ExponentialBackoffPacer {
                initial,
                after_success,
                base: retry,
                max: Duration::from_millis(self.max_delay_ms.max(self.retry_delay_ms)),
            }),
        }
    }
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_success_delay_ms() -> u64 {
    1500
}

fn default_retry_delay_ms() -> u64 {
    3000
}

fn default_max_delay_ms() -> u64 {
    30_000
}
