//! Assertion configuration and per-call options.

use std::time::Duration;

/// Wait applied by single-message assertions when no timeout is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Configuration shared by every assertion evaluated in a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectConfig {
    /// Wait used when [`ReceiveOptions::timeout`] is `None`.
    pub default_timeout: Duration,
}

impl Default for ExpectConfig {
    fn default() -> Self {
        Self { default_timeout: DEFAULT_TIMEOUT }
    }
}

impl ExpectConfig {
    /// Set the default wait.
    #[must_use]
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}

/// Per-invocation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiveOptions {
    /// How long a single-message assertion waits for the next message.
    pub timeout: Option<Duration>,
}

impl ReceiveOptions {
    /// Options with an explicit wait.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout: Some(timeout) }
    }

    /// Options with an explicit wait in milliseconds.
    pub fn timeout_ms(millis: u64) -> Self {
        Self::with_timeout(Duration::from_millis(millis))
    }

    /// The wait to apply, falling back to the configured default.
    pub fn resolve_timeout(&self, config: &ExpectConfig) -> Duration {
        self.timeout.unwrap_or(config.default_timeout)
    }
}
