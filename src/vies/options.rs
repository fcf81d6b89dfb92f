//! Per-call validation options.

use std::time::Duration;

use serde::Deserialize;

/// Default wall-clock budget for the retry loop.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default pause between failed attempts.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Sparse caller-supplied options. Unset fields fall back to
/// [`ValidationConfig::default`].
///
/// Deserializes from the camelCase JSON shape
/// `{"timeoutMs": 5000, "retryDelayMs": 500, "fullResponse": false}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidationOptions {
    /// Total wall-clock budget in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Pause between failed attempts in milliseconds.
    pub retry_delay_ms: Option<u64>,
    /// Return the full record (`true`) or only the validity flag.
    pub full_response: Option<bool>,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    pub fn retry_delay_ms(mut self, ms: u64) -> Self {
        self.retry_delay_ms = Some(ms);
        self
    }

    pub fn full_response(mut self, full: bool) -> Self {
        self.full_response = Some(full);
        self
    }

    /// Merge over the defaults, field by field.
    pub fn resolve(&self) -> ValidationConfig {
        ValidationConfig::default().merge(self)
    }
}

/// Fully-resolved options for one validation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    pub timeout: Duration,
    pub retry_delay: Duration,
    pub full_response: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            full_response: true,
        }
    }
}

impl ValidationConfig {
    /// Override every field `options` sets.
    pub fn merge(self, options: &ValidationOptions) -> Self {
        Self {
            timeout: options
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(self.timeout),
            retry_delay: options
                .retry_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(self.retry_delay),
            full_response: options.full_response.unwrap_or(self.full_response),
        }
    }
}

impl From<ValidationOptions> for ValidationConfig {
    fn from(options: ValidationOptions) -> Self {
        options.resolve()
    }
}
