//! Storefront configuration, overridable from the environment.

use std::env;
use std::time::Duration;

use tracing::warn;

use edutext_api::DEFAULT_BASE_URL;

pub const ENV_API_BASE_URL: &str = "EDUTEXT_API_BASE_URL";
pub const ENV_PAYSTACK_PUBLIC_KEY: &str = "EDUTEXT_PAYSTACK_PUBLIC_KEY";
pub const ENV_PAYMENT_TIMEOUT_SECS: &str = "EDUTEXT_PAYMENT_TIMEOUT_SECS";

/// Everything the storefront needs to talk to the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Base URL of the campus backend API.
    pub api_base_url: String,
    /// Publishable key handed to the inline payment widget.
    pub paystack_public_key: String,
    /// How long to wait on the payment widget before treating the attempt
    /// as cancelled. `None` waits for the buyer indefinitely.
    pub payment_timeout: Option<Duration>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            paystack_public_key: String::new(),
            payment_timeout: None,
        }
    }
}

impl StorefrontConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.paystack_public_key = public_key.into();
        self
    }

    pub fn with_payment_timeout(mut self, timeout: Duration) -> Self {
        self.payment_timeout = Some(timeout);
        self
    }

    /// Reads overrides from `EDUTEXT_*` variables on top of the defaults.
    /// An unparseable timeout is logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = env::var(ENV_API_BASE_URL) {
            if !base_url.trim().is_empty() {
                config.api_base_url = base_url;
            }
        }
        if let Ok(public_key) = env::var(ENV_PAYSTACK_PUBLIC_KEY) {
            config.paystack_public_key = public_key;
        }
        if let Ok(raw) = env::var(ENV_PAYMENT_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.payment_timeout = Some(Duration::from_secs(secs)),
                Ok(_) => {}
                Err(_) => warn!(value = %raw, "ignoring unparseable payment timeout"),
            }
        }
        config
    }
}
