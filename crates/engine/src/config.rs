use std::time::Duration;

use jobrelay_events::delivery::webhook::DEFAULT_REQUEST_TIMEOUT;

/// Default simulated work duration between `running` and `completed`.
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_millis(3000);

/// Engine configuration.
///
/// Deferred completion tasks receive a snapshot of this value when they are
/// spawned and never consult the environment themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long a triggered job stays `running` before it completes.
    pub completion_delay: Duration,
    /// Completion webhook receiver. `None` disables notification.
    pub webhook_url: Option<String>,
    /// Timeout for a single webhook request. Not read by the engine: it
    /// configures the `WebhookDelivery` handed to `JobEngine::new`.
    pub webhook_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            completion_delay: DEFAULT_COMPLETION_DELAY,
            webhook_url: None,
            webhook_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `JOB_DURATION_MS`      | `3000`  |
    /// | `WEBHOOK_URL`          | unset   |
    /// | `WEBHOOK_TIMEOUT_SECS` | `10`    |
    ///
    /// A blank `WEBHOOK_URL` is treated as unset.
    pub fn from_env() -> Self {
        let completion_delay = std::env::var("JOB_DURATION_MS")
            .ok()
            .map(|v| {
                v.parse::<u64>()
                    .map(Duration::from_millis)
                    .expect("JOB_DURATION_MS must be a valid u64")
            })
            .unwrap_or(DEFAULT_COMPLETION_DELAY);

        let webhook_url = normalize_url(std::env::var("WEBHOOK_URL").ok());

        let webhook_timeout = std::env::var("WEBHOOK_TIMEOUT_SECS")
            .ok()
            .map(|v| {
                v.parse::<u64>()
                    .map(Duration::from_secs)
                    .expect("WEBHOOK_TIMEOUT_SECS must be a valid u64")
            })
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Self {
            completion_delay,
            webhook_url,
            webhook_timeout,
        }
    }

    /// Same configuration with a different webhook receiver.
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = normalize_url(Some(url.into()));
        self
    }

    /// Same configuration with a different work duration.
    pub fn with_completion_delay(mut self, delay: Duration) -> Self {
        self.completion_delay = delay;
        self
    }
}

fn normalize_url(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
