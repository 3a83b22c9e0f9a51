//! Bot configuration loaded from environment variables.
//!
//! Everything except the token has a sensible default so the bot can run
//! with nothing but `TELEGRAM_BOT_TOKEN` set.

use std::time::Duration;

use recap_shared::constants::{DEBOUNCE_SECS, DEFAULT_POLL_TIMEOUT_SECS};

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot API token.
    /// Env: `TELEGRAM_BOT_TOKEN` (required).
    pub token: String,

    /// Bot API host override, for tests and proxies.
    /// Env: `TELEGRAM_API_BASE`
    /// Default: `https://api.telegram.org`
    pub api_base: String,

    /// Quiet period after the last media arrival before a batch settles.
    /// Env: `RECAP_DEBOUNCE_SECS`
    /// Default: `2`
    pub debounce: Duration,

    /// `getUpdates` long-poll timeout in seconds.
    /// Env: `RECAP_POLL_TIMEOUT_SECS`
    /// Default: `30`
    pub poll_timeout_secs: u64,
}

impl BotConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for everything but the token.
    pub fn from_env() -> anyhow::Result<Self> {
        let token = std::env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow::anyhow!("TELEGRAM_BOT_TOKEN must be set (env or .env file)"))?;

        let api_base = std::env::var("TELEGRAM_API_BASE")
            .unwrap_or_else(|_| "https://api.telegram.org".to_string());

        let debounce = Duration::from_secs(env_secs("RECAP_DEBOUNCE_SECS", DEBOUNCE_SECS));
        let poll_timeout_secs = env_secs("RECAP_POLL_TIMEOUT_SECS", DEFAULT_POLL_TIMEOUT_SECS);

        Ok(Self {
            token,
            api_base,
            debounce,
            poll_timeout_secs,
        })
    }
}

/// Read a seconds value from the environment, keeping the default on a
/// missing or unparsable variable.
fn env_secs(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(value) => match value.parse::<u64>() {
            Ok(secs) => secs,
            Err(_) => {
                tracing::warn!(var = name, value = %value, "Invalid seconds value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_secs_falls_back_on_missing_var() {
        assert_eq!(env_secs("RECAP_TEST_UNSET_VAR", 7), 7);
    }

    #[test]
    fn env_secs_parses_valid_values() {
        std::env::set_var("RECAP_TEST_SECS_VAR", "15");
        assert_eq!(env_secs("RECAP_TEST_SECS_VAR", 7), 15);
        std::env::remove_var("RECAP_TEST_SECS_VAR");
    }

    #[test]
    fn env_secs_falls_back_on_garbage() {
        std::env::set_var("RECAP_TEST_BAD_SECS_VAR", "soon");
        assert_eq!(env_secs("RECAP_TEST_BAD_SECS_VAR", 7), 7);
        std::env::remove_var("RECAP_TEST_BAD_SECS_VAR");
    }
}
