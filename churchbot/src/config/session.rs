//! Session config: reconnect policy and gateway HTTP client settings.

use anyhow::Result;
use std::env;
use std::time::Duration;

use super::base::env_parse;
use crate::session::RetryPolicy;

/// Seconds Telegram holds a `getUpdates` long poll open. The HTTP request timeout must exceed it.
pub const LONG_POLL_TIMEOUT: Duration = Duration::from_secs(10);

/// Retry, timeout and proxy settings for the gateway session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// BOT_START_RETRIES: backoff waits allowed over the life of the process
    pub start_retries: u32,
    /// BOT_BACKOFF_SECONDS: wait is this times the attempt number
    pub backoff_seconds: u64,
    /// TG_CONNECT_TIMEOUT
    pub connect_timeout_secs: u64,
    /// TG_READ_TIMEOUT
    pub read_timeout_secs: u64,
    /// TG_WRITE_TIMEOUT
    pub write_timeout_secs: u64,
    /// TG_CONN_POOL: idle connections kept per host
    pub conn_pool: usize,
    /// TELEGRAM_PROXY, HTTPS_PROXY or HTTP_PROXY
    pub proxy: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_retries: 6,
            backoff_seconds: 5,
            connect_timeout_secs: 10,
            read_timeout_secs: 20,
            write_timeout_secs: 20,
            conn_pool: 8,
            proxy: None,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        let proxy = env::var("TELEGRAM_PROXY")
            .or_else(|_| env::var("HTTPS_PROXY"))
            .or_else(|_| env::var("HTTP_PROXY"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        Self {
            start_retries: env_parse("BOT_START_RETRIES", d.start_retries),
            backoff_seconds: env_parse("BOT_BACKOFF_SECONDS", d.backoff_seconds),
            connect_timeout_secs: env_parse("TG_CONNECT_TIMEOUT", d.connect_timeout_secs),
            read_timeout_secs: env_parse("TG_READ_TIMEOUT", d.read_timeout_secs),
            write_timeout_secs: env_parse("TG_WRITE_TIMEOUT", d.write_timeout_secs),
            conn_pool: env_parse("TG_CONN_POOL", d.conn_pool),
            proxy,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout_secs == 0 || self.read_timeout_secs == 0 || self.write_timeout_secs == 0 {
            anyhow::bail!("TG_CONNECT_TIMEOUT, TG_READ_TIMEOUT and TG_WRITE_TIMEOUT must be positive");
        }
        if self.request_timeout() <= LONG_POLL_TIMEOUT {
            anyhow::bail!(
                "TG_READ_TIMEOUT + TG_WRITE_TIMEOUT ({}s) must exceed the {}s long-poll timeout",
                self.request_timeout().as_secs(),
                LONG_POLL_TIMEOUT.as_secs()
            );
        }
        if let Some(ref proxy) = self.proxy {
            if reqwest::Proxy::all(proxy.as_str()).is_err() {
                anyhow::bail!("Proxy is set but not a valid proxy URL: {}", proxy);
            }
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.start_retries,
            backoff_base: Duration::from_secs(self.backoff_seconds),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// reqwest has a connect timeout and a whole-request timeout only, so the read and write
    /// budgets are summed into the latter.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs + self.write_timeout_secs)
    }
}
