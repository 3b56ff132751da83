//! BotConfig: BaseConfig + SessionConfig + Features. Use load() for env-based loading.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{BaseConfig, Features, SessionConfig};
use crate::session::RetryPolicy;

/// Bot config. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub session: SessionConfig,
    pub features: Features,
}

impl BotConfig {
    /// Load full config from environment variables. `token` overrides BOT_TOKEN, `data_dir` overrides DATA_DIR.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>, data_dir: Option<PathBuf>) -> Result<Self> {
        let base = BaseConfig::load(token, data_dir)?;
        let session = SessionConfig::from_env();
        let features = Features::from_env();
        Ok(Self {
            base,
            session,
            features,
        })
    }

    /// Config with the given token and data dir and defaults everywhere else.
    pub fn with_token(bot_token: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            base: BaseConfig::with_token(bot_token, data_dir),
            session: SessionConfig::default(),
            features: Features::default(),
        }
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.session.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }
    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn data_dir(&self) -> &Path {
        &self.base.data_dir
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn admin_ids(&self) -> &[String] {
        &self.base.admin_ids
    }
    pub fn retry_policy(&self) -> RetryPolicy {
        self.session.retry_policy()
    }
}
