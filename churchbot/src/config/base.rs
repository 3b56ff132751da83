//! Base config: Telegram connection, logging, data directory, admin seed list. Loaded from env.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Reads `key` and parses it; unset or unparseable values fall back to `default`.
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a `true`/`false` flag; anything other than `true` (case-insensitive) is false.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => v.trim().eq_ignore_ascii_case("true"),
        Err(_) => default,
    }
}

/// Splits a comma-separated id list, dropping blanks.
pub(crate) fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Base config: Telegram access, logging, persisted state location.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// DATA_DIR: directory holding admins.json, groups.json, ...
    pub data_dir: PathBuf,
    /// ADMIN_IDS: comma-separated ids added to the admin store at startup
    pub admin_ids: Vec<String>,
    /// CHURCHBOT_DEBUG=1 switches the default log filter to debug
    pub debug: bool,
    /// TRANSLATE_API_URL: override of the translation endpoint base
    pub translate_api_url: Option<String>,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN and `data_dir` overrides DATA_DIR.
    pub fn load(token: Option<String>, data_dir: Option<PathBuf>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/churchbot.log".to_string());
        let data_dir = data_dir
            .or_else(|| env::var("DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("data"));
        let admin_ids = env::var("ADMIN_IDS")
            .map(|raw| parse_id_list(&raw))
            .unwrap_or_default();
        let debug = env::var("CHURCHBOT_DEBUG").map(|v| v == "1").unwrap_or(false);
        let translate_api_url = env::var("TRANSLATE_API_URL").ok();

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            data_dir,
            admin_ids,
            debug,
            translate_api_url,
        })
    }

    /// Builds config with the given token and data dir; other fields take their defaults.
    pub fn with_token(bot_token: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            bot_token: bot_token.into(),
            telegram_api_url: None,
            log_file: "logs/churchbot.log".to_string(),
            data_dir: data_dir.into(),
            admin_ids: Vec::new(),
            debug: false,
            translate_api_url: None,
        }
    }

    /// Validate config (e.g. URLs must parse if set).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if let Some(ref url_str) = self.translate_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("TRANSLATE_API_URL is set but not a valid URL: {}", url_str);
            }
        }
        Ok(())
    }
}
