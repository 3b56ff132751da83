//! Config tests.

use crate::config::BotConfig;
use serial_test::serial;
use std::env;
use std::path::Path;
use std::time::Duration;

const ALL_VARS: &[&str] = &[
    "BOT_TOKEN",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LOG_FILE",
    "DATA_DIR",
    "ADMIN_IDS",
    "CHURCHBOT_DEBUG",
    "TRANSLATE_API_URL",
    "BOT_START_RETRIES",
    "BOT_BACKOFF_SECONDS",
    "TG_CONNECT_TIMEOUT",
    "TG_READ_TIMEOUT",
    "TG_WRITE_TIMEOUT",
    "TG_CONN_POOL",
    "TELEGRAM_PROXY",
    "HTTPS_PROXY",
    "HTTP_PROXY",
    "ENABLE_TRANSLATION",
    "ENABLE_QUIZ",
    "ENABLE_BROADCAST",
    "ENABLE_SCHEDULER",
    "DAILY_INSPIRATION_INTERVAL_SECS",
];

fn clear_env() {
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");

    let config = BotConfig::load(None, None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/churchbot.log");
    assert_eq!(config.data_dir(), Path::new("data"));
    assert!(config.admin_ids().is_empty());
    assert!(!config.base().debug);

    let session = config.session();
    assert_eq!(session.start_retries, 6);
    assert_eq!(session.backoff_seconds, 5);
    assert_eq!(session.connect_timeout(), Duration::from_secs(10));
    assert_eq!(session.request_timeout(), Duration::from_secs(40));
    assert_eq!(session.conn_pool, 8);
    assert!(session.proxy.is_none());

    let features = config.features();
    assert!(features.translation);
    assert!(features.quiz);
    assert!(features.broadcast);
    assert!(features.scheduler);
    assert!(features.daily_inspiration_interval().is_none());

    let policy = config.retry_policy();
    assert_eq!(policy.max_retries, 6);
    assert_eq!(policy.backoff_base, Duration::from_secs(5));
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("BOT_TOKEN", "custom_token");
    env::set_var("DATA_DIR", "/var/lib/churchbot");
    env::set_var("ADMIN_IDS", "42, 7,,99 ");
    env::set_var("BOT_START_RETRIES", "2");
    env::set_var("BOT_BACKOFF_SECONDS", "1");
    env::set_var("TG_CONN_POOL", "4");
    env::set_var("HTTPS_PROXY", "http://127.0.0.1:8080");
    env::set_var("ENABLE_QUIZ", "false");
    env::set_var("ENABLE_TRANSLATION", "TRUE");
    env::set_var("DAILY_INSPIRATION_INTERVAL_SECS", "86400");

    let config = BotConfig::load(None, None).unwrap();

    assert_eq!(config.bot_token(), "custom_token");
    assert_eq!(config.data_dir(), Path::new("/var/lib/churchbot"));
    assert_eq!(config.admin_ids(), &["42", "7", "99"]);
    assert_eq!(config.session().start_retries, 2);
    assert_eq!(config.retry_policy().backoff_base, Duration::from_secs(1));
    assert_eq!(config.session().conn_pool, 4);
    assert_eq!(
        config.session().proxy.as_deref(),
        Some("http://127.0.0.1:8080")
    );
    assert!(!config.features().quiz);
    assert!(config.features().translation);
    assert_eq!(
        config.features().daily_inspiration_interval(),
        Some(Duration::from_secs(86400))
    );
    assert!(config.validate().is_ok());

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_take_precedence() {
    clear_env();
    env::set_var("BOT_TOKEN", "env_token");
    env::set_var("DATA_DIR", "env_data");

    let config = BotConfig::load(Some("cli_token".to_string()), Some("cli_data".into())).unwrap();

    assert_eq!(config.bot_token(), "cli_token");
    assert_eq!(config.data_dir(), Path::new("cli_data"));

    clear_env();
}

#[test]
#[serial]
fn test_missing_token_is_an_error() {
    clear_env();

    let err = BotConfig::load(None, None).unwrap_err();
    assert!(err.to_string().contains("BOT_TOKEN"));
}

#[test]
#[serial]
fn test_unparseable_numbers_fall_back_to_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("BOT_START_RETRIES", "many");
    env::set_var("TG_READ_TIMEOUT", "-3");
    env::set_var("DAILY_INSPIRATION_INTERVAL_SECS", "soon");

    let config = BotConfig::load(None, None).unwrap();

    assert_eq!(config.session().start_retries, 6);
    assert_eq!(config.session().read_timeout_secs, 20);
    assert!(config.features().daily_inspiration_interval_secs.is_none());

    clear_env();
}

#[test]
#[serial]
fn test_telegram_api_url_fallback() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("TELOXIDE_API_URL", "http://localhost:8081");

    let config = BotConfig::load(None, None).unwrap();
    assert_eq!(config.telegram_api_url(), Some("http://localhost:8081"));

    env::set_var("TELEGRAM_API_URL", "http://localhost:9000");
    let config = BotConfig::load(None, None).unwrap();
    assert_eq!(config.telegram_api_url(), Some("http://localhost:9000"));

    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_bad_urls() {
    clear_env();
    let mut config = BotConfig::with_token("t", "data");
    config.base.telegram_api_url = Some("not a url".to_string());
    assert!(config.validate().is_err());

    let mut config = BotConfig::with_token("t", "data");
    config.base.translate_api_url = Some("::".to_string());
    assert!(config.validate().is_err());

    let mut config = BotConfig::with_token("  ", "data");
    config.base.telegram_api_url = None;
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn test_request_timeout_must_exceed_long_poll() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("TG_READ_TIMEOUT", "3");
    env::set_var("TG_WRITE_TIMEOUT", "3");
    let config = BotConfig::load(None, None).unwrap();
    assert_eq!(config.session().request_timeout(), Duration::from_secs(6));
    assert!(config.validate().is_err());

    env::set_var("TG_WRITE_TIMEOUT", "7");
    let config = BotConfig::load(None, None).unwrap();
    assert_eq!(config.session().request_timeout(), crate::config::LONG_POLL_TIMEOUT);
    assert!(config.validate().is_err());

    env::set_var("TG_WRITE_TIMEOUT", "8");
    let config = BotConfig::load(None, None).unwrap();
    assert!(config.validate().is_ok());

    assert!(BotConfig::with_token("t", "data").validate().is_ok());
    clear_env();
}

#[test]
#[serial]
fn test_scheduler_off_disables_inspiration() {
    clear_env();
    let mut config = BotConfig::with_token("t", "data");
    config.features.daily_inspiration_interval_secs = Some(60);
    assert_eq!(
        config.features().daily_inspiration_interval(),
        Some(Duration::from_secs(60))
    );

    config.features.scheduler = false;
    assert!(config.features().daily_inspiration_interval().is_none());

    config.features.scheduler = true;
    config.features.broadcast = false;
    assert!(config.features().daily_inspiration_interval().is_none());
}
