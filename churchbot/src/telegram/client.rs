//! Builds the teloxide Bot with the configured timeouts, connection pool, proxy and API URL.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::BotConfig;

pub fn build_teloxide_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    let session = config.session();
    let mut builder = teloxide::net::default_reqwest_settings()
        .connect_timeout(session.connect_timeout())
        .timeout(session.request_timeout())
        .pool_max_idle_per_host(session.conn_pool);

    if let Some(ref proxy) = session.proxy {
        let proxy = reqwest::Proxy::all(proxy.as_str())
            .with_context(|| format!("Invalid proxy URL: {}", proxy))?;
        builder = builder.proxy(proxy);
        info!("Using proxy for Telegram API");
    }

    let client = builder.build().context("Failed to build Telegram HTTP client")?;
    let bot = teloxide::Bot::with_client(config.bot_token(), client);

    let bot = match config.telegram_api_url() {
        Some(url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
            info!(api_url = %url_str, "Using custom Telegram API URL");
            bot.set_api_url(url)
        }
        None => bot,
    };
    Ok(bot)
}
