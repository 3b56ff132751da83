//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "churchbot")]
#[command(about = "Church community Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; flags override BOT_TOKEN and DATA_DIR).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Create the data directory and its initial JSON files.
    Init {
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

/// Load BotConfig from environment. `token` overrides BOT_TOKEN and `data_dir` overrides DATA_DIR.
pub fn load_config(token: Option<String>, data_dir: Option<PathBuf>) -> Result<BotConfig> {
    BotConfig::load(token, data_dir)
}
