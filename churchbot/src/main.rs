//! churchbot binary.

use anyhow::Result;
use churchbot::{init_data, load_config, run_bot, Cli, Commands};
use churchbot_core::init_stdout_tracing;
use clap::Parser;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, data_dir } => {
            let config = load_config(token, data_dir)?;
            let exit = run_bot(config).await?;
            std::process::exit(exit.exit_code());
        }
        Commands::Init { data_dir } => {
            let debug = std::env::var("CHURCHBOT_DEBUG").map(|v| v == "1").unwrap_or(false);
            init_stdout_tracing(debug)?;
            let data_dir = data_dir
                .or_else(|| std::env::var("DATA_DIR").ok().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("data"));
            init_data(&data_dir).await?;
            println!("Initialized {}", data_dir.display());
            Ok(())
        }
    }
}
