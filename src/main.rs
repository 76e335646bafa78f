mod core;
mod reveal;
mod scope;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use crate::core::config::{CliOverrides, MarvinConfig, load_config, resolve};

#[derive(Parser)]
#[command(name = "marvin", about = "Turn a project brief into a four-part scope")]
struct Args {
    /// Override the chat model
    #[arg(short, long)]
    model: Option<String>,

    /// Override the provider base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Skip the thinking-floor delay and show results as soon as they arrive
    #[arg(long)]
    instant: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to marvin.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("marvin.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("warning: {e}; falling back to defaults");
            log::warn!("Config load failed: {e}");
            MarvinConfig::default()
        }
    };
    let resolved = resolve(
        &config,
        &CliOverrides {
            model: args.model,
            base_url: args.base_url,
            instant: args.instant,
        },
    );

    log::info!("Marvin starting up with model: {}", resolved.model);

    tui::run(resolved)
}
