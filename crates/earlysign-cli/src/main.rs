use clap::Parser;
use eyre::Result;

use earlysign_cli::cli::Cli;
use earlysign_cli::commands;
use earlysign_cli::config::{self, LogFormat};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let loaded = config::load_or_default()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match loaded.config.log_format {
        LogFormat::Pretty => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    tracing::debug!(
        path = %loaded.path.display(),
        source = ?loaded.source,
        config_version = loaded.config.config_version,
        "config loaded"
    );

    commands::run(cli, loaded)
}
