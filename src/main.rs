use anyhow::Result;
use clap::Parser;
use post_stamp::config::Config;
use post_stamp::monitor::{Monitor, Schedule};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::Level;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// Stamp the edit time into a post's front matter whenever its content changes
#[derive(Debug, Parser)]
#[command(name = "post-stamp", version, long_version = LONG_VERSION, about)]
struct Cli {
    /// Directory to watch (default: _posts)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Delay between scans in milliseconds (default: 1000)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Recognized document extension, repeatable (default: md, markdown)
    #[arg(long = "extension")]
    extensions: Vec<String>,

    /// Configuration file to load instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug details such as the timestamp breakdown
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(root) = &self.root {
            config.watch.root = root.clone();
        }
        if let Some(interval_ms) = self.interval_ms {
            config.watch.interval_ms = interval_ms;
        }
        if !self.extensions.is_empty() {
            config.watch.extensions = self.extensions.clone();
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let mut monitor = Monitor::from_config(&config)?;

    let shutdown = CancellationToken::new();
    let schedule = Schedule::new(config.watch.interval(), shutdown.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });

    tracing::info!("Monitoring {} for changes...", config.watch.root.display());
    tracing::info!("Press Ctrl+C to exit");

    monitor.run(&schedule).await?;

    tracing::info!("Exiting...");
    Ok(())
}
