use anyhow::Context;
use clap::Parser;
use pubwatch_core::{ConfigError, ConfigLoader, Settings};
use pubwatch_kupo::{KupoClient, KupoClientConfig};
use pubwatch_monitor::{FileCheckpointStore, Monitor, MonitorError, MonitorOptions, RunOutcome};
use pubwatch_validator::{ValidatorClient, ValidatorClientConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pubwatch")]
#[command(
    about = "Watch Orcfax CER feed publications and request any that are missing or stale",
    long_about = None
)]
struct Args {
    /// CER feed specification (JSON)
    #[arg(long, env = "PUBWATCH_FEEDS")]
    feeds: PathBuf,

    /// Use a plaintext websocket for the republish request
    #[arg(long)]
    local: bool,

    /// Config file path
    #[arg(short, long, default_value = pubwatch_core::config_loader::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Append logs to this file as well as stderr
    #[arg(long, default_value = "monitor.log", conflicts_with = "no_log_file")]
    log_file: PathBuf,

    /// Only log to stderr
    #[arg(long)]
    no_log_file: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let log_file = (!args.no_log_file).then_some(args.log_file.as_path());
    if let Err(e) = init_logging(log_file) {
        eprintln!("failed to initialise logging: {e:#}");
        return ExitCode::FAILURE;
    }

    let settings = match ConfigLoader::load_from(&args.config).and_then(|c| c.validate()) {
        Ok(settings) => settings,
        Err(ConfigError::MisconfiguredEndpoint { key, reason, hint }) => {
            error!(key, reason = %reason, "misconfigured: {hint}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!(error = %e, config = %args.config.display(), "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(&args, settings).await {
        Ok(RunOutcome::UpToDate) => ExitCode::SUCCESS,
        Ok(RunOutcome::Requested { feeds, delivered }) => {
            info!(count = feeds.len(), delivered, "run complete");
            ExitCode::SUCCESS
        }
        Err(e) => match e.downcast_ref::<MonitorError>() {
            Some(stale) if stale.is_stale() => {
                info!("{stale}");
                ExitCode::SUCCESS
            }
            _ => {
                error!("{e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Sends logs to stderr and, when `file` is given, appends them there too.
fn init_logging(file: Option<&std::path::Path>) -> anyhow::Result<()> {
    let file_layer = match file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(())
}

async fn run(args: &Args, settings: Settings) -> anyhow::Result<RunOutcome> {
    let indexer = KupoClient::new(KupoClientConfig::from_settings(
        settings.indexer_url.as_str(),
        &settings.app.indexer,
    ))
    .context("building indexer client")?;

    let republisher = ValidatorClient::new(
        ValidatorClientConfig::from_settings(
            settings.validation_url.clone(),
            &settings.app.validator,
        )
        .with_local(args.local),
    )
    .context("building validator client")?;
    info!(
        indexer = %settings.indexer_url,
        validator = %republisher.endpoint(),
        local = args.local,
        "starting publication watch"
    );

    let checkpoint = FileCheckpointStore::new(settings.checkpoint_path.clone());
    let options = MonitorOptions::from_settings(args.feeds.clone(), &settings);

    let monitor = Monitor::new(indexer, republisher, checkpoint, options);
    let outcome = monitor.run().await?;
    Ok(outcome)
}
