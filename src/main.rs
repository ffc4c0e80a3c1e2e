use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use dtao_monitor::application::{install_shutdown_signal, Cli, MonitorService};
use dtao_monitor::infrastructure::{AfplaySoundAlerter, DesktopNotifier, HttpPriceSource, KeepAwake};
use dtao_monitor::shared::config::ConfigLoader;
use dtao_monitor::shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_telemetry(cli.json_logs);

    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("Configuration error in {}", cli.config.display()))?;

    // Signal handlers go in before the startup fetches
    let shutdown = install_shutdown_signal().context("Failed to install signal handlers")?;

    let source = HttpPriceSource::new(&config.endpoint, &config.network);
    info!("Using price feed {} (network: {})", config.endpoint, config.network);

    let sound = AfplaySoundAlerter::from_config(&config);
    sound.check_sound_files();
    let notifier = DesktopNotifier::from_config(&config);

    let mut service = MonitorService::build(config, Box::new(source), Arc::new(sound), Arc::new(notifier)).await;
    service.log_configuration();

    if cli.once {
        service.run_once().await;
        return Ok(());
    }

    let keep_awake = cli.keep_awake.then(KeepAwake::start);

    service.run(shutdown).await;

    if let Some(keep_awake) = keep_awake {
        keep_awake.stop().await;
    }
    info!("Stopping TAO price monitor");
    Ok(())
}
