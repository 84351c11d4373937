//! Main app runner

use std::path::PathBuf;
use std::process::ExitCode;

use crate::application::WeatherEngine;
use crate::application::ports::ConfigStore;
use crate::infrastructure::{FileConfigStore, LoggingNodeGraphWriter, OpenWeatherClient};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Startup options resolved from the CLI
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_path: Option<PathBuf>,
    pub poll: bool,
    pub linked: bool,
}

/// Build a config store for the given path, or the XDG default
pub fn build_store(config_path: Option<&PathBuf>) -> FileConfigStore {
    match config_path {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    }
}

/// Run the synchronization engine until interrupted
pub async fn run(options: RunOptions) -> ExitCode {
    let store = build_store(options.config_path.as_ref());

    let config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {e}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    log::info!(
        "Engine initialized with city id {}, poll interval {}s, auto update {}",
        config.city_id,
        config.update_interval,
        config.auto_updating
    );

    let auto_updating = config.auto_updating;
    let engine = WeatherEngine::new(
        OpenWeatherClient::new(),
        LoggingNodeGraphWriter::new(),
        store,
        config,
    );

    // Stand-in for the connected front-end: every published event is logged
    let subscription = engine
        .bus()
        .subscribe(|event| log::debug!("emit {}: {:?}", event.name(), event));

    if options.linked {
        engine.change_linked(true).await;
    }

    if auto_updating || options.poll {
        engine.start_polling();
    } else {
        log::info!("Auto update disabled, waiting for start command");
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        engine.stop_polling();
        return ExitCode::from(EXIT_ERROR);
    }

    // Session teardown: stop the scheduler, flush pending config changes,
    // and detach the client subscription
    log::info!("Shutting down");
    engine.stop_polling();
    engine.persist().await;
    engine.bus().unsubscribe(subscription);

    ExitCode::from(EXIT_SUCCESS)
}
