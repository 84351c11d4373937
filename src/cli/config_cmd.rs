//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;

use super::args::ConfigAction;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => {
            store.init().await?;
            println!("Config file created at: {}", store.path().display());
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", store.path().display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = store.load().await?;
            let text = toml::to_string_pretty(&config)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
            print!("{text}");
            Ok(())
        }
    }
}
