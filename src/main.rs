//! Weather Control CLI entry point

use std::process::ExitCode;

use clap::Parser;

use weather_control::cli::{
    app::{build_store, run, RunOptions, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let cli = Cli::parse();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = build_store(cli.config.as_ref());
        if let Err(e) = handle_config_command(action, &store).await {
            log::error!("{e}");
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    run(RunOptions {
        config_path: cli.config,
        poll: cli.poll,
        linked: cli.linked,
    })
    .await
}
