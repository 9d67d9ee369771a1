use clap::Parser;
use payrail::cli::dispatcher::Dispatcher;
use payrail::cli::main_types::Cli;
use payrail::error::{AppError, ErrorSeverity};
use payrail::storage::config::Settings;
use payrail::utils::logging;
use std::path::PathBuf;

fn report(err: &AppError) {
    eprintln!("Error: {}", err);
    if let Some(hint) = err.troubleshooting_hint() {
        eprintln!("Hint: {}", hint);
    }
    if matches!(err.severity(), ErrorSeverity::Critical | ErrorSeverity::High) {
        tracing::debug!("{:?}", err);
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));
    if let Some(config_dir) = &cli.config_dir {
        tracing::debug!("Using config directory: {}", config_dir);
    }

    let settings = match Settings::load(config_path.clone()) {
        Ok(settings) => settings,
        Err(err) => {
            report(&AppError::Storage(err));
            std::process::exit(1);
        }
    };

    let mut dispatcher = Dispatcher::new(settings, config_path, cli.profile, cli.tenant);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        report(&e);
        std::process::exit(1);
    }
}
