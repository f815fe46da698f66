use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::sync::Arc;

use triagem::configuration::config::Config;
use triagem::sessions::expiry::Reaper;
use triagem::sessions::sqlite_directory::SqliteDirectory;
use triagem::store::submission_store::SubmissionStore;

#[derive(Parser)]
#[command(name = "triagem")]
#[command(version = "0.1.0")]
#[command(about = "Time-boxed crime-report intake and triage daemon")]
struct Args {
    config_file: String,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    println!(
        "
==============================================================================
          triagem — plantão de registro de ocorrências v0.1.0
==============================================================================
"
    );

    let args = Args::parse();

    info!("Importing configuration");
    let config = match Config::from_file(Path::new(args.config_file.as_str())) {
        Ok(config) => config,
        Err(e) => {
            error!("Unable to import configuration from file: {}", e);
            std::process::exit(1);
        }
    };
    info!("Configuration imported successfully");

    let directory = match SqliteDirectory::connect(&config.database_path).await {
        Ok(directory) => Arc::new(directory),
        Err(e) => {
            error!("Unable to open the session directory: {}, exiting...", e);
            std::process::exit(1);
        }
    };

    let store = Arc::new(SubmissionStore::new());
    let handle = Reaper::new(store.clone(), directory.clone(), config.reap_interval()).spawn();
    info!(
        "Session expiry reaper running every {}s",
        config.reap_interval_secs
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for the shutdown signal: {}", e);
    }
    info!("Shutting down");
    handle.stop().await;
}
