//! Process entry point for the profile directory.
//!
//! # Responsibility
//! - Load configuration, start logging and open the persisted store.
//! - Run the controller's initial load and print the directory.

use log::{error, info};
use profiles_core::{
    init_logging, AppConfig, AppController, LatencyProfile, LogSettings, ProfileService,
    ProfileStore, SqliteSnapshotRepository,
};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Start the logger first so config fallbacks are recorded.
    let log = LogSettings::from_env();
    if let Some(log_dir) = &log.dir {
        if let Err(err) = init_logging(&log.level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }
    let config = AppConfig::from_env();

    let repo = match SqliteSnapshotRepository::open(&config.db_path) {
        Ok(repo) => repo,
        Err(err) => {
            error!(
                "event=cli_start module=cli status=error path={} error={}",
                config.db_path.display(),
                err
            );
            eprintln!("cannot open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };
    info!(
        "event=cli_start module=cli status=ok port={} path={}",
        config.port,
        config.db_path.display()
    );

    let latency = if config.simulate_latency {
        LatencyProfile::default()
    } else {
        LatencyProfile::none()
    };
    let store = Arc::new(ProfileStore::open(repo));
    let service = Arc::new(ProfileService::with_latency(store, latency));
    let controller = AppController::new(service);

    controller.load_profiles().await;
    let state = controller.snapshot();

    println!("profiles_core version={}", profiles_core::core_version());
    println!("profiles={}", state.filtered_profiles.len());
    for profile in &state.filtered_profiles {
        println!(
            "{}\t{}\t{}\t{}",
            profile.id,
            profile.full_name,
            profile.email,
            profile.location.as_deref().unwrap_or("-")
        );
    }
    for notification in state.notifications.items() {
        eprintln!("{:?}: {}", notification.kind, notification.message);
    }

    ExitCode::SUCCESS
}
