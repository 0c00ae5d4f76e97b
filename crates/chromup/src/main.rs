use anyhow::Result;
use clap::Parser;

use crate::cli::{App, Commands};
use crate::config::{ConfigStore, Dirs};

mod cli;
mod config;
mod distribution;
mod launch;
mod ui;
mod update;

fn main() -> Result<()> {
    let argv = cli::with_default_command(std::env::args().collect());
    let app = App::parse_from(argv);

    let store = ConfigStore::load_or_init()?;
    init_tracing(store.config().debug);
    if store.was_initialized() {
        tracing::info!(path = %store.path().display(), "wrote default configuration");
    }

    let dirs = Dirs::resolve(store.config())?;
    dirs.ensure()?;
    tracing::debug!(exe_dir = %dirs.exe_dir.display(), "resolved working directories");

    match app.cmd {
        Commands::Run(run) => {
            launch::run_launch(store.config(), &dirs, &run.args)?;
            if store.config().pause_after_run {
                chromup_platform::pause::wait_for_key()?;
            }
        }
        Commands::Update => update::run_update_command(store, &dirs)?,
    }
    Ok(())
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if debug { "chromup=debug" } else { "chromup=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
