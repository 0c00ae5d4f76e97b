use clap::{Args, Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[command(
    name = "chromup",
    version = env!("CARGO_PKG_VERSION"),
    about = "Launcher and updater for de-googled Chromium builds",
    propagate_version = true
)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Launch the installed browser, forwarding file and URL arguments.
    #[command(alias = "r", name = "run")]
    Run(RunArgs),

    /// Download and install the latest release of the configured
    /// distribution.
    #[command(alias = "up", name = "update")]
    Update,
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Files to open or URLs to visit.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// The launcher doubles as a file/URL handler: invoked without a known
/// subcommand, every argument is forwarded to `run`, so `chromup page.html`
/// and plain `chromup` both work from shell associations.
pub fn with_default_command(mut argv: Vec<String>) -> Vec<String> {
    const KNOWN: &[&str] = &[
        "run", "r", "update", "up", "help", "--help", "-h", "--version", "-V",
    ];
    let has_command = argv.get(1).is_some_and(|a| KNOWN.contains(&a.as_str()));
    if !has_command {
        argv.insert(1, "run".to_string());
    }
    argv
}
