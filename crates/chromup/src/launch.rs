//! Browser launch: argument assembly, detached spawn, window focus.

use chromup_platform::{Command, focus};

use crate::config::{Config, Dirs};

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("cannot resolve '{arg}' to an absolute path: {source}")]
    BadArgument {
        arg: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Spawn(#[from] chromup_platform::Error),
}

/// Start the browser with the configured options plus caller arguments,
/// then try to surface its window. The child is not waited on.
pub fn run_launch(config: &Config, dirs: &Dirs, extra: &[String]) -> Result<(), LaunchError> {
    let exe = dirs.browser_exe();
    let arguments = build_arguments(config, dirs, extra)?;

    tracing::debug!(exe = %exe.display(), ?arguments, "starting browser");
    let pid = Command::new(&exe).args(&arguments).spawn_detached()?;
    tracing::info!(pid, "browser started");

    let title = config.distribution.window_title();
    if !focus::bring_to_front(title) {
        tracing::debug!(title, "no browser window found to focus");
    }
    Ok(())
}

/// Assemble the child argument list: configured switches split on spaces,
/// the profile directory, then the caller's normalized arguments.
///
/// The split is a plain space split; switches whose values contain spaces
/// are not supported in `command_line_options`.
pub fn build_arguments(
    config: &Config,
    dirs: &Dirs,
    extra: &[String],
) -> Result<Vec<String>, LaunchError> {
    let mut arguments: Vec<String> = config
        .command_line_options
        .split(' ')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    arguments.push(format!("--user-data-dir={}", dirs.profile.display()));

    for arg in extra {
        arguments.push(normalize_argument(arg)?);
    }
    Ok(arguments)
}

/// URLs pass through untouched; anything else is treated as a file path and
/// made absolute so the browser resolves it regardless of its own working
/// directory.
fn normalize_argument(arg: &str) -> Result<String, LaunchError> {
    if arg.len() >= 4 && arg[..4].eq_ignore_ascii_case("http") {
        return Ok(arg.to_string());
    }
    let absolute = std::path::absolute(arg).map_err(|e| LaunchError::BadArgument {
        arg: arg.to_string(),
        source: e,
    })?;
    Ok(absolute.display().to_string())
}
