//! Launcher configuration and working directories.
//!
//! A single TOML file in the user's home directory holds every setting,
//! including the installed-version record the updater maintains. The store
//! is constructed once in `main` and passed by reference; nothing reads
//! configuration ambiently.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;

pub const CONFIG_FILE: &str = ".chromup.toml";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub debug: bool,
    pub pause_after_run: bool,
    pub pause_on_update: bool,
    pub distribution: Distribution,
    /// Release tag of the currently extracted browser; empty before the
    /// first update.
    pub installed_version: String,
    /// Extra browser switches, split on spaces at launch.
    pub command_line_options: String,
    /// Resolved relative to the launcher executable's directory.
    pub bin_directory: PathBuf,
    pub download_directory: PathBuf,
    pub profile_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            pause_after_run: false,
            pause_on_update: false,
            distribution: Distribution::Chromium,
            installed_version: String::new(),
            command_line_options: "--no-default-browser-check".to_string(),
            bin_directory: PathBuf::from("bin"),
            download_directory: PathBuf::from("download"),
            profile_directory: PathBuf::from("profile"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot locate a home directory for the configuration file")]
    NoHome,

    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid configuration in '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to encode configuration: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot determine the launcher executable's directory: {source}")]
    ExeDir { source: io::Error },
}

/// The configuration file plus its parsed contents.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
    created: bool,
}

impl ConfigStore {
    /// Load `~/.chromup.toml`, writing the defaults out on first run.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = home::home_dir().ok_or(ConfigError::NoHome)?;
        Self::load_or_init_at(home.join(CONFIG_FILE))
    }

    pub fn load_or_init_at(path: PathBuf) -> Result<Self, ConfigError> {
        if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
                path: path.clone(),
                source: e,
            })?;
            let config = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            Ok(Self {
                path,
                config,
                created: false,
            })
        } else {
            let store = Self {
                path,
                config: Config::default(),
                created: true,
            };
            store.save()?;
            Ok(store)
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this load wrote a fresh default configuration file.
    pub fn was_initialized(&self) -> bool {
        self.created
    }

    /// Record a newly installed version. This is the update's commit point:
    /// it runs only after extraction has fully succeeded.
    pub fn set_installed_version(&mut self, version: &str) -> Result<(), ConfigError> {
        self.config.installed_version = version.to_string();
        self.save()
    }

    fn save(&self) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(&self.config)?;
        fs::write(&self.path, raw).map_err(|e| ConfigError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Working directories, resolved relative to the launcher executable so the
/// whole installation stays portable.
#[derive(Clone, Debug)]
pub struct Dirs {
    pub exe_dir: PathBuf,
    pub bin: PathBuf,
    pub download: PathBuf,
    pub profile: PathBuf,
}

impl Dirs {
    pub fn resolve(config: &Config) -> Result<Self, ConfigError> {
        let exe = env::current_exe().map_err(|e| ConfigError::ExeDir { source: e })?;
        let exe_dir = exe.parent().unwrap_or(Path::new(".")).to_path_buf();
        Ok(Self::rooted_at(exe_dir, config))
    }

    pub fn rooted_at(exe_dir: PathBuf, config: &Config) -> Self {
        Self {
            bin: exe_dir.join(&config.bin_directory),
            download: exe_dir.join(&config.download_directory),
            profile: exe_dir.join(&config.profile_directory),
            exe_dir,
        }
    }

    /// Create any missing working directory.
    pub fn ensure(&self) -> Result<(), ConfigError> {
        for dir in [&self.bin, &self.download, &self.profile] {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| ConfigError::Write {
                    path: dir.clone(),
                    source: e,
                })?;
            }
        }
        Ok(())
    }

    /// Full path of the browser executable inside the bin directory.
    pub fn browser_exe(&self) -> PathBuf {
        #[cfg(windows)]
        {
            self.bin.join("chrome.exe")
        }
        #[cfg(not(windows))]
        {
            self.bin.join("chrome")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.distribution, Distribution::Chromium);
        assert_eq!(config.installed_version, "");
        assert_eq!(config.bin_directory, PathBuf::from("bin"));
        assert!(!config.debug);
        assert!(config.command_line_options.contains("--no-default-browser-check"));
    }

    #[test]
    fn first_run_writes_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE);

        let store = ConfigStore::load_or_init_at(path.clone()).unwrap();
        assert!(path.exists());
        assert!(store.was_initialized());
        assert_eq!(store.config().installed_version, "");

        // A second load parses what the first one wrote.
        let reloaded = ConfigStore::load_or_init_at(path).unwrap();
        assert!(!reloaded.was_initialized());
        assert_eq!(reloaded.config().distribution, Distribution::Chromium);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "distribution = \"cromite\"\ninstalled_version = \"100.0\"\n").unwrap();

        let store = ConfigStore::load_or_init_at(path).unwrap();
        assert_eq!(store.config().distribution, Distribution::Cromite);
        assert_eq!(store.config().installed_version, "100.0");
        assert_eq!(store.config().profile_directory, PathBuf::from("profile"));
    }

    #[test]
    fn set_installed_version_persists() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE);

        let mut store = ConfigStore::load_or_init_at(path.clone()).unwrap();
        store.set_installed_version("101.0.4951.41").unwrap();

        let reloaded = ConfigStore::load_or_init_at(path).unwrap();
        assert_eq!(reloaded.config().installed_version, "101.0.4951.41");
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "debug = \"not a bool\"").unwrap();

        let result = ConfigStore::load_or_init_at(path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn dirs_resolve_relative_to_exe_dir() {
        let config = Config::default();
        let dirs = Dirs::rooted_at(PathBuf::from("/opt/chromup"), &config);
        assert_eq!(dirs.bin, PathBuf::from("/opt/chromup/bin"));
        assert_eq!(dirs.download, PathBuf::from("/opt/chromup/download"));
        assert_eq!(dirs.profile, PathBuf::from("/opt/chromup/profile"));
    }

    #[test]
    fn ensure_creates_missing_directories() {
        let temp = tempfile::tempdir().unwrap();
        let dirs = Dirs::rooted_at(temp.path().join("app"), &Config::default());
        dirs.ensure().unwrap();
        assert!(dirs.bin.is_dir());
        assert!(dirs.download.is_dir());
        assert!(dirs.profile.is_dir());
        // Idempotent.
        dirs.ensure().unwrap();
    }
}
