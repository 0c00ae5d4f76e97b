//! The update sequence: fetch release metadata, compare versions, download
//! the asset, extract it into the bin directory, record the new version.
//!
//! The installed version advances only after extraction has fully
//! succeeded, so a failed update leaves the previous record intact and the
//! flow can simply be re-run.

use std::path::Path;
use std::sync::Arc;

use chromup_archive::{ExtractOptions, ExtractReport, extract_archive};
use chromup_github::{Release, ReleaseClient};

use crate::config::{ConfigError, ConfigStore, Dirs};
use crate::ui;

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error(transparent)]
    Feed(#[from] chromup_github::Error),

    #[error(transparent)]
    Extract(#[from] chromup_archive::Error),

    #[error("failed to record installed version: {0}")]
    Persist(#[from] ConfigError),

    #[error("download URL '{url}' has no file name")]
    BadDownloadUrl { url: String },
}

/// Where release metadata and asset bytes come from. The GitHub client is
/// the production implementation; tests substitute local fixtures.
pub trait ReleaseSource {
    fn latest_release(&self) -> Result<Release, chromup_github::Error>;

    fn download(
        &self,
        url: &str,
        dest: &Path,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<u64, chromup_github::Error>;
}

pub struct GithubSource {
    client: ReleaseClient,
    feed_url: &'static str,
}

impl GithubSource {
    pub fn new(feed_url: &'static str) -> Result<Self, chromup_github::Error> {
        Ok(Self {
            client: ReleaseClient::new()?,
            feed_url,
        })
    }
}

impl ReleaseSource for GithubSource {
    fn latest_release(&self) -> Result<Release, chromup_github::Error> {
        self.client.latest_release(self.feed_url)
    }

    fn download(
        &self,
        url: &str,
        dest: &Path,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<u64, chromup_github::Error> {
        self.client.download(url, dest, on_progress)
    }
}

#[derive(Debug)]
pub enum UpdateOutcome {
    UpToDate {
        version: String,
    },
    Updated {
        from: String,
        to: String,
        report: ExtractReport,
    },
}

/// Run the update sequence against `source`, extracting into `dirs.bin`.
pub fn run_update<S: ReleaseSource>(
    source: &S,
    store: &mut ConfigStore,
    dirs: &Dirs,
) -> Result<UpdateOutcome, UpdateError> {
    let distribution = store.config().distribution;
    let installed = store.config().installed_version.clone();

    let release = source.latest_release()?;

    if installed == release.tag_name {
        tracing::info!(version = %release.tag_name, "already on the latest release");
        return Ok(UpdateOutcome::UpToDate {
            version: release.tag_name,
        });
    }

    tracing::info!(
        %distribution,
        installed = %installed,
        latest = %release.tag_name,
        "updating to latest release"
    );

    let asset = release.asset_ending_with(distribution.asset_suffix())?;
    tracing::debug!(asset = %asset.name, "selected release asset");

    let archive_path = dirs
        .download
        .join(file_name_of(&asset.browser_download_url)?);

    let bar = ui::byte_bar("downloading");
    let mut on_progress = |done: u64, total: Option<u64>| {
        if let Some(total) = total {
            bar.set_length(total);
        }
        bar.set_position(done);
    };
    source.download(&asset.browser_download_url, &archive_path, &mut on_progress)?;
    bar.finish_and_clear();

    tracing::info!(
        archive = %archive_path.display(),
        dest = %dirs.bin.display(),
        "extracting"
    );
    let report = extract_into(&archive_path, &dirs.bin)?;
    if report.skipped > 0 {
        tracing::warn!(skipped = report.skipped, "some entries were not extracted");
    }

    store.set_installed_version(&release.tag_name)?;
    tracing::info!(
        version = %release.tag_name,
        files = report.files_written,
        "update complete"
    );

    Ok(UpdateOutcome::Updated {
        from: installed,
        to: release.tag_name,
        report,
    })
}

/// Update against the configured distribution's live feed and report to the
/// terminal.
pub fn run_update_command(mut store: ConfigStore, dirs: &Dirs) -> anyhow::Result<()> {
    let source = GithubSource::new(store.config().distribution.feed_url())?;

    match run_update(&source, &mut store, dirs)? {
        UpdateOutcome::UpToDate { version } => {
            println!("Already up to date (version {version}).");
        }
        UpdateOutcome::Updated { from, to, report } => {
            let from = if from.is_empty() {
                "nothing".to_string()
            } else {
                from
            };
            println!(
                "{} {} -> {} ({} files)",
                console::style("Updated").green().bold(),
                from,
                to,
                report.files_written
            );
        }
    }

    if store.config().pause_on_update {
        chromup_platform::pause::wait_for_key()?;
    }
    Ok(())
}

fn extract_into(archive: &Path, dest: &Path) -> Result<ExtractReport, chromup_archive::Error> {
    let bar = ui::count_bar("extracting");
    let bar_in_cb = bar.clone();
    let options = ExtractOptions::default().on_progress(Arc::new(move |done, total| {
        bar_in_cb.set_length(total as u64);
        bar_in_cb.set_position(done as u64);
    }));

    let report = extract_archive(archive, dest, &options);
    bar.finish_and_clear();
    report
}

fn file_name_of(url: &str) -> Result<&str, UpdateError> {
    url.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| UpdateError::BadDownloadUrl {
            url: url.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    use chromup_github::Asset;

    use super::*;
    use crate::config::CONFIG_FILE;

    /// Serves a canned release document and copies a local payload file in
    /// place of a network download.
    struct StubSource {
        release: Release,
        payload: PathBuf,
    }

    impl ReleaseSource for StubSource {
        fn latest_release(&self) -> Result<Release, chromup_github::Error> {
            Ok(self.release.clone())
        }

        fn download(
            &self,
            _url: &str,
            dest: &Path,
            on_progress: &mut dyn FnMut(u64, Option<u64>),
        ) -> Result<u64, chromup_github::Error> {
            let bytes = fs::copy(&self.payload, dest).map_err(|e| chromup_github::Error::Io {
                path: dest.to_path_buf(),
                source: e,
            })?;
            on_progress(bytes, Some(bytes));
            Ok(bytes)
        }
    }

    fn release(tag: &str, asset_name: &str) -> Release {
        Release {
            tag_name: tag.to_string(),
            assets: vec![
                Asset {
                    name: "other_linux.tar.xz".to_string(),
                    browser_download_url: "https://example.com/dl/other_linux.tar.xz".to_string(),
                },
                Asset {
                    name: asset_name.to_string(),
                    browser_download_url: format!("https://example.com/dl/{asset_name}"),
                },
            ],
        }
    }

    fn write_payload_zip(path: &Path) {
        let file = fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("chromium-100.0/chrome.exe", options).unwrap();
        writer.write_all(b"browser bytes").unwrap();
        writer.start_file("chromium-100.0/v8_context_snapshot.bin", options).unwrap();
        writer.write_all(b"snapshot").unwrap();
        writer.finish().unwrap();
    }

    fn store_with_version(dir: &Path, version: &str) -> ConfigStore {
        let mut store = ConfigStore::load_or_init_at(dir.join(CONFIG_FILE)).unwrap();
        if !version.is_empty() {
            store.set_installed_version(version).unwrap();
        }
        store
    }

    #[test]
    fn equal_versions_touch_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_with_version(temp.path(), "100.0");
        let dirs = Dirs::rooted_at(temp.path().join("app"), store.config());
        dirs.ensure().unwrap();

        let source = StubSource {
            release: release("100.0", "chromium_100.0_windows-x64.zip"),
            payload: temp.path().join("does-not-exist.zip"),
        };

        let outcome = run_update(&source, &mut store, &dirs).unwrap();
        assert!(matches!(outcome, UpdateOutcome::UpToDate { ref version } if version == "100.0"));

        assert!(fs::read_dir(&dirs.download).unwrap().next().is_none());
        assert!(fs::read_dir(&dirs.bin).unwrap().next().is_none());
        assert_eq!(store.config().installed_version, "100.0");
    }

    #[test]
    fn newer_release_downloads_extracts_and_persists() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_with_version(temp.path(), "99.0");
        let dirs = Dirs::rooted_at(temp.path().join("app"), store.config());
        dirs.ensure().unwrap();

        let payload = temp.path().join("payload.zip");
        write_payload_zip(&payload);

        let source = StubSource {
            release: release("100.0", "chromium_100.0_windows-x64.zip"),
            payload,
        };

        let outcome = run_update(&source, &mut store, &dirs).unwrap();
        match outcome {
            UpdateOutcome::Updated { from, to, report } => {
                assert_eq!(from, "99.0");
                assert_eq!(to, "100.0");
                assert_eq!(report.files_written, 2);
                assert_eq!(report.skipped, 0);
            }
            other => panic!("expected update, got {other:?}"),
        }

        // Wrapper stripped, payload in the bin directory.
        assert_eq!(fs::read(dirs.bin.join("chrome.exe")).unwrap(), b"browser bytes");
        // The downloaded archive stays in the download directory.
        assert!(dirs.download.join("chromium_100.0_windows-x64.zip").exists());

        // The new version is on disk, not just in memory.
        let reloaded = ConfigStore::load_or_init_at(temp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(reloaded.config().installed_version, "100.0");
    }

    #[test]
    fn failed_extraction_keeps_old_version() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_with_version(temp.path(), "99.0");
        let dirs = Dirs::rooted_at(temp.path().join("app"), store.config());
        dirs.ensure().unwrap();

        // Not an archive at all.
        let payload = temp.path().join("payload.zip");
        fs::write(&payload, b"this is no zip").unwrap();

        let source = StubSource {
            release: release("100.0", "chromium_100.0_windows-x64.zip"),
            payload,
        };

        let result = run_update(&source, &mut store, &dirs);
        assert!(matches!(result, Err(UpdateError::Extract(_))));

        let reloaded = ConfigStore::load_or_init_at(temp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(reloaded.config().installed_version, "99.0");

        // The broken download is left behind for inspection.
        assert!(dirs.download.join("chromium_100.0_windows-x64.zip").exists());
    }

    #[test]
    fn missing_asset_aborts_before_download() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_with_version(temp.path(), "99.0");
        let dirs = Dirs::rooted_at(temp.path().join("app"), store.config());
        dirs.ensure().unwrap();

        let source = StubSource {
            release: release("100.0", "chromium_100.0_linux.tar.xz"),
            payload: temp.path().join("unused.zip"),
        };

        let result = run_update(&source, &mut store, &dirs);
        assert!(matches!(
            result,
            Err(UpdateError::Feed(chromup_github::Error::AssetNotFound { .. }))
        ));
        assert!(fs::read_dir(&dirs.download).unwrap().next().is_none());
        assert_eq!(store.config().installed_version, "99.0");
    }

    #[test]
    fn download_file_name_comes_from_url() {
        assert_eq!(
            file_name_of("https://example.com/a/b/asset.zip").unwrap(),
            "asset.zip"
        );
        assert!(matches!(
            file_name_of("https://example.com/a/b/"),
            Err(UpdateError::BadDownloadUrl { .. })
        ));
    }
}
