//! The extraction pipeline shared by all container formats.
//!
//! Per-format code only knows how to pull entries out of an open archive;
//! wrapper stripping, containment checks, and filesystem writes live here.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::format::ArchiveFormat;
use crate::sanitize::{resolve_under, strip_wrapper};

mod sevenz;
mod zip;

pub use sevenz::SevenZSource;
pub use zip::ZipSource;

/// An entry pulled from an archive, not yet written to disk.
pub struct PendingEntry {
    /// Path as stored in the archive, wrapper directory included.
    pub raw_path: PathBuf,
    pub size: u64,
    pub mode: Option<u32>,
    pub kind: PendingKind,
}

pub enum PendingKind {
    Directory,
    File(Box<dyn Read>),
}

/// Pull-based access to an open archive.
///
/// One implementation per container format; the pipeline itself never
/// branches on the format. The implementation owns the underlying reader
/// and releases it on drop.
pub trait EntrySource {
    fn next_entry(&mut self) -> Option<Result<PendingEntry>>;
    fn entry_count(&self) -> usize;
    fn format(&self) -> ArchiveFormat;
}

#[derive(Clone, Default)]
pub struct ExtractOptions {
    /// Called after each entry with (entries processed, total entries).
    pub on_progress: Option<Arc<dyn Fn(usize, usize) + Send + Sync>>,
}

impl ExtractOptions {
    pub fn on_progress(mut self, callback: Arc<dyn Fn(usize, usize) + Send + Sync>) -> Self {
        self.on_progress = Some(callback);
        self
    }
}

/// Outcome of a completed extraction.
#[derive(Clone, Debug)]
pub struct ExtractReport {
    pub format: ArchiveFormat,
    pub entries_processed: usize,
    pub files_written: usize,
    /// Entries whose content could not be read or written; extraction
    /// continued past them.
    pub skipped: usize,
    pub total_bytes: u64,
}

/// Open `archive_path` and extract it into `dest_root`, stripping the
/// top-level wrapper directory from every entry.
///
/// Unreadable entries are logged and counted as skipped. An entry that
/// would resolve outside `dest_root` aborts the whole extraction.
pub fn extract_archive(
    archive_path: &Path,
    dest_root: &Path,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    match ArchiveFormat::from_path(archive_path) {
        ArchiveFormat::Zip => {
            let mut source = ZipSource::open(archive_path)?;
            extract(&mut source, dest_root, options)
        }
        ArchiveFormat::SevenZ => {
            let mut source = SevenZSource::open(archive_path)?;
            extract(&mut source, dest_root, options)
        }
    }
}

/// Drain `source` into `dest_root`.
pub fn extract<S: EntrySource>(
    source: &mut S,
    dest_root: &Path,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    let entry_count = source.entry_count();
    let mut report = ExtractReport {
        format: source.format(),
        entries_processed: 0,
        files_written: 0,
        skipped: 0,
        total_bytes: 0,
    };

    while let Some(next) = source.next_entry() {
        report.entries_processed += 1;
        if let Some(ref callback) = options.on_progress {
            callback(report.entries_processed, entry_count);
        }

        let pending = match next {
            Ok(pending) => pending,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable archive entry");
                report.skipped += 1;
                continue;
            }
        };

        // The wrapper directory itself strips to nothing.
        let Some(relative) = strip_wrapper(&pending.raw_path) else {
            continue;
        };
        let out_path = resolve_under(dest_root, &relative)?;

        match pending.kind {
            PendingKind::Directory => {
                ensure_directory(&out_path)?;
            }
            PendingKind::File(mut reader) => {
                if let Some(parent) = out_path.parent() {
                    ensure_directory(parent)?;
                }
                match write_file(&mut reader, &out_path, pending.mode) {
                    Ok(bytes) => {
                        report.files_written += 1;
                        report.total_bytes += bytes;
                    }
                    Err(e) => {
                        tracing::warn!(
                            entry = %pending.raw_path.display(),
                            error = %e,
                            "failed to extract entry"
                        );
                        report.skipped += 1;
                    }
                }
            }
        }
    }

    Ok(report)
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::DirectoryCreation {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

fn write_file(reader: &mut dyn Read, out_path: &Path, mode: Option<u32>) -> io::Result<u64> {
    let mut file = File::create(out_path)?;
    let bytes = io::copy(reader, &mut file)?;
    drop(file);
    apply_mode(out_path, mode)?;
    Ok(bytes)
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn missing_archive_is_open_error() {
        let result = extract_archive(
            Path::new("/nonexistent/release.zip"),
            Path::new("/tmp"),
            &ExtractOptions::default(),
        );
        assert!(matches!(result, Err(Error::Open { .. })));
    }

    #[test]
    fn missing_seven_z_is_open_error() {
        let result = extract_archive(
            Path::new("/nonexistent/release.7z"),
            Path::new("/tmp"),
            &ExtractOptions::default(),
        );
        assert!(matches!(result, Err(Error::Open { .. })));
    }
}
