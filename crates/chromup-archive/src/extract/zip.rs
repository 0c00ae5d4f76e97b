use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::extract::{EntrySource, PendingEntry, PendingKind};
use crate::format::ArchiveFormat;

pub struct ZipSource {
    archive: zip::ZipArchive<File>,
    index: usize,
}

impl ZipSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let archive = zip::ZipArchive::new(file).map_err(|e| Error::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self { archive, index: 0 })
    }
}

impl EntrySource for ZipSource {
    fn next_entry(&mut self) -> Option<Result<PendingEntry>> {
        if self.index >= self.archive.len() {
            return None;
        }
        let entry = self.archive.by_index(self.index);
        self.index += 1;

        let mut entry = match entry {
            Ok(entry) => entry,
            Err(e) => return Some(Err(Error::Io(io::Error::other(e.to_string())))),
        };

        // Names are taken as stored; containment is enforced downstream.
        let raw_path = PathBuf::from(entry.name());
        let size = entry.size();
        let mode = entry.unix_mode();

        let kind = if entry.is_dir() {
            PendingKind::Directory
        } else {
            let mut content = Vec::new();
            if let Err(e) = entry.read_to_end(&mut content) {
                return Some(Err(Error::Io(e)));
            }
            PendingKind::File(Box::new(Cursor::new(content)))
        };

        Some(Ok(PendingEntry {
            raw_path,
            size,
            mode,
            kind,
        }))
    }

    fn entry_count(&self) -> usize {
        self.archive.len()
    }

    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Zip
    }
}
