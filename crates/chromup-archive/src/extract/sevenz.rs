use std::fs::File;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::extract::{EntrySource, PendingEntry, PendingKind};
use crate::format::ArchiveFormat;

#[derive(Clone)]
struct SevenZEntry {
    name: String,
    is_directory: bool,
    has_stream: bool,
    size: u64,
}

pub struct SevenZSource {
    reader: sevenz_rust2::ArchiveReader<File>,
    entries: Vec<SevenZEntry>,
    index: usize,
}

impl SevenZSource {
    pub fn open(path: &Path) -> Result<Self> {
        // The metadata table is cheap to read on its own; content comes out
        // of the reader per entry.
        let archive = sevenz_rust2::Archive::open(path).map_err(|e| Error::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let entries = archive
            .files
            .iter()
            .map(|f| SevenZEntry {
                name: f.name().to_string(),
                is_directory: f.is_directory(),
                has_stream: f.has_stream(),
                size: f.size(),
            })
            .collect();

        let reader = sevenz_rust2::ArchiveReader::open(path, sevenz_rust2::Password::empty())
            .map_err(|e| Error::Open {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            reader,
            entries,
            index: 0,
        })
    }
}

impl EntrySource for SevenZSource {
    fn next_entry(&mut self) -> Option<Result<PendingEntry>> {
        if self.index >= self.entries.len() {
            return None;
        }
        let entry = self.entries[self.index].clone();
        self.index += 1;

        let kind = if entry.is_directory {
            PendingKind::Directory
        } else if !entry.has_stream {
            // Empty files carry no stream in the container.
            PendingKind::File(Box::new(Cursor::new(Vec::new())))
        } else {
            match self.reader.read_file(&entry.name) {
                Ok(content) => PendingKind::File(Box::new(Cursor::new(content))),
                Err(e) => return Some(Err(Error::Io(io::Error::other(e.to_string())))),
            }
        };

        Some(Ok(PendingEntry {
            raw_path: PathBuf::from(&entry.name),
            size: entry.size,
            // 7z entries carry Windows attributes, not Unix mode bits.
            mode: None,
            kind,
        }))
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::SevenZ
    }
}
