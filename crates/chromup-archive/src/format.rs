use std::path::Path;

/// Supported release archive containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    SevenZ,
}

impl ArchiveFormat {
    /// Select the decoder from the file name.
    ///
    /// Release feeds name their assets faithfully, so the extension is
    /// authoritative: `.7z` gets the 7-Zip decoder, every other supported
    /// extension the ZIP decoder.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("7z") => Self::SevenZ,
            _ => Self::Zip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_z_extension() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("cromite-win-x64.7z")),
            ArchiveFormat::SevenZ
        );
    }

    #[test]
    fn seven_z_extension_case_insensitive() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("BUILD.7Z")),
            ArchiveFormat::SevenZ
        );
    }

    #[test]
    fn zip_extension() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("chromium_windows-x64.zip")),
            ArchiveFormat::Zip
        );
    }

    #[test]
    fn unknown_extension_defaults_to_zip() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("release.bin")),
            ArchiveFormat::Zip
        );
        assert_eq!(ArchiveFormat::from_path(Path::new("noext")), ArchiveFormat::Zip);
    }
}
