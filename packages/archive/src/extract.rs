//! Zip extraction into a scoped temporary directory.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::ArchiveError;

/// Files extracted from a zip archive, rooted at a uniquely named
/// temporary directory.
///
/// The directory and everything in it are deleted when this value is
/// dropped, whether downstream processing succeeded or not. Each
/// extraction gets its own directory, so concurrent runs never
/// collide on paths.
#[derive(Debug)]
pub struct ExtractedArchive {
    dir: tempfile::TempDir,
    entries: Vec<PathBuf>,
}

impl ExtractedArchive {
    /// Relative paths of the extracted files, in archive enumeration
    /// order.
    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Root of the extraction directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of an extracted entry.
    #[must_use]
    pub fn path_of(&self, entry: &Path) -> PathBuf {
        self.dir.path().join(entry)
    }
}

/// Unpacks archive bytes into a fresh temporary directory.
///
/// Entry names are sanitized with `enclosed_name`; an entry that
/// would escape the extraction root is skipped, so nothing is ever
/// written outside the scope.
///
/// # Errors
///
/// Returns [`ArchiveError::CorruptArchive`] if the bytes are not a
/// readable zip container or an entry cannot be read, and
/// [`ArchiveError::Io`] if the temporary directory cannot be created
/// or written.
pub fn extract_archive(bytes: &[u8]) -> Result<ExtractedArchive, ArchiveError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ArchiveError::CorruptArchive {
            message: e.to_string(),
        })?;

    let dir = tempfile::TempDir::new().map_err(|e| ArchiveError::Io {
        path: std::env::temp_dir().display().to_string(),
        source: e,
    })?;

    let mut entries = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| ArchiveError::CorruptArchive {
                message: format!("entry {i}: {e}"),
            })?;

        let Some(relative) = entry.enclosed_name() else {
            log::warn!("  skipping unsafe entry name: {}", entry.name());
            continue;
        };

        let dest = dir.path().join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&dest).map_err(|e| ArchiveError::Io {
                path: dest.display().to_string(),
                source: e,
            })?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ArchiveError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let mut file = std::fs::File::create(&dest).map_err(|e| ArchiveError::Io {
            path: dest.display().to_string(),
            source: e,
        })?;

        std::io::copy(&mut entry, &mut file).map_err(|e| ArchiveError::Io {
            path: dest.display().to_string(),
            source: e,
        })?;

        entries.push(relative);
    }

    log::info!("  extracted {} entries", entries.len());

    Ok(ExtractedArchive { dir, entries })
}
