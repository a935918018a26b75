//! Locating the primary geometry file among extracted entries.

use std::path::PathBuf;

use crate::ArchiveError;
use crate::extract::ExtractedArchive;

/// Finds the primary `.shp` entry and returns its absolute path.
///
/// Matching is by file extension, ASCII case-insensitive. When an
/// archive holds more than one `.shp` (not a shape we produce, but
/// seen in the wild), the first in archive enumeration order wins —
/// deterministic, and stable across repeated runs on the same
/// archive.
///
/// # Errors
///
/// Returns [`ArchiveError::DatasetNotFound`] if no entry has a `.shp`
/// extension.
pub fn locate_shapefile(archive: &ExtractedArchive) -> Result<PathBuf, ArchiveError> {
    archive
        .entries()
        .iter()
        .find(|entry| {
            entry
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("shp"))
        })
        .map(|entry| archive.path_of(entry))
        .ok_or(ArchiveError::DatasetNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_archive;
    use std::io::{Cursor, Write as _};

    fn build_zip(names: &[&str]) -> Vec<u8> {
        let mut zip_writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for name in names {
            zip_writer.start_file(*name, options).unwrap();
            zip_writer.write_all(b"x").unwrap();
        }
        zip_writer.finish().unwrap().into_inner()
    }

    #[test]
    fn finds_the_single_shp_entry() {
        let bytes = build_zip(&["fire.dbf", "fire.shp", "fire.prj"]);
        let extracted = extract_archive(&bytes).unwrap();

        let path = locate_shapefile(&extracted).unwrap();
        assert_eq!(path.file_name().unwrap(), "fire.shp");
    }

    #[test]
    fn matches_extension_case_insensitively() {
        let bytes = build_zip(&["FIRE.SHP"]);
        let extracted = extract_archive(&bytes).unwrap();

        let path = locate_shapefile(&extracted).unwrap();
        assert_eq!(path.file_name().unwrap(), "FIRE.SHP");
    }

    #[test]
    fn no_shp_entry_is_a_hard_failure() {
        let bytes = build_zip(&["fire.dbf", "fire.prj"]);
        let extracted = extract_archive(&bytes).unwrap();

        let err = locate_shapefile(&extracted).unwrap_err();
        assert!(matches!(err, ArchiveError::DatasetNotFound));
    }

    #[test]
    fn first_of_multiple_candidates_wins_and_is_stable() {
        let bytes = build_zip(&["alpha.shp", "beta.shp"]);
        let extracted = extract_archive(&bytes).unwrap();

        let first = locate_shapefile(&extracted).unwrap();
        assert_eq!(first.file_name().unwrap(), "alpha.shp");

        // Repeated location on the same extraction picks the same file.
        for _ in 0..3 {
            assert_eq!(locate_shapefile(&extracted).unwrap(), first);
        }
    }
}
