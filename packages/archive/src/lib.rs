#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zip extraction and shapefile location.
//!
//! The perimeter bundle arrives as a zip container holding a `.shp`
//! file and its sidecars. [`extract::extract_archive`] unpacks it into
//! a scoped temporary directory; [`locate::locate_shapefile`] finds
//! the primary geometry file among the extracted entries. The
//! temporary directory is removed when the [`extract::ExtractedArchive`]
//! is dropped, on every exit path.

pub mod extract;
pub mod locate;

use thiserror::Error;

/// Errors from archive extraction and dataset location.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The bytes do not form a readable zip container.
    #[error("Corrupt archive: {message}")]
    CorruptArchive {
        /// Description of what failed to unpack.
        message: String,
    },

    /// I/O error writing into the extraction directory.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// No `.shp` entry among the extracted files.
    #[error("No .shp file found in archive")]
    DatasetNotFound,
}
