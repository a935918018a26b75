#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! End-to-end pipeline for loading a fire perimeter bundle.
//!
//! Runs Fetch → Extract → Locate → Parse → Normalize → Centroid
//! strictly in sequence. No stage recovers from its own errors;
//! everything propagates unmodified to the caller, which is the only
//! place a user-facing message is produced. No retries, no partial
//! results.

pub mod cache;

pub use cache::DatasetCache;

use fire_map_archive::ArchiveError;
use fire_map_archive::extract::extract_archive;
use fire_map_archive::locate::locate_shapefile;
use fire_map_dataset::DatasetError;
use fire_map_dataset::centroid::first_feature_centroid;
use fire_map_dataset::normalize::normalize_temporal;
use fire_map_dataset::parse::read_shapefile;
use fire_map_dataset_models::{Centroid, FeatureCollection};
use fire_map_fetch::{FetchError, fetch_archive};
use thiserror::Error;

/// A fully loaded, normalized dataset ready for presentation.
#[derive(Debug)]
pub struct LoadedDataset {
    /// The collection exactly as parsed, for the attribute table.
    pub collection: FeatureCollection,
    /// The collection with temporal attributes normalized, for the map.
    pub normalized: FeatureCollection,
    /// Viewport centroid from the first feature.
    pub centroid: Centroid,
}

/// Any failure in the pipeline, wrapping the failing stage's error.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Archive download failed.
    #[error("Download failed: {0}")]
    Transport(#[from] FetchError),

    /// Extraction or dataset location failed.
    #[error("Archive processing failed: {0}")]
    Archive(#[from] ArchiveError),

    /// Parsing, normalization, or centroid extraction failed.
    #[error("Dataset processing failed: {0}")]
    Dataset(#[from] DatasetError),

    /// The blocking extract/parse task did not run to completion.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Coarse error classification for top-level presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or HTTP failure.
    Transport,
    /// Archive bytes could not be unpacked.
    CorruptArchive,
    /// No geometry file in the archive.
    DatasetNotFound,
    /// Geometry file present but unreadable or missing sidecars.
    MalformedDataset,
    /// Zero features; centroid undefined.
    EmptyDataset,
}

impl PipelineError {
    /// Which of the five failure classes this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Archive(ArchiveError::DatasetNotFound) => ErrorKind::DatasetNotFound,
            Self::Archive(_) => ErrorKind::CorruptArchive,
            Self::Dataset(DatasetError::EmptyDataset) => ErrorKind::EmptyDataset,
            // A join failure means the extract/parse stage died mid-flight.
            Self::Dataset(_) | Self::Join(_) => ErrorKind::MalformedDataset,
        }
    }

    /// Single user-facing message for this failure. The pipeline never
    /// partially renders; this message is all the user sees.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Transport => format!("Could not download the perimeter bundle: {self}"),
            ErrorKind::CorruptArchive => {
                format!("The downloaded bundle is not a readable archive: {self}")
            }
            ErrorKind::DatasetNotFound => {
                "The bundle does not contain a shapefile (.shp)".to_string()
            }
            ErrorKind::MalformedDataset => {
                format!("The shapefile in the bundle could not be read: {self}")
            }
            ErrorKind::EmptyDataset => "The shapefile contains no features".to_string(),
        }
    }
}

/// Downloads, extracts, parses, and normalizes one perimeter bundle.
///
/// The extraction directory lives only for the Locate + Parse stages
/// and is removed before normalization runs, on success and on error
/// alike.
///
/// # Errors
///
/// Returns the first stage failure, unmodified. See
/// [`PipelineError::kind`] for the classification.
pub async fn load_dataset(url: &str) -> Result<LoadedDataset, PipelineError> {
    let bytes = fetch_archive(url).await?;

    // Extract and parse are blocking file I/O; run them off the async
    // worker. The extraction directory is dropped as soon as parsing
    // completes.
    let collection = tokio::task::spawn_blocking(
        move || -> Result<FeatureCollection, PipelineError> {
            let extracted = extract_archive(&bytes)?;
            let shp_path = locate_shapefile(&extracted)?;
            Ok(read_shapefile(&shp_path)?)
        },
    )
    .await??;

    let centroid = first_feature_centroid(&collection)?;
    let normalized = normalize_temporal(&collection);

    log::info!(
        "Loaded {} features from {url} (viewport {:.4}, {:.4})",
        collection.len(),
        centroid.latitude,
        centroid.longitude
    );

    Ok(LoadedDataset {
        collection,
        normalized,
        centroid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stage_error_maps_onto_one_kind() {
        let transport = PipelineError::from(FetchError::HttpStatus {
            url: "https://example.com/a.zip".to_string(),
            status: 404,
        });
        assert_eq!(transport.kind(), ErrorKind::Transport);

        let corrupt = PipelineError::from(ArchiveError::CorruptArchive {
            message: "bad magic".to_string(),
        });
        assert_eq!(corrupt.kind(), ErrorKind::CorruptArchive);

        let not_found = PipelineError::from(ArchiveError::DatasetNotFound);
        assert_eq!(not_found.kind(), ErrorKind::DatasetNotFound);

        let malformed = PipelineError::from(DatasetError::MissingSidecar {
            path: "perimeter.dbf".to_string(),
        });
        assert_eq!(malformed.kind(), ErrorKind::MalformedDataset);

        let empty = PipelineError::from(DatasetError::EmptyDataset);
        assert_eq!(empty.kind(), ErrorKind::EmptyDataset);
    }

    #[tokio::test]
    async fn panicked_blocking_stage_reads_as_malformed_dataset() {
        let join_err = tokio::task::spawn_blocking::<_, ()>(|| panic!("boom"))
            .await
            .unwrap_err();
        let err = PipelineError::from(join_err);
        assert_eq!(err.kind(), ErrorKind::MalformedDataset);
    }

    #[test]
    fn user_messages_are_single_line() {
        let err = PipelineError::from(ArchiveError::DatasetNotFound);
        let message = err.user_message();
        assert!(!message.is_empty());
        assert!(!message.contains('\n'));
    }

    #[tokio::test]
    async fn http_failure_stops_before_extraction() {
        let err = load_dataset("http://fire-map.invalid/bundle.zip")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
