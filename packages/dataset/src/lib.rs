#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shapefile parsing and attribute normalization.
//!
//! Reads an ESRI shapefile bundle (`.shp` + `.shx`/`.dbf`/`.prj`
//! sidecars) into a [`fire_map_dataset_models::FeatureCollection`],
//! rewrites temporal attribute values into a canonical textual form so
//! the collection serializes to `GeoJSON` without loss, and derives
//! the map viewport centroid from the first feature.

pub mod centroid;
pub mod geojson;
pub mod normalize;
pub mod parse;

use thiserror::Error;

/// Errors from shapefile parsing and centroid extraction.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A required sidecar file is missing next to the `.shp`.
    #[error("Missing required sidecar file: {path}")]
    MissingSidecar {
        /// Expected sidecar path.
        path: String,
    },

    /// Geometry file could not be read.
    #[error("Shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),

    /// Attribute table could not be read.
    #[error("Attribute table error: {0}")]
    Dbase(#[from] shapefile::dbase::Error),

    /// I/O error reading a sidecar.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A shape could not be expressed as a standard vector primitive.
    #[error("Unsupported geometry in feature {index}: {message}")]
    Geometry {
        /// Zero-based feature index.
        index: usize,
        /// Description of the unsupported shape.
        message: String,
    },

    /// Geometry and attribute files disagree on feature count.
    #[error("Shape/record count mismatch: {shapes} shapes, {records} attribute rows")]
    RecordCountMismatch {
        /// Number of shapes in the `.shp`.
        shapes: usize,
        /// Number of rows in the `.dbf`.
        records: usize,
    },

    /// The dataset has zero features, so the centroid is undefined.
    #[error("Dataset contains no features")]
    EmptyDataset,
}
