//! Map viewport centroid.
//!
//! The viewport is seeded from the first feature's geometric
//! centroid, not a bound over the whole collection. Good enough for
//! single-incident bundles, where every perimeter surrounds the same
//! fire.

use fire_map_dataset_models::{Centroid, FeatureCollection};
use geo::Centroid as _;

use crate::DatasetError;

/// Returns the `(latitude, longitude)` centroid of the first
/// feature's geometry.
///
/// # Errors
///
/// Returns [`DatasetError::EmptyDataset`] for a collection with zero
/// features, and [`DatasetError::Geometry`] when the first geometry
/// has no defined centroid (e.g. an empty multi-part shape).
pub fn first_feature_centroid(collection: &FeatureCollection) -> Result<Centroid, DatasetError> {
    let first = collection.features.first().ok_or(DatasetError::EmptyDataset)?;

    let point = first
        .geometry
        .centroid()
        .ok_or_else(|| DatasetError::Geometry {
            index: 0,
            message: "centroid is undefined for this geometry".to_string(),
        })?;

    Ok(Centroid::from_xy_point(point))
}
