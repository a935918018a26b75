#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the fire map server.
//!
//! These types are serialized to JSON for the REST API consumed by
//! the Leaflet frontend.

use fire_map_dataset_models::Centroid;
use serde::Serialize;

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiHealth {
    /// Always `true` when the server is up.
    pub healthy: bool,
    /// Server crate version.
    pub version: String,
}

/// `GET /api/map` response: everything the map widget needs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMapData {
    /// Initial viewport placement.
    pub centroid: Centroid,
    /// Normalized feature collection in `GeoJSON` form.
    pub geojson: geojson::FeatureCollection,
}

/// `GET /api/attributes` response: original attribute rows for the
/// optional table view.
#[derive(Debug, Serialize)]
pub struct ApiAttributeTable {
    /// Column names in dataset order.
    pub columns: Vec<String>,
    /// One object per feature, keyed by column name.
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Error body returned for any pipeline failure.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Single user-facing message.
    pub error: String,
}
