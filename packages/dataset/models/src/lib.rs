#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the fire perimeter dataset pipeline.
//!
//! This crate contains only data types and simple conversions. It has
//! no I/O dependencies (no HTTP, no zip, no shapefile parsing).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Format used for the canonical textual form of temporal attributes.
///
/// A bare date renders as midnight: `2020-01-01` becomes
/// `"2020-01-01T00:00:00"`.
pub const TEMPORAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single attribute value from a DBF attribute row.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Character or memo data.
    Text(String),
    /// Floating point numeric data.
    Numeric(f64),
    /// Integer data.
    Integer(i64),
    /// Logical (true/false) data.
    Boolean(bool),
    /// Date without a time component.
    Date(NaiveDate),
    /// Date with a time component.
    DateTime(NaiveDateTime),
    /// Missing value marker.
    Null,
}

impl AttributeValue {
    /// Returns `true` if this value carries date/time semantics.
    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date(_) | Self::DateTime(_))
    }

    /// Canonical textual form for temporal values, `None` otherwise.
    #[must_use]
    pub fn temporal_text(&self) -> Option<String> {
        match self {
            Self::Date(d) => Some(format!("{}T00:00:00", d.format("%Y-%m-%d"))),
            Self::DateTime(dt) => Some(dt.format(TEMPORAL_FORMAT).to_string()),
            _ => None,
        }
    }
}

/// Column type as declared by the DBF table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Character or memo column.
    Text,
    /// Numeric, float, double, integer, or currency column.
    Numeric,
    /// Logical column.
    Boolean,
    /// Date column.
    Date,
    /// Date-plus-time column.
    DateTime,
}

impl ColumnType {
    /// Returns `true` if the declared type carries date/time semantics.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

/// A single column in the attribute schema.
///
/// Schema order matches DBF declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name as declared in the DBF header.
    pub name: String,
    /// Declared column type.
    pub column_type: ColumnType,
}

/// A single feature: one geometry plus one attribute row.
///
/// `values` is parallel to the owning collection's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Geometry in the dataset's coordinate reference system.
    pub geometry: geo::Geometry<f64>,
    /// Attribute values, one per schema column.
    pub values: Vec<AttributeValue>,
}

/// An ordered collection of features sharing one attribute schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    /// Coordinate reference system WKT from the `.prj` sidecar.
    pub crs_wkt: String,
    /// Attribute schema in DBF column order.
    pub columns: Vec<ColumnSpec>,
    /// Features in shapefile record order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Number of features in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if the collection has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// A `(latitude, longitude)` pair for map viewport placement.
///
/// Latitude is always first. Geometry libraries hand out `(x, y)` =
/// `(longitude, latitude)`; use [`Centroid::from_xy_point`] to cross
/// that boundary instead of swapping tuple elements inline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    /// Latitude in decimal degrees (−90..90).
    pub latitude: f64,
    /// Longitude in decimal degrees (−180..180).
    pub longitude: f64,
}

impl Centroid {
    /// Converts a geometry-library `(x, y)` point into `(lat, lon)`.
    #[must_use]
    pub fn from_xy_point(point: geo::Point<f64>) -> Self {
        Self {
            latitude: point.y(),
            longitude: point.x(),
        }
    }
}
