//! `GeoJSON` conversion for the map widget and the attribute table.

use fire_map_dataset_models::{AttributeValue, FeatureCollection};

/// Converts a collection into a `GeoJSON` feature collection.
///
/// Infallible by construction: every attribute value maps to a JSON
/// value, with temporal values rendering as canonical text. The
/// normalizer is still the stage that guarantees no temporal value
/// reaches the map payload; this conversion just cannot be the thing
/// that fails.
#[must_use]
pub fn to_geojson(collection: &FeatureCollection) -> geojson::FeatureCollection {
    let features = collection
        .features
        .iter()
        .map(|feature| {
            let mut properties = serde_json::Map::with_capacity(collection.columns.len());
            for (column, value) in collection.columns.iter().zip(&feature.values) {
                properties.insert(column.name.clone(), value_to_json(value));
            }

            geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(
                    &feature.geometry,
                ))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// One JSON object per feature, geometry omitted. Used for the
/// optional attribute-table view, which shows the original rows.
#[must_use]
pub fn attribute_rows(
    collection: &FeatureCollection,
) -> Vec<serde_json::Map<String, serde_json::Value>> {
    collection
        .features
        .iter()
        .map(|feature| {
            collection
                .columns
                .iter()
                .zip(&feature.values)
                .map(|(column, value)| (column.name.clone(), value_to_json(value)))
                .collect()
        })
        .collect()
}

/// Maps an attribute value onto a JSON value.
///
/// A non-finite float has no JSON representation and becomes null.
fn value_to_json(value: &AttributeValue) -> serde_json::Value {
    match value {
        AttributeValue::Text(s) => serde_json::Value::String(s.clone()),
        AttributeValue::Numeric(n) => serde_json::Number::from_f64(*n)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        AttributeValue::Integer(i) => serde_json::Value::Number((*i).into()),
        AttributeValue::Boolean(b) => serde_json::Value::Bool(*b),
        AttributeValue::Date(_) | AttributeValue::DateTime(_) => value
            .temporal_text()
            .map_or(serde_json::Value::Null, serde_json::Value::String),
        AttributeValue::Null => serde_json::Value::Null,
    }
}
