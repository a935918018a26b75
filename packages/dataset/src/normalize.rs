//! Temporal attribute normalization.
//!
//! `GeoJSON` has no temporal type, so date and datetime attributes
//! must be rewritten to text before the collection is handed to the
//! map. Detection is layered: a column-wide pass over columns the DBF
//! declares as temporal, then a per-value pass that catches temporal
//! values hiding in ambiguously typed columns. Both run, in that
//! order.

use fire_map_dataset_models::{AttributeValue, ColumnType, FeatureCollection};

/// Rewrites every temporal attribute value to its canonical textual
/// form (`%Y-%m-%dT%H:%M:%S`).
///
/// Geometries, column order, nulls, and non-temporal values are
/// untouched. Columns declared `Date`/`DateTime` are re-declared as
/// `Text` in the output schema. The result contains no temporal value
/// in any column, so normalizing twice is a no-op.
#[must_use]
pub fn normalize_temporal(collection: &FeatureCollection) -> FeatureCollection {
    let mut out = collection.clone();

    // Layer 1: columns the DBF header declares as temporal.
    for (index, column) in out.columns.iter_mut().enumerate() {
        if column.column_type.is_temporal() {
            column.column_type = ColumnType::Text;
            for feature in &mut out.features {
                if let Some(value) = feature.values.get_mut(index) {
                    rewrite_if_temporal(value);
                }
            }
        }
    }

    // Layer 2: stray temporal values in columns typed otherwise.
    for feature in &mut out.features {
        for value in &mut feature.values {
            rewrite_if_temporal(value);
        }
    }

    out
}

/// Replaces a temporal value with its canonical text in place.
fn rewrite_if_temporal(value: &mut AttributeValue) {
    if let Some(text) = value.temporal_text() {
        *value = AttributeValue::Text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fire_map_dataset_models::{ColumnSpec, Feature};

    fn point_feature(x: f64, y: f64, values: Vec<AttributeValue>) -> Feature {
        Feature {
            geometry: geo::Geometry::Point(geo::Point::new(x, y)),
            values,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> AttributeValue {
        AttributeValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn fixture() -> FeatureCollection {
        FeatureCollection {
            crs_wkt: String::new(),
            columns: vec![
                ColumnSpec {
                    name: "NAME".to_string(),
                    column_type: ColumnType::Text,
                },
                ColumnSpec {
                    name: "OBSERVED".to_string(),
                    column_type: ColumnType::Date,
                },
            ],
            features: vec![
                point_feature(
                    -120.7,
                    46.9,
                    vec![AttributeValue::Text("A".to_string()), date(2020, 1, 1)],
                ),
                point_feature(
                    -120.6,
                    46.8,
                    vec![AttributeValue::Text("B".to_string()), AttributeValue::Null],
                ),
                point_feature(
                    -120.5,
                    46.7,
                    vec![AttributeValue::Text("C".to_string()), date(2024, 6, 15)],
                ),
            ],
        }
    }

    #[test]
    fn temporal_column_becomes_canonical_text() {
        let normalized = normalize_temporal(&fixture());

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized.columns[1].column_type, ColumnType::Text);
        assert_eq!(
            normalized.features[0].values[1],
            AttributeValue::Text("2020-01-01T00:00:00".to_string())
        );
        assert_eq!(
            normalized.features[2].values[1],
            AttributeValue::Text("2024-06-15T00:00:00".to_string())
        );
    }

    #[test]
    fn geometries_and_non_temporal_values_pass_through() {
        let original = fixture();
        let normalized = normalize_temporal(&original);

        for (before, after) in original.features.iter().zip(&normalized.features) {
            assert_eq!(before.geometry, after.geometry);
        }
        assert_eq!(
            normalized.features[1].values[0],
            AttributeValue::Text("B".to_string())
        );
        // Null markers stay null, they do not become text.
        assert_eq!(normalized.features[1].values[1], AttributeValue::Null);
    }

    #[test]
    fn stray_temporal_value_in_text_column_is_caught() {
        let mut collection = fixture();
        // Column declared Text, value is a datetime anyway.
        collection.features[1].values[0] = AttributeValue::DateTime(
            NaiveDate::from_ymd_opt(2021, 8, 4)
                .unwrap()
                .and_hms_opt(13, 30, 0)
                .unwrap(),
        );

        let normalized = normalize_temporal(&collection);
        assert_eq!(
            normalized.features[1].values[0],
            AttributeValue::Text("2021-08-04T13:30:00".to_string())
        );
    }

    #[test]
    fn no_temporal_value_survives_normalization() {
        let normalized = normalize_temporal(&fixture());
        for feature in &normalized.features {
            assert!(feature.values.iter().all(|v| !v.is_temporal()));
        }
        assert!(
            normalized
                .columns
                .iter()
                .all(|c| !c.column_type.is_temporal())
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_temporal(&fixture());
        let twice = normalize_temporal(&once);
        assert_eq!(once, twice);
    }
}
