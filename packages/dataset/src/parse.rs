//! Shapefile bundle parsing.
//!
//! Reads geometry from the `.shp`, attributes from the `.dbf`, and
//! the coordinate reference system from the `.prj`. All three
//! sidecars (`.shx`, `.dbf`, `.prj`) must already be on disk next to
//! the primary file; the extractor is responsible for putting them
//! there.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fire_map_dataset_models::{
    AttributeValue, ColumnSpec, ColumnType, Feature, FeatureCollection,
};
use shapefile::dbase;

use crate::DatasetError;

/// Sidecar extensions that must accompany the `.shp` file.
const REQUIRED_SIDECARS: [&str; 3] = ["shx", "dbf", "prj"];

/// Reads a shapefile bundle into a [`FeatureCollection`].
///
/// Column order and declared types are preserved exactly as encoded
/// in the DBF header; the `.prj` WKT is carried through verbatim.
///
/// # Errors
///
/// Returns [`DatasetError::MissingSidecar`] if a required sidecar is
/// absent, [`DatasetError::RecordCountMismatch`] if the geometry and
/// attribute files disagree on feature count, and
/// [`DatasetError::Geometry`] for shapes that cannot be expressed as
/// standard vector primitives.
pub fn read_shapefile(shp_path: &Path) -> Result<FeatureCollection, DatasetError> {
    let find = |ext: &str| {
        sidecar_path(shp_path, ext).ok_or_else(|| DatasetError::MissingSidecar {
            path: shp_path.with_extension(ext).display().to_string(),
        })
    };

    for ext in REQUIRED_SIDECARS {
        find(ext)?;
    }

    let prj_path = find("prj")?;
    let crs_wkt = std::fs::read_to_string(&prj_path)
        .map_err(|e| DatasetError::Io {
            path: prj_path.display().to_string(),
            source: e,
        })?
        .trim()
        .to_string();

    let shapes = shapefile::ShapeReader::from_path(shp_path)?.read()?;

    let dbf_path = find("dbf")?;
    let mut table = dbase::Reader::from_path(&dbf_path)?;
    let columns = columns_from_fields(table.fields());
    let records = table.read()?;

    if shapes.len() != records.len() {
        return Err(DatasetError::RecordCountMismatch {
            shapes: shapes.len(),
            records: records.len(),
        });
    }

    let mut features = Vec::with_capacity(shapes.len());

    for (index, (shape, record)) in shapes.into_iter().zip(records).enumerate() {
        let geometry =
            geo::Geometry::<f64>::try_from(shape).map_err(|e| DatasetError::Geometry {
                index,
                message: format!("{e}"),
            })?;

        let values = columns
            .iter()
            .map(|column| {
                record
                    .get(&column.name)
                    .map_or(AttributeValue::Null, field_to_value)
            })
            .collect();

        features.push(Feature { geometry, values });
    }

    log::info!(
        "Parsed {} features, {} attribute columns from {}",
        features.len(),
        columns.len(),
        shp_path.display()
    );

    Ok(FeatureCollection {
        crs_wkt,
        columns,
        features,
    })
}

/// Resolves a sidecar next to the `.shp` file. Matching is ASCII
/// case-insensitive on both stem and extension, mirroring how the
/// `.shp` itself is located, so an all-uppercase bundle resolves the
/// same way a lowercase one does.
fn sidecar_path(shp_path: &Path, ext: &str) -> Option<PathBuf> {
    let exact = shp_path.with_extension(ext);
    if exact.exists() {
        return Some(exact);
    }

    let stem = shp_path.file_stem()?;
    std::fs::read_dir(shp_path.parent()?)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|path| {
            path.file_stem()
                .is_some_and(|s| s.eq_ignore_ascii_case(stem))
                && path
                    .extension()
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
        })
}

/// Builds the attribute schema from DBF field descriptors, in
/// declaration order. The internal deletion-flag pseudo-field is not
/// a real column.
fn columns_from_fields(fields: &[dbase::FieldInfo]) -> Vec<ColumnSpec> {
    fields
        .iter()
        .filter(|field| field.name() != "DeletionFlag")
        .map(|field| ColumnSpec {
            name: field.name().to_string(),
            column_type: column_type_from_dbf(field.field_type()),
        })
        .collect()
}

/// Maps a DBF field type onto the schema-level column type.
const fn column_type_from_dbf(field_type: dbase::FieldType) -> ColumnType {
    match field_type {
        dbase::FieldType::Numeric
        | dbase::FieldType::Float
        | dbase::FieldType::Double
        | dbase::FieldType::Integer
        | dbase::FieldType::Currency => ColumnType::Numeric,
        dbase::FieldType::Logical => ColumnType::Boolean,
        dbase::FieldType::Date => ColumnType::Date,
        dbase::FieldType::DateTime => ColumnType::DateTime,
        _ => ColumnType::Text,
    }
}

/// Converts a DBF field value into an [`AttributeValue`].
///
/// DBF encodes missing values per type (`Option` payloads); all of
/// them collapse onto [`AttributeValue::Null`]. A calendar date the
/// DBF claims but chrono rejects (e.g. month 13 in a hand-edited
/// file) is treated as missing rather than failing the whole parse.
fn field_to_value(value: &dbase::FieldValue) -> AttributeValue {
    match value {
        dbase::FieldValue::Character(Some(s)) => AttributeValue::Text(s.clone()),
        dbase::FieldValue::Memo(s) => AttributeValue::Text(s.clone()),
        dbase::FieldValue::Numeric(Some(n)) => AttributeValue::Numeric(*n),
        dbase::FieldValue::Float(Some(f)) => AttributeValue::Numeric(f64::from(*f)),
        dbase::FieldValue::Double(d) => AttributeValue::Numeric(*d),
        dbase::FieldValue::Currency(c) => AttributeValue::Numeric(*c),
        dbase::FieldValue::Integer(i) => AttributeValue::Integer(i64::from(*i)),
        dbase::FieldValue::Logical(Some(b)) => AttributeValue::Boolean(*b),
        dbase::FieldValue::Date(Some(date)) => naive_date(date).map_or_else(
            || {
                log::warn!("Discarding out-of-range DBF date: {date:?}");
                AttributeValue::Null
            },
            AttributeValue::Date,
        ),
        dbase::FieldValue::DateTime(dt) => naive_datetime(dt).map_or_else(
            || {
                log::warn!("Discarding out-of-range DBF datetime: {dt:?}");
                AttributeValue::Null
            },
            AttributeValue::DateTime,
        ),
        // Per-type missing markers (`None` payloads) all collapse here.
        _ => AttributeValue::Null,
    }
}

#[allow(clippy::cast_possible_wrap)]
fn naive_date(date: &dbase::Date) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year() as i32, date.month(), date.day())
}

fn naive_datetime(dt: &dbase::DateTime) -> Option<NaiveDateTime> {
    let date = naive_date(&dt.date())?;
    let time = dt.time();
    let time = NaiveTime::from_hms_opt(time.hours(), time.minutes(), time.seconds())?;
    Some(NaiveDateTime::new(date, time))
}
