//! HTTP handler functions for the fire map API.
//!
//! Every pipeline failure surfaces as one JSON error body; there is
//! no partial map render.

use actix_web::{HttpResponse, web};
use fire_map_dataset::geojson::{attribute_rows, to_geojson};
use fire_map_pipeline::{ErrorKind, PipelineError};
use fire_map_server_models::{ApiAttributeTable, ApiError, ApiHealth, ApiMapData};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/map`
///
/// Returns the normalized feature collection plus the viewport
/// centroid. First request triggers the pipeline; later requests hit
/// the cache.
pub async fn map_data(state: web::Data<AppState>) -> HttpResponse {
    match state.cache.get_or_load(&state.archive_url).await {
        Ok(dataset) => HttpResponse::Ok().json(ApiMapData {
            centroid: dataset.centroid,
            geojson: to_geojson(&dataset.normalized),
        }),
        Err(e) => error_response(&e),
    }
}

/// `GET /api/attributes`
///
/// Returns the original (non-normalized) attribute rows for the
/// optional table view.
pub async fn attributes(state: web::Data<AppState>) -> HttpResponse {
    match state.cache.get_or_load(&state.archive_url).await {
        Ok(dataset) => {
            let columns = dataset
                .collection
                .columns
                .iter()
                .map(|c| c.name.clone())
                .collect();
            HttpResponse::Ok().json(ApiAttributeTable {
                columns,
                rows: attribute_rows(&dataset.collection),
            })
        }
        Err(e) => error_response(&e),
    }
}

/// Maps a pipeline failure onto a status code and a single
/// user-facing message.
fn error_response(error: &PipelineError) -> HttpResponse {
    log::error!("Pipeline failure: {error}");

    let body = ApiError {
        error: error.user_message(),
    };

    match error.kind() {
        ErrorKind::Transport => HttpResponse::BadGateway().json(body),
        ErrorKind::DatasetNotFound => HttpResponse::NotFound().json(body),
        ErrorKind::CorruptArchive | ErrorKind::MalformedDataset | ErrorKind::EmptyDataset => {
            HttpResponse::UnprocessableEntity().json(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use fire_map_archive::ArchiveError;
    use fire_map_dataset::DatasetError;
    use fire_map_fetch::FetchError;

    #[test]
    fn status_codes_follow_error_kind() {
        let transport = PipelineError::from(FetchError::HttpStatus {
            url: "https://example.com/a.zip".to_string(),
            status: 404,
        });
        assert_eq!(error_response(&transport).status(), StatusCode::BAD_GATEWAY);

        let not_found = PipelineError::from(ArchiveError::DatasetNotFound);
        assert_eq!(error_response(&not_found).status(), StatusCode::NOT_FOUND);

        let corrupt = PipelineError::from(ArchiveError::CorruptArchive {
            message: "bad magic".to_string(),
        });
        assert_eq!(
            error_response(&corrupt).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let empty = PipelineError::from(DatasetError::EmptyDataset);
        assert_eq!(
            error_response(&empty).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
