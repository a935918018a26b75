#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Remote archive download.
//!
//! Fetches the zipped shapefile bundle from its public URL. One
//! outbound request per call; callers that want dedup sit a cache in
//! front of the pipeline, not in here.

/// User-Agent sent with archive requests.
const FETCH_USER_AGENT: &str = "fire-map/0.1";

/// Downloads the full byte content of a remote archive.
///
/// The response body is buffered in memory; perimeter bundles are a
/// few megabytes at most. A non-success status is an error, never an
/// empty result.
///
/// # Errors
///
/// Returns [`FetchError::Http`] if the request cannot be sent or the
/// body cannot be read, and [`FetchError::HttpStatus`] for non-2xx
/// responses.
pub async fn fetch_archive(url: &str) -> Result<Vec<u8>, FetchError> {
    log::info!("Downloading {url}");

    let client = reqwest::Client::builder()
        .user_agent(FETCH_USER_AGENT)
        .build()
        .map_err(FetchError::Http)?;

    let response = client.get(url).send().await.map_err(FetchError::Http)?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(FetchError::Http)?;

    #[allow(clippy::cast_precision_loss)]
    let mb = bytes.len() as f64 / 1_048_576.0;
    log::info!("  download complete: {mb:.1} MB");

    Ok(bytes.to_vec())
}

/// Errors from archive download.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status} for {url}")]
    HttpStatus {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
}
