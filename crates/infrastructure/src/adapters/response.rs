//! Shared request/response handling for the backend REST API.

use friendlines_domain::{ApiEnvelope, AuthError};
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Error body shapes the backend uses:
/// `{ "error": { "message": ... } }` or `{ "message": ... }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
    message: Option<String>,
}

/// Joins an endpoint path onto the API base URL.
///
/// Unlike [`Url::join`], the last segment of the base (e.g. `/api`) is kept.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url, AuthError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| AuthError::network(format!("invalid URL {joined}: {e}")))
}

/// Builds `base/segment/...?query` with every segment percent-encoded.
pub(crate) fn resource_url(
    base: &Url,
    segments: &[&str],
    query: &[(&str, String)],
) -> Result<Url, AuthError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| AuthError::network(format!("base URL cannot carry a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

/// Maps transport failures (connect, timeout, body read) to [`AuthError::Network`].
pub(crate) fn map_transport_error(error: &reqwest::Error) -> AuthError {
    if error.is_timeout() {
        return AuthError::network(format!("request timed out: {error}"));
    }
    if error.is_connect() {
        return AuthError::network(format!("connection failed: {error}"));
    }
    AuthError::network(error.to_string())
}

/// Builds the rejection error for a non-success status.
pub(crate) fn rejection(status: StatusCode, body: &str) -> AuthError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| {
            parsed
                .error
                .and_then(|detail| detail.message)
                .or(parsed.message)
        })
        .unwrap_or_else(|| format!("API request failed: {} - {body}", status.as_u16()));
    AuthError::rejected(status.as_u16(), message)
}

/// Reads the body, checking the status first.
pub(crate) async fn read_body(response: Response) -> Result<String, AuthError> {
    let status = response.status();
    let url = response.url().clone();
    let body = response
        .text()
        .await
        .map_err(|e| map_transport_error(&e))?;

    debug!(%url, status = status.as_u16(), "response received");
    if !status.is_success() {
        warn!(%url, status = status.as_u16(), "request failed");
        return Err(rejection(status, &body));
    }
    Ok(body)
}

/// Reads a success envelope and returns its `data` payload.
///
/// A body that does not parse, `success: false` or a missing `data` field
/// are all [`AuthError::MalformedResponse`].
pub(crate) async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    let body = read_body(response).await?;
    let envelope: ApiEnvelope<T> =
        serde_json::from_str(&body).map_err(|e| AuthError::malformed(e.to_string()))?;
    envelope.into_data()
}

/// Reads a success envelope whose `data` is optional and not needed.
///
/// `success: false` or a body that is not an envelope is
/// [`AuthError::MalformedResponse`].
pub(crate) async fn read_ack(response: Response) -> Result<(), AuthError> {
    let body = read_body(response).await?;
    let envelope: ApiEnvelope<IgnoredAny> =
        serde_json::from_str(&body).map_err(|e| AuthError::malformed(e.to_string()))?;
    if !envelope.success {
        return Err(AuthError::malformed("envelope reports success: false"));
    }
    Ok(())
}
