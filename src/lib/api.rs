//! HTTP helpers for the Supabase auth and rest endpoints with consistent error
//! handling. Feature clients use these helpers to avoid duplicating request setup.
//! No local timeout is applied; requests inherit the browser's transport limits.
//! The helpers only attach headers provided by callers and never log them.

use super::errors::AppError;
use crate::features::auth::types::ProviderErrorBody;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::to_string;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

pub type Headers = Vec<(&'static str, String)>;

/// Fetches JSON with the provided headers.
pub async fn get_json<T: DeserializeOwned>(url: &str, headers: &Headers) -> Result<T, AppError> {
    let request = with_headers(Request::get(url), headers)
        .build()
        .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;
    let response = request.send().await.map_err(map_request_error)?;

    handle_json_response(response).await
}

/// Posts JSON and parses a JSON response.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
    headers: &Headers,
) -> Result<T, AppError> {
    let response = send_json(url, body, headers).await?;
    handle_json_response(response).await
}

/// Posts JSON and expects an empty (or ignored) response body.
pub async fn post_json_empty<B: Serialize>(
    url: &str,
    body: &B,
    headers: &Headers,
) -> Result<(), AppError> {
    let response = send_json(url, body, headers).await?;
    handle_empty_response(response).await
}

/// Posts an empty body, used to end a session.
pub async fn post_empty(url: &str, headers: &Headers) -> Result<(), AppError> {
    let request = with_headers(Request::post(url), headers)
        .body("")
        .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;
    let response = request.send().await.map_err(map_request_error)?;

    handle_empty_response(response).await
}

/// Builds a URL from an explicit base URL and the provided path.
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

async fn send_json<B: Serialize>(
    url: &str,
    body: &B,
    headers: &Headers,
) -> Result<Response, AppError> {
    let payload = to_string(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
    let request = with_headers(Request::post(url), headers)
        .header("Content-Type", "application/json")
        .body(payload)
        .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;

    request.send().await.map_err(map_request_error)
}

fn with_headers(mut builder: RequestBuilder, headers: &Headers) -> RequestBuilder {
    for (name, value) in headers {
        builder = builder.header(name, value.as_str());
    }
    builder
}

/// Maps transport failures into user-facing `AppError` variants.
fn map_request_error(err: gloo_net::Error) -> AppError {
    AppError::Network(format!("Unable to reach the server: {err}"))
}

/// Parses JSON responses and surfaces provider errors.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(provider_error(response).await)
    }
}

/// Handles empty responses and returns provider errors when needed.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.ok() {
        Ok(())
    } else {
        Err(provider_error(response).await)
    }
}

/// Reads the provider's own message from an error body, falling back to the
/// sanitized raw text.
async fn provider_error(response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ProviderErrorBody>(&body)
        .ok()
        .and_then(ProviderErrorBody::into_message)
        .unwrap_or_else(|| sanitize_body(&body));

    AppError::Provider { status, message }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
