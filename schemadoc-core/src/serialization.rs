use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::HeaderMap;
use serde_json::Value;

use crate::casing::{to_camel, to_snake};
use crate::error::HttpError;

/// Upper bound on request bodies read by the casing middleware.
const REQUEST_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// How JSON bodies are encoded on the wire.
///
/// With `convert_casing` on, outgoing JSON keys are camelCased and incoming
/// JSON keys are snake_cased. The same value is handed to the document
/// builder so that generated schemas use the wire casing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializationConfig {
    pub convert_casing: bool,
}

impl SerializationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_convert_casing(mut self, enabled: bool) -> Self {
        self.convert_casing = enabled;
        self
    }

    /// Apply the outgoing conversion to `value`.
    pub fn encode(&self, value: &Value) -> Value {
        if self.convert_casing {
            to_camel(value)
        } else {
            value.clone()
        }
    }

    /// Apply the incoming conversion to `value`.
    pub fn decode(&self, value: &Value) -> Value {
        if self.convert_casing {
            to_snake(value)
        } else {
            value.clone()
        }
    }
}

/// Response extension marking a body that is already in wire casing.
///
/// The casing middleware passes such responses through untouched.
#[derive(Debug, Clone, Copy)]
pub struct CasedBody;

/// Middleware converting JSON request and response bodies per `config`.
///
/// Install with `axum::middleware::from_fn_with_state(config, casing_middleware)`.
pub async fn casing_middleware(
    State(config): State<SerializationConfig>,
    request: Request,
    next: Next,
) -> Response {
    if !config.convert_casing {
        return next.run(request).await;
    }

    let request = match decode_request(&config, request).await {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(error = %err, "rejecting request body");
            return err.into_response();
        }
    };

    let response = next.run(request).await;
    encode_response(&config, response).await
}

async fn decode_request(config: &SerializationConfig, request: Request) -> Result<Request, HttpError> {
    if !is_json(request.headers()) {
        return Ok(request);
    }

    let (mut parts, body) = request.into_parts();
    let bytes = to_bytes(body, REQUEST_BODY_LIMIT)
        .await
        .map_err(|err| HttpError::BadRequest(format!("failed to read request body: {err}")))?;
    if bytes.is_empty() {
        return Ok(Request::from_parts(parts, Body::from(bytes)));
    }

    let value: Value = serde_json::from_slice(&bytes)?;
    let decoded = serde_json::to_vec(&config.decode(&value))?;
    parts.headers.remove(CONTENT_LENGTH);
    Ok(Request::from_parts(parts, Body::from(decoded)))
}

async fn encode_response(config: &SerializationConfig, response: Response) -> Response {
    if response.extensions().get::<CasedBody>().is_some() || !is_json(response.headers()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, "failed to buffer response body");
            return HttpError::Internal("failed to buffer response body".into()).into_response();
        }
    };

    let encoded = serde_json::from_slice::<Value>(&bytes)
        .and_then(|value| serde_json::to_vec(&config.encode(&value)));
    match encoded {
        Ok(encoded) => {
            parts.headers.remove(CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(encoded))
        }
        // Not valid JSON despite the content type; forward as is.
        Err(_) => Response::from_parts(parts, Body::from(bytes)),
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}
