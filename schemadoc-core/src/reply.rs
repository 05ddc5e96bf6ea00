use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{HeaderMap, StatusCode};

use crate::coerce::{coerce, Payload};
use crate::error::HttpError;

/// Second element of a handler result: either a status code or headers.
#[derive(Debug, Clone)]
pub enum StatusOrHeaders {
    Status(StatusCode),
    Headers(HeaderMap),
}

impl From<StatusCode> for StatusOrHeaders {
    fn from(status: StatusCode) -> Self {
        StatusOrHeaders::Status(status)
    }
}

impl From<HeaderMap> for StatusOrHeaders {
    fn from(headers: HeaderMap) -> Self {
        StatusOrHeaders::Headers(headers)
    }
}

/// Handler return type that runs model coercion before the response is built.
///
/// Built from a payload alone, a `(payload, status-or-headers)` pair or a
/// `(payload, status, headers)` triple; missing positions are `None`.
///
/// ```ignore
/// async fn get_pet() -> Reply {
///     (Payload::model(pet), StatusCode::CREATED).into()
/// }
/// ```
#[derive(Debug)]
pub struct Reply {
    payload: Payload,
    status_or_headers: Option<StatusOrHeaders>,
    headers: Option<HeaderMap>,
}

impl Reply {
    pub fn from_parts(
        payload: Payload,
        status_or_headers: Option<StatusOrHeaders>,
        headers: Option<HeaderMap>,
    ) -> Self {
        Self {
            payload,
            status_or_headers,
            headers,
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn status_or_headers(&self) -> Option<&StatusOrHeaders> {
        self.status_or_headers.as_ref()
    }

    pub fn headers(&self) -> Option<&HeaderMap> {
        self.headers.as_ref()
    }
}

impl From<Payload> for Reply {
    fn from(payload: Payload) -> Self {
        Reply::from_parts(payload, None, None)
    }
}

impl From<(Payload, StatusCode)> for Reply {
    fn from((payload, status): (Payload, StatusCode)) -> Self {
        Reply::from_parts(payload, Some(status.into()), None)
    }
}

impl From<(Payload, HeaderMap)> for Reply {
    fn from((payload, headers): (Payload, HeaderMap)) -> Self {
        Reply::from_parts(payload, Some(headers.into()), None)
    }
}

impl From<(Payload, StatusCode, HeaderMap)> for Reply {
    fn from((payload, status, headers): (Payload, StatusCode, HeaderMap)) -> Self {
        Reply::from_parts(payload, Some(status.into()), Some(headers))
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let body = match coerce(self.payload) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(error = %err, "failed to coerce handler result");
                return HttpError::Internal(err.to_string()).into_response();
            }
        };

        let mut response = Json(body).into_response();
        match self.status_or_headers {
            Some(StatusOrHeaders::Status(status)) => *response.status_mut() = status,
            Some(StatusOrHeaders::Headers(headers)) => response.headers_mut().extend(headers),
            None => {}
        }
        if let Some(headers) = self.headers {
            response.headers_mut().extend(headers);
        }
        response
    }
}
