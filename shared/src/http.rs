//! HTTP helpers for Lambda functions.
//!
//! Every response, success or failure, carries the permissive CORS headers browser
//! extensions need to call the endpoints cross-origin.

use lambda_http::http::response::Builder;
use lambda_http::http::{header, Method};
use lambda_http::{Body, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::ErrorBody;
use crate::Error;

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

fn cors_builder(status: u16) -> Builder {
    Response::builder()
        .status(status)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    Ok(cors_builder(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(data)?))?)
}

/// Empty 204 answer to a CORS preflight.
pub fn preflight_response() -> Result<Response<Body>, lambda_http::Error> {
    Ok(cors_builder(204).body(Body::Empty)?)
}

/// Render an error as `{ error, detail? }` with its mapped status code.
pub fn error_response(err: &Error) -> Result<Response<Body>, lambda_http::Error> {
    let body = ErrorBody {
        error: err.public_message(),
        detail: err.detail(),
    };
    let mut response = json_response(err.status_code(), &body)?;
    if matches!(err, Error::MethodNotAllowed) {
        response
            .headers_mut()
            .insert(header::ALLOW, header::HeaderValue::from_static(ALLOWED_METHODS));
    }
    Ok(response)
}

/// Answer OPTIONS and non-POST methods; `None` means the request should be processed.
pub fn method_gate(method: &Method) -> Option<Result<Response<Body>, lambda_http::Error>> {
    match *method {
        Method::POST => None,
        Method::OPTIONS => Some(preflight_response()),
        _ => Some(error_response(&Error::MethodNotAllowed)),
    }
}

/// Parse request body as JSON. An empty body parses as `{}`.
pub fn parse_json_body<T: DeserializeOwned>(body: &Body) -> crate::Result<T> {
    let bytes: &[u8] = body.as_ref();
    let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        bytes
    };
    serde_json::from_slice(bytes).map_err(|e| Error::InvalidBody(e.to_string()))
}
