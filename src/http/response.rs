//! HTTP response building module
//!
//! Every response is JSON and carries the permissive CORS header set.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::logger;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_METHODS: &str = "GET";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Response builder with the headers shared by every response
fn base_builder(status: StatusCode, server_name: &str) -> Builder {
    Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Server", server_name)
}

/// Build a JSON response; `HEAD` requests keep `Content-Length` but drop the body
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return internal_error(server_name, is_head);
        }
    };
    raw_json(status, json, server_name, is_head)
}

/// Build 500 Internal Server Error response
pub fn internal_error(server_name: &str, is_head: bool) -> Response<Full<Bytes>> {
    raw_json(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":"Internal server error"}"#,
        server_name,
        is_head,
    )
}

fn raw_json(
    status: StatusCode,
    json: impl Into<Bytes>,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = json.into();
    let content_length = json.len();
    let body = if is_head { Bytes::new() } else { json };

    base_builder(status, server_name)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response listing the served endpoints
pub fn not_found(endpoints: &[&str], server_name: &str, is_head: bool) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "available_endpoints": endpoints,
    });
    json_response(StatusCode::NOT_FOUND, &body, server_name, is_head)
}

/// Build 405 Method Not Allowed response
pub fn method_not_allowed(server_name: &str) -> Response<Full<Bytes>> {
    let mut response = raw_json(
        StatusCode::METHOD_NOT_ALLOWED,
        r#"{"error":"Method Not Allowed"}"#,
        server_name,
        false,
    );
    response.headers_mut().insert(
        hyper::header::ALLOW,
        hyper::header::HeaderValue::from_static("GET, HEAD, OPTIONS"),
    );
    response
}

/// Build OPTIONS response (preflight request)
pub fn options_response(server_name: &str) -> Response<Full<Bytes>> {
    base_builder(StatusCode::NO_CONTENT, server_name)
        .header("Allow", "GET, HEAD, OPTIONS")
        .header("Access-Control-Max-Age", "86400")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::NO_CONTENT, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build health check response
pub fn health_response(server_name: &str, is_head: bool) -> Response<Full<Bytes>> {
    raw_json(StatusCode::OK, r#"{"status":"ok"}"#, server_name, is_head)
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
