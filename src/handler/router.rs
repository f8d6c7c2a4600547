//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! route matching, dispatching and access logging.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::handler::classify;
use crate::http;
use crate::logger::{self, AccessLogEntry};

pub const CLASSIFY_PATH: &str = "/api/classify-number";

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    // The body is never read
    let (parts, _) = req.into_parts();

    let response = route_request(&parts.method, &parts.uri, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            remote_addr.ip().to_string(),
            parts.method.to_string(),
            parts.uri.path().to_string(),
        );
        entry.query = parts.uri.query().map(ToString::to_string);
        entry.http_version = version_label(parts.version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.user_agent = parts
            .headers
            .get(hyper::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on method and path
async fn route_request(
    method: &Method,
    uri: &hyper::Uri,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let server_name = state.config.http.server_name.as_str();

    match *method {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => return http::options_response(server_name),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            return http::method_not_allowed(server_name);
        }
    }

    let is_head = *method == Method::HEAD;
    let path = uri.path();

    if path == CLASSIFY_PATH {
        return classify::handle_classify(uri.query(), state, is_head).await;
    }

    let health = &state.config.http.health;
    if health.enabled && (path == health.liveness_path || path == health.readiness_path) {
        return http::health_response(server_name, is_head);
    }

    let mut endpoints = vec![CLASSIFY_PATH];
    if health.enabled {
        endpoints.push(&health.liveness_path);
        endpoints.push(&health.readiness_path);
    }
    http::not_found(&endpoints, server_name, is_head)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
