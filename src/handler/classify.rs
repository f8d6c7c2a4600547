//! Classification endpoint
//!
//! `GET /api/classify-number?number=<value>`: validate, compute the numeric
//! properties, then suspend once on the fun fact lookup.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::classify::{self, InvalidNumber};
use crate::config::AppState;
use crate::http;
use crate::logger;

/// Query parameters of a classification request
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClassifyQuery {
    /// Raw, percent-decoded `number` value
    pub number: Option<String>,
}

impl ClassifyQuery {
    /// Parse the raw query string. The first `number` pair wins.
    pub fn from_query(query: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> = match query {
            Some(q) => serde_urlencoded::from_str(q).unwrap_or_else(|e| {
                logger::log_debug(&format!("Unparseable query string '{q}': {e}"));
                Vec::new()
            }),
            None => Vec::new(),
        };
        let number = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "number").then_some(value));
        Self { number }
    }
}

pub async fn handle_classify(
    query: Option<&str>,
    state: &AppState,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let server_name = state.config.http.server_name.as_str();
    let params = ClassifyQuery::from_query(query);
    let raw = params.number.as_deref();

    let n = match state.config.classify.parse_policy.parse(raw) {
        Ok(n) => n,
        Err(e) => {
            logger::log_warning(&format!("Rejected classification input: {e}"));
            return http::json_response(
                StatusCode::BAD_REQUEST,
                &InvalidNumber::new(raw),
                server_name,
                is_head,
            );
        }
    };

    // Trial division over the full i64 range can take seconds
    let properties = match tokio::task::spawn_blocking(move || classify::classify(n)).await {
        Ok(properties) => properties,
        Err(e) => {
            logger::log_error(&format!("Classification of {n} failed: {e}"));
            return http::internal_error(server_name, is_head);
        }
    };
    let fun_fact = state.facts.fun_fact(n).await;

    http::json_response(
        StatusCode::OK,
        &properties.with_fun_fact(fun_fact),
        server_name,
        is_head,
    )
}
