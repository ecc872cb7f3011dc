//! HTTP-equivalent surface: a pure JSON request handler.
//!
//! The transport (cloud function, local server, test harness) is an external
//! collaborator; this module only maps a request body onto the correlation
//! driver and wraps the outcome in the `{status, msg, data}` envelope.
//! Recoverable conditions keep `status: "ok"`: a raw link that matches no
//! entries answers ok with `data: null`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codec::decode_url;
use crate::correlate::{find_entries, state_from_url};
use crate::error::CorrelateError;
use crate::models::{CorrelateData, SearchState};
use crate::query::LogClient;

/// Request body: either a raw deep link, or a previously returned state plus
/// the link it came from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelateRequest {
    pub url: Option<String>,
    pub prev_search_state: Option<SearchState>,
    pub prev_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: Status,
    pub msg: String,
    pub data: Option<CorrelateData>,
}

impl ApiResponse {
    fn ok(msg: impl Into<String>, data: Option<CorrelateData>) -> Self {
        Self { status: Status::Ok, msg: msg.into(), data }
    }

    fn error(msg: impl Into<String>) -> Self {
        Self { status: Status::Error, msg: msg.into(), data: None }
    }
}

const NO_ENTRIES_MSG: &str = "Could not find any log entries";

/// Handles one correlation request against the injected log client.
pub fn handle_request(client: &dyn LogClient, req: &CorrelateRequest) -> ApiResponse {
    let (link, prior_state) = match (&req.url, &req.prev_search_state, &req.prev_url) {
        (Some(url), _, _) => (url.as_str(), None),
        (None, Some(state), Some(prev_url)) => (prev_url.as_str(), Some(state)),
        _ => return ApiResponse::error("Missing required param(s)"),
    };

    let (url_params, url_query) = match decode_url(link) {
        Ok(decoded) => decoded,
        Err(CorrelateError::InvalidTimeRange(_) | CorrelateError::ParseError(_)) => {
            return ApiResponse::error("Incorrect DateTime format");
        }
        Err(err) => return ApiResponse::error(err.to_string()),
    };

    let prev_state = match prior_state {
        Some(state) => state.clone(),
        None => match state_from_url(client, &url_params) {
            Ok(state) => state,
            Err(CorrelateError::NoEntries) => {
                info!("RESP: {NO_ENTRIES_MSG}");
                return ApiResponse::ok(NO_ENTRIES_MSG, None);
            }
            Err(CorrelateError::MissingParam(_)) => {
                return ApiResponse::error("Missing query param");
            }
            Err(CorrelateError::InvalidTimeRange(_) | CorrelateError::ParseError(_)) => {
                return ApiResponse::error("Incorrect DateTime format");
            }
            Err(err) => return ApiResponse::error(err.to_string()),
        },
    };

    match find_entries(client, &prev_state, Some(&url_query)) {
        Ok((msg, data)) => {
            info!(
                resp = %serde_json::to_string(&data.without_entries()).unwrap_or_default(),
                "RESP: {msg}"
            );
            ApiResponse::ok(msg, Some(data))
        }
        Err(CorrelateError::FilterTooLarge(_)) => {
            ApiResponse::error("Computed filter is too big for the logging API.")
        }
        Err(err) => ApiResponse::error(err.to_string()),
    }
}
