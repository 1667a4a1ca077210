//! Response definitions
//!
//! Represents responses to clients and how they render over HTTP.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::entry::Entry;
use crate::store::Snapshot;

/// Body sent with a 404
pub const NOT_FOUND_MESSAGE: &str = "Database entry does not exist\n";

/// Body sent with a 400
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid type of data\n";

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NoContent,
    NotFound,
    InvalidPayload,
}

impl Status {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Status::Ok => StatusCode::OK,
            Status::NoContent => StatusCode::NO_CONTENT,
            Status::NotFound => StatusCode::NOT_FOUND,
            Status::InvalidPayload => StatusCode::BAD_REQUEST,
        }
    }
}

/// A response to send to the client
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Full mapping (`GET /db`)
    Mapping(Snapshot),

    /// A single entry (get/create/update)
    Entry(Entry),

    /// Entry removed
    Deleted,

    /// Unknown or malformed id
    NotFound,

    /// Body was not a usable JSON value
    InvalidPayload,
}

impl Response {
    pub fn status(&self) -> Status {
        match self {
            Response::Mapping(_) | Response::Entry(_) => Status::Ok,
            Response::Deleted => Status::NoContent,
            Response::NotFound => Status::NotFound,
            Response::InvalidPayload => Status::InvalidPayload,
        }
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let status = self.status().http_status();
        match self {
            Response::Mapping(mapping) => (status, Json(mapping)).into_response(),
            Response::Entry(entry) => (status, Json(entry)).into_response(),
            Response::Deleted => status.into_response(),
            Response::NotFound => plain_text(status, NOT_FOUND_MESSAGE),
            Response::InvalidPayload => plain_text(status, INVALID_PAYLOAD_MESSAGE),
        }
    }
}

fn plain_text(status: StatusCode, body: &'static str) -> axum::response::Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}
