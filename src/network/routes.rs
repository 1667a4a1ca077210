//! HTTP routes
//!
//! Maps `/db` requests onto protocol commands.

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::routing::get;
use axum::Router;
use bytes::Bytes;

use crate::engine::Engine;
use crate::protocol::{decode_id, decode_payload, Command, Response, MAX_PAYLOAD_SIZE};

/// Build the router for all `/db` endpoints
pub fn router(engine: Engine) -> Router {
    Router::new()
        .route("/db", get(list_entries).post(create_entry))
        .route(
            "/db/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .layer(DefaultBodyLimit::max(MAX_PAYLOAD_SIZE))
        .with_state(engine)
}

/// GET /db
async fn list_entries(State(engine): State<Engine>) -> Response {
    engine.execute(Command::List)
}

/// GET /db/{id}
async fn get_entry(State(engine): State<Engine>, Path(raw_id): Path<String>) -> Response {
    match decode_id(&raw_id) {
        Some(id) => engine.execute(Command::Get { id }),
        None => Response::NotFound,
    }
}

/// POST /db
async fn create_entry(State(engine): State<Engine>, body: Bytes) -> Response {
    match decode_payload(&body) {
        Ok(data) => engine.execute(Command::Create { data }),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected create payload");
            Response::InvalidPayload
        }
    }
}

/// PUT /db/{id}
///
/// An unknown id is reported before the body is looked at.
async fn update_entry(
    State(engine): State<Engine>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Response {
    let id = match decode_id(&raw_id) {
        Some(id) if engine.store().contains(&id) => id,
        _ => return Response::NotFound,
    };

    match decode_payload(&body) {
        Ok(data) => engine.execute(Command::Update { id, data }),
        Err(e) => {
            tracing::debug!(%id, error = %e, "Rejected update payload");
            Response::InvalidPayload
        }
    }
}

/// DELETE /db/{id}
async fn delete_entry(State(engine): State<Engine>, Path(raw_id): Path<String>) -> Response {
    match decode_id(&raw_id) {
        Some(id) => engine.execute(Command::Delete { id }),
        None => Response::NotFound,
    }
}
