//! REST mapping of the messages service
//!
//! | Verb   | Path            | Operation |
//! |--------|-----------------|-----------|
//! | GET    | `/messages`     | find      |
//! | GET    | `/messages/:id` | get       |
//! | POST   | `/messages`     | create    |
//! | PUT    | `/messages/:id` | update    |
//! | PATCH  | `/messages/:id` | patch     |
//! | DELETE | `/messages/:id` | remove    |

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::app::{parse_id, App};
use crate::error::{BoardError, Result};
use crate::types::{CreateMessage, Message, PatchMessage, UpdateMessage};

/// Routes for the REST transport
pub fn router() -> Router<App> {
    Router::new()
        .route("/messages", get(find_messages).post(create_message))
        .route(
            "/messages/:id",
            get(get_message)
                .put(update_message)
                .patch(patch_message)
                .delete(remove_message),
        )
        .route("/health", get(health_handler))
}

/// Decode a JSON request body. An empty body means no fields were sent.
fn body<T: DeserializeOwned + Default>(payload: &[u8]) -> Result<T> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(payload).map_err(|e| BoardError::BadRequest(e.to_string()))
}

async fn find_messages(State(app): State<App>) -> Json<Vec<Message>> {
    Json(app.find())
}

async fn get_message(State(app): State<App>, Path(id): Path<String>) -> Result<Json<Message>> {
    Ok(Json(app.get(parse_id(&id)?)?))
}

async fn create_message(
    State(app): State<App>,
    payload: Bytes,
) -> Result<(StatusCode, Json<Message>)> {
    let data: CreateMessage = body(&payload)?;
    Ok((StatusCode::CREATED, Json(app.create(data))))
}

async fn update_message(
    State(app): State<App>,
    Path(id): Path<String>,
    payload: Bytes,
) -> Result<Json<Message>> {
    let id = parse_id(&id)?;
    let data: UpdateMessage = body(&payload)?;
    Ok(Json(app.update(id, data)?))
}

async fn patch_message(
    State(app): State<App>,
    Path(id): Path<String>,
    payload: Bytes,
) -> Result<Json<Message>> {
    let id = parse_id(&id)?;
    let data: PatchMessage = body(&payload)?;
    Ok(Json(app.patch(id, data)?))
}

async fn remove_message(
    State(app): State<App>,
    Path(id): Path<String>,
) -> Result<Json<Message>> {
    Ok(Json(app.remove(parse_id(&id)?)?))
}

/// Health check endpoint
async fn health_handler(State(app): State<App>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "clients": app.channels().connection_count(),
        "messages": app.messages().count(),
    }))
}
