//! WebSocket endpoint for the real-time protocol

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use uuid::Uuid;

use super::channels::EVERYBODY;
use super::protocol::{ClientFrame, ServerFrame};
use crate::app::{parse_id_value, App, ServiceMethod};
use crate::error::{BoardError, Result};

/// Routes for the socket transport
pub fn router() -> Router<App> {
    Router::new().route("/ws", get(ws_handler))
}

/// WebSocket upgrade handler
async fn ws_handler(ws: WebSocketUpgrade, State(app): State<App>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, app))
}

/// Handle an individual WebSocket connection
async fn handle_socket(socket: WebSocket, app: App) {
    let connection_id = Uuid::new_v4().to_string();
    let channels = app.channels().clone();

    let mut rx = channels.register(&connection_id);
    channels.join(EVERYBODY, &connection_id);
    tracing::info!(connection_id = %connection_id, "Client connected");

    let (mut sender, mut receiver) = socket.split();

    // Drain the connection queue into the socket
    let conn_id = connection_id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!(connection_id = %conn_id, error = %e, "failed to encode frame");
                    continue;
                }
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    // Answer calls from the client
    let conn_id = connection_id.clone();
    let recv_app = app.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    let reply = handle_frame(&recv_app, &text);
                    if !recv_app.channels().send(&conn_id, reply) {
                        break;
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    channels.unregister(&connection_id);
    tracing::info!(connection_id = %connection_id, "Client disconnected");
}

/// Turn one text frame into the reply for the caller.
///
/// Protocol errors become `error` frames; the connection stays open.
pub fn handle_frame(app: &App, text: &str) -> ServerFrame {
    let frame: ClientFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            let err = BoardError::BadRequest(format!("invalid frame: {}", e));
            err.log();
            return ServerFrame::error(None, &err);
        }
    };

    match dispatch(app, &frame) {
        Ok(result) => ServerFrame::Result {
            id: frame.id,
            result,
        },
        Err(err) => {
            err.log();
            ServerFrame::error(frame.id, &err)
        }
    }
}

fn dispatch(app: &App, frame: &ClientFrame) -> Result<serde_json::Value> {
    let (path, method) = frame
        .target()
        .ok_or_else(|| BoardError::MethodNotAllowed(frame.method.clone()))?;
    let method = ServiceMethod::parse(method)?;
    let id = frame.params.id.as_ref().map(parse_id_value).transpose()?;

    app.call(path, method, id, frame.params.data.clone())
}
