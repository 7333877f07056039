use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::services::booking::{self, BookSeatForm};
use crate::sessions::message::{ClientMessage, ServerMessage};
use crate::sessions::SessionId;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/ws", get(ws_handler))
}

#[derive(Debug, Deserialize)]
struct WsQuery {
    /// Page the socket was opened on; becomes the session's viewed URL.
    url: Option<String>,
}

// GET /ws?url=...
async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let viewed_url = query.url.unwrap_or_else(|| "/".to_string());
    ws.on_upgrade(move |socket| handle_socket(socket, state, viewed_url))
}

/// Connecting -> Active -> Closed. The session exists exactly as long as this
/// function runs; a reconnect is a brand-new registry entry.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, viewed_url: String) {
    let (mut sink, mut stream) = socket.split();
    let (session_id, mut rx) = state.sessions.register(viewed_url).await;
    let active = state.sessions.len().await;
    debug!(%session_id, active, "session connected");

    // Drain the outbound channel into the socket until either side closes.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = serde_json::to_string(&msg).unwrap_or_default();
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = stream.next().await {
        match msg {
            Message::Text(text) => handle_client_message(&state, session_id, &text).await,
            Message::Close(_) => break,
            _ => {}
        }
    }

    send_task.abort();
    state.sessions.unregister(&session_id).await;
    debug!(%session_id, "session disconnected");
}

async fn handle_client_message(state: &Arc<AppState>, session_id: SessionId, text: &str) {
    match ClientMessage::parse(text) {
        Some(ClientMessage::Visit { url }) => {
            state.sessions.visit(&session_id, url).await;
        }
        Some(ClientMessage::Submit { path, body }) if path == "/seat-plan/book" => {
            let form = match serde_urlencoded::from_str::<BookSeatForm>(&body) {
                Ok(form) => form,
                Err(e) => {
                    warn!(%session_id, "malformed form body: {e}");
                    let reply = ServerMessage::update_text(
                        "#book-seat-container",
                        "invalid booking request",
                    );
                    state.sessions.send_to(&session_id, reply).await;
                    return;
                }
            };
            if let Err(e) = booking::book(state, form, Some(session_id)).await {
                let reply = ServerMessage::update_text("#book-seat-container", e.to_string());
                state.sessions.send_to(&session_id, reply).await;
            }
        }
        Some(ClientMessage::Submit { path, .. }) => {
            warn!(%session_id, %path, "submit to unhandled path");
        }
        None => {
            warn!(%session_id, "dropping unparseable client frame");
        }
    }
}
