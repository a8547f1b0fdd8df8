//! WebSocket upgrade handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use shuttlehub_core::error::AppError;
use shuttlehub_realtime::connection::authenticator::{AuthenticatedConnection, WsAuthenticator};

use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// Bearer access token.
    pub token: String,
}

/// GET /ws?token={jwt} — WebSocket upgrade
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, AppError> {
    // Authenticate before the upgrade completes; a bad token never joins a room.
    let authenticator = WsAuthenticator::new(state.jwt_decoder.clone());
    let auth = authenticator.authenticate(&query.token)?;

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, auth, socket)))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, auth: AuthenticatedConnection, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) =
        state
            .realtime
            .connections
            .register(auth.user_id, auth.role, auth.name.clone());

    let conn_id = handle.id;

    info!(
        conn_id = %conn_id,
        user_id = %auth.user_id,
        "WebSocket connection established"
    );

    // Forward queued outbound messages onto the socket.
    let outbound_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(t) => t,
                Err(e) => {
                    warn!(error = %e, "Failed to serialize outbound message");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Process inbound messages until the client goes away.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                state
                    .realtime
                    .connections
                    .handle_inbound(&conn_id, text.as_str())
                    .await;
            }
            Ok(Message::Close(_)) => {
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.realtime.connections.unregister(&conn_id);

    info!(
        conn_id = %conn_id,
        user_id = %auth.user_id,
        "WebSocket connection closed"
    );
}
