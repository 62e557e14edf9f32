use crate::state::AppState;
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};

/// GET /ws
///
/// Upgrades the connection and registers it as a feed subscriber. The
/// subscriber receives the connection-established message first, then
/// every broadcast price update until it disconnects or lags out.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (id, mut feed_rx) = state.registry.register();
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            frame = feed_rx.recv() => match frame {
                Some(payload) => {
                    if ws_tx.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                // Registry dropped our sender: lagged out or shutdown
                None => break,
            },
            inbound = ws_rx.next() => match inbound {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // The push channel is one-way; other inbound frames are ignored
                Some(Ok(_)) => {}
            },
        }
    }

    state.registry.unregister(id);
    tracing::debug!(subscriber_id = %id, "websocket connection closed");
}
