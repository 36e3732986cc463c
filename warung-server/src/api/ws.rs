//! Staff WebSocket endpoint — 订单事件与在线状态推送
//!
//! GET /ws
//!
//! 协议:
//! - Staff → Server: ClientEvent (join-cashier, join-kitchen, join-admin, user-online)
//! - Server → Staff: ServerEvent (new-order, order-updated, users-online-update)
//!
//! 连接断开即离开所有分组；若该连接曾宣告员工在线，
//! 向管理组重新推送在线名单。

use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::Duration;
use uuid::Uuid;

use crate::core::ServerState;
use crate::realtime::{ClientEvent, Group, ServerEvent};

pub fn router() -> Router<ServerState> {
    Router::new().route("/ws", get(handle_ws))
}

/// GET /ws - 升级连接并交给会话循环
pub async fn handle_ws(State(state): State<ServerState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_session(socket, state))
}

async fn ws_session(socket: WebSocket, state: ServerState) {
    let (mut sink, mut stream) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let conn_id = state.hub.register(tx);

    tracing::info!(conn_id = %conn_id, "Staff WS connected");

    let mut ping_interval = tokio::time::interval(Duration::from_secs(30));
    ping_interval.tick().await; // skip immediate

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            frame = rx.recv() => {
                match frame {
                    Some(json) => {
                        if sink.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    // Hub 侧已经把连接剔除
                    None => break,
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientEvent>(&text) {
                            Ok(event) => handle_client_event(&state, conn_id, event),
                            Err(e) => {
                                tracing::debug!(conn_id = %conn_id, "Ignoring unknown WS frame: {e}");
                            }
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }

    state.hub.remove(conn_id);
    if state.presence.mark_offline(conn_id) {
        state.hub.publish(
            Group::Admin,
            &ServerEvent::UsersOnlineUpdate(state.presence.list_online()),
        );
    }

    tracing::info!(conn_id = %conn_id, "Staff WS disconnected");
}

fn handle_client_event(state: &ServerState, conn_id: Uuid, event: ClientEvent) {
    match event {
        ClientEvent::JoinCashier => state.hub.join(conn_id, Group::Cashier),
        ClientEvent::JoinKitchen => state.hub.join(conn_id, Group::Kitchen),
        ClientEvent::JoinAdmin => state.hub.join(conn_id, Group::Admin),
        ClientEvent::UserOnline(user_id) => {
            state.presence.mark_online(&user_id, conn_id);
            state.hub.publish(
                Group::Admin,
                &ServerEvent::UsersOnlineUpdate(state.presence.list_online()),
            );
        }
    }
}
