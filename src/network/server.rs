//! WebSocket Game Server
//!
//! Async WebSocket server for 1v1 matches. One connection is held as a waiting slot
//! under `match_lock`; the next connection pairs with it, and the pairing connection's
//! task takes ownership of both sockets and drives the whole match. No lobby, no auth,
//! no mode selection — opening the socket is the queue.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::stream::SplitStream;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc, oneshot, Mutex};
use tokio_tungstenite::{accept_async, tungstenite::Message, WebSocketStream};
use tracing::{debug, error, info, instrument, warn};

use crate::error::GameError;
use crate::game::placement::TowerPlacement;
use crate::game::player::PlayerId;
use crate::game::state_manager::GameStateManager;
use crate::game::wave::UnitOrder;
use crate::network::protocol::{
    ClientMessage, MatchEvent, MatchStateView, ServerMessage, TowerPlacedView, UnitRequest,
};
use crate::network::round_manager::RoundManager;

type WsReceiver = SplitStream<WebSocketStream<TcpStream>>;

/// How long a connection waits alone in the slot before it's dropped as stale.
const WAITING_SLOT_TIMEOUT_SECS: u64 = 120;

/// A connection waiting to be paired. `receiver` is handed off to whichever
/// connection pairs with it, which then drives the match for both sides.
struct WaitingSlot {
    addr: SocketAddr,
    sender: mpsc::Sender<ServerMessage>,
    receiver: WsReceiver,
    done_tx: oneshot::Sender<()>,
}

/// The match server.
pub struct MatchServer {
    bind_addr: SocketAddr,
    waiting: Arc<Mutex<Option<WaitingSlot>>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl MatchServer {
    pub fn new(bind_addr: SocketAddr) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self { bind_addr, waiting: Arc::new(Mutex::new(None)), shutdown_tx }
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.bind_addr).await?;
        info!("roundhold server listening on {}", self.bind_addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            info!("new connection from {addr}");
                            self.handle_connection(stream, addr);
                        }
                        Err(e) => error!("accept error: {e}"),
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("shutdown signal received");
                    return Ok(());
                }
            }
        }
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    fn handle_connection(&self, stream: TcpStream, addr: SocketAddr) {
        let waiting = self.waiting.clone();

        tokio::spawn(async move {
            let ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    error!("websocket handshake failed for {addr}: {e}");
                    return;
                }
            };
            let (mut ws_sender, ws_receiver) = ws_stream.split();
            let (msg_tx, mut msg_rx) = mpsc::channel::<ServerMessage>(256);

            let forward_task = tokio::spawn(async move {
                while let Some(msg) = msg_rx.recv().await {
                    let text = match msg.to_json() {
                        Ok(t) => t,
                        Err(e) => {
                            error!("failed to serialize message: {e}");
                            continue;
                        }
                    };
                    if ws_sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
            });

            let paired = waiting.lock().await.take();

            match paired {
                Some(other) => {
                    // We paired with a waiting connection: we own both sockets now.
                    let WaitingSlot { addr: addr_a, sender: sender_a, receiver: receiver_a, done_tx: done_a } = other;
                    Self::run_match(addr_a, sender_a, receiver_a, addr, msg_tx.clone(), ws_receiver).await;
                    let _ = done_a.send(());
                }
                None => {
                    // We are the waiting slot: store ourselves and block here until
                    // paired and played out, or the timeout fires because nobody
                    // showed up (including a caller that opened and then vanished).
                    let (done_tx, done_rx) = oneshot::channel();
                    *waiting.lock().await = Some(WaitingSlot { addr, sender: msg_tx.clone(), receiver: ws_receiver, done_tx });
                    tokio::select! {
                        _ = done_rx => {}
                        _ = tokio::time::sleep(std::time::Duration::from_secs(WAITING_SLOT_TIMEOUT_SECS)) => {
                            let mut guard = waiting.lock().await;
                            if guard.as_ref().is_some_and(|s| s.addr == addr) {
                                guard.take();
                                warn!("waiting connection {addr} timed out with no opponent");
                            }
                        }
                    }
                }
            }

            forward_task.abort();
            info!("connection {addr} cleaned up");
        });
    }

    /// Run a full match between two paired connections, reading both receivers
    /// directly. `addr_b`/`sender_b`/`receiver_b` belong to the connection that
    /// triggered the pairing.
    async fn run_match(
        addr_a: SocketAddr,
        sender_a: mpsc::Sender<ServerMessage>,
        mut receiver_a: WsReceiver,
        addr_b: SocketAddr,
        sender_b: mpsc::Sender<ServerMessage>,
        mut receiver_b: WsReceiver,
    ) {
        info!("match found: {addr_a} (A) vs {addr_b} (B)");

        let state_mgr = Arc::new(GameStateManager::new());
        let round_mgr = Arc::new(RoundManager::new(
            state_mgr.clone(),
            sender_a.clone(),
            sender_b.clone(),
            crate::balance::TICK_RATE,
        ));

        let initial = state_mgr.economy_view();
        let view = MatchStateView { gold_a: initial.gold_a, gold_b: initial.gold_b, lives_a: initial.lives_a, lives_b: initial.lives_b };
        let _ = sender_a
            .send(ServerMessage::Event(MatchEvent::MatchFound { player_id: PlayerId::A, opponent: PlayerId::B, initial_state: view }))
            .await;
        let _ = sender_b
            .send(ServerMessage::Event(MatchEvent::MatchFound { player_id: PlayerId::B, opponent: PlayerId::A, initial_state: view }))
            .await;

        let round_loop = {
            let round_mgr = round_mgr.clone();
            tokio::spawn(async move { round_mgr.run().await })
        };

        tokio::select! {
            _ = Self::handle_requests(addr_a, PlayerId::A, &mut receiver_a, &sender_a, &state_mgr, &round_mgr) => {
                let _ = sender_b.send(ServerMessage::Event(MatchEvent::OpponentDisconnected)).await;
            }
            _ = Self::handle_requests(addr_b, PlayerId::B, &mut receiver_b, &sender_b, &state_mgr, &round_mgr) => {
                let _ = sender_a.send(ServerMessage::Event(MatchEvent::OpponentDisconnected)).await;
            }
        }

        round_mgr.stop();
        let _ = round_loop.await;
    }

    /// Reads requests from one player's socket until it disconnects or errors.
    async fn handle_requests(
        addr: SocketAddr,
        player: PlayerId,
        receiver: &mut WsReceiver,
        sender: &mpsc::Sender<ServerMessage>,
        state_mgr: &Arc<GameStateManager>,
        round_mgr: &Arc<RoundManager>,
    ) {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let parsed = match ClientMessage::from_json(&text) {
                        Ok(m) => m,
                        Err(e) => {
                            debug!("invalid message from {addr}: {e}");
                            continue;
                        }
                    };
                    Self::handle_client_message(player, parsed, sender, state_mgr, round_mgr).await;
                }
                Ok(Message::Close(_)) => {
                    debug!("player {player} ({addr}) disconnected");
                    return;
                }
                Err(e) => {
                    warn!("websocket error for player {player} ({addr}): {e}");
                    return;
                }
                _ => {}
            }
        }
        debug!("player {player} ({addr}) connection ended");
    }

    async fn handle_client_message(
        player: PlayerId,
        msg: ClientMessage,
        sender: &mpsc::Sender<ServerMessage>,
        state_mgr: &Arc<GameStateManager>,
        round_mgr: &Arc<RoundManager>,
    ) {
        match msg {
            ClientMessage::BuildTower { request_id, tower_type, tile_row, tile_col } => {
                let internal_col = crate::network::protocol::to_internal_col(player, tile_col);
                let result = state_mgr.build_tower(player, &tower_type, tile_row, internal_col);
                Self::reply(sender, request_id, &result).await;
                if let Ok(placement) = result {
                    Self::broadcast_placement(round_mgr, &placement).await;
                }
            }
            ClientMessage::SendUnits { request_id, units } => {
                let orders: Vec<UnitOrder> = units.into_iter().map(Self::order_from_request).collect();
                let result = state_mgr.add_units_to_wave(player, &orders);
                Self::reply(sender, request_id, &result).await;
            }
            ClientMessage::RoundAck { request_id } => {
                round_mgr.ack(player);
                let _ = sender.send(ServerMessage::Ack { request_id, success: true, error: None }).await;
            }
        }
    }

    fn order_from_request(req: UnitRequest) -> UnitOrder {
        UnitOrder { unit_type: req.unit_type, route: req.route, count: req.count }
    }

    async fn broadcast_placement(round_mgr: &Arc<RoundManager>, placement: &TowerPlacement) {
        round_mgr.broadcast_tower_placed(TowerPlacedView::from_placement(placement)).await;
    }

    async fn reply<T>(sender: &mpsc::Sender<ServerMessage>, request_id: u64, result: &Result<T, GameError>) {
        let (success, error) = match result {
            Ok(_) => (true, None),
            Err(e) => (false, Some(e.to_string())),
        };
        let _ = sender.send(ServerMessage::Ack { request_id, success, error }).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_server_has_no_waiting_slot() {
        let server = MatchServer::new("127.0.0.1:0".parse().unwrap());
        assert!(server.waiting.lock().await.is_none());
    }

    #[tokio::test]
    async fn shutdown_does_not_panic_with_no_listeners() {
        let server = MatchServer::new("127.0.0.1:0".parse().unwrap());
        server.shutdown();
    }
}
