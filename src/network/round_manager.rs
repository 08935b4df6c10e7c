//! Round manager
//!
//! Drives one match's `Preparation -> RoundStart -> Combat -> AwaitAck` loop. Owns no
//! game state directly — it asks `GameStateManager` for snapshots and results and
//! pushes `MatchEvent`s into both outboxes. Mirrors the phase into
//! `GameStateManager` on every transition so mutation handlers can reject requests
//! without reaching across to this struct's own lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::{mpsc, Notify};
use tracing::{info, warn};

use crate::balance::{PREP_SECONDS, ROUND_ACK_TIMEOUT_SECONDS};
use crate::game::combat::CombatRunner;
use crate::game::player::PlayerId;
use crate::game::state_manager::{GameStateManager, Phase};
use crate::network::protocol::{MatchEvent, MatchStateView, ServerMessage, TowerPlacedView};

/// A one-shot-per-round acknowledgement gate. `signal` is idempotent; `reset` clears
/// it for the next round.
#[derive(Default)]
struct AckGate {
    acked: AtomicBool,
    notify: Notify,
}

impl AckGate {
    fn signal(&self) {
        self.acked.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    fn reset(&self) {
        self.acked.store(false, Ordering::SeqCst);
    }

    async fn wait(&self) {
        loop {
            // Register as a waiter *before* checking the flag, per `Notify`'s documented
            // intended-for-single-permit pattern: `notify_waiters` wakes only tasks
            // already polling `notified()`, so checking first would let a `signal()`
            // land in the gap and go unseen until the caller's own timeout.
            let notified = self.notify.notified();
            if self.acked.load(Ordering::SeqCst) {
                return;
            }
            notified.await;
        }
    }
}

/// Drives the round loop for one match.
pub struct RoundManager {
    state_mgr: std::sync::Arc<GameStateManager>,
    outbox_a: mpsc::Sender<ServerMessage>,
    outbox_b: mpsc::Sender<ServerMessage>,
    ack_a: AckGate,
    ack_b: AckGate,
    phase: Mutex<Phase>,
    stopped: AtomicBool,
    stop_notify: Notify,
    tick_rate: u32,
}

impl RoundManager {
    pub fn new(
        state_mgr: std::sync::Arc<GameStateManager>,
        outbox_a: mpsc::Sender<ServerMessage>,
        outbox_b: mpsc::Sender<ServerMessage>,
        tick_rate: u32,
    ) -> Self {
        Self {
            state_mgr,
            outbox_a,
            outbox_b,
            ack_a: AckGate::default(),
            ack_b: AckGate::default(),
            phase: Mutex::new(Phase::Preparation),
            stopped: AtomicBool::new(false),
            stop_notify: Notify::new(),
            tick_rate,
        }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock().expect("phase mutex poisoned")
    }

    /// A client acked the round just shown. Idempotent per round.
    pub fn ack(&self, player: PlayerId) {
        match player {
            PlayerId::A => self.ack_a.signal(),
            PlayerId::B => self.ack_b.signal(),
        }
    }

    /// Broadcast that a tower was accepted for either player.
    pub async fn broadcast_tower_placed(&self, view: TowerPlacedView) {
        self.broadcast(MatchEvent::TowerPlaced { placement: view }).await;
    }

    /// Interrupt the prep sleep / ack wait and stop the loop after the current step.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.stop_notify.notify_waiters();
    }

    fn transition(&self, phase: Phase) {
        *self.phase.lock().expect("phase mutex poisoned") = phase;
        self.state_mgr.set_phase(phase);
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    async fn broadcast(&self, event: MatchEvent) {
        let _ = self.outbox_a.send(ServerMessage::Event(event.clone())).await;
        let _ = self.outbox_b.send(ServerMessage::Event(event)).await;
    }

    fn state_view(&self) -> MatchStateView {
        let view = self.state_mgr.economy_view();
        MatchStateView { gold_a: view.gold_a, gold_b: view.gold_b, lives_a: view.lives_a, lives_b: view.lives_b }
    }

    /// Sleeps for `PREP_SECONDS`, cancellable by `stop`. Returns true if cancelled.
    async fn sleep_preparation(&self) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(PREP_SECONDS)) => false,
            _ = self.stop_notify.notified() => true,
        }
    }

    /// Wait for both acks or the timeout, logging on timeout.
    async fn wait_for_acks(&self) {
        let both = async {
            self.ack_a.wait().await;
            self.ack_b.wait().await;
        };
        let timed_out = tokio::time::timeout(Duration::from_secs(ROUND_ACK_TIMEOUT_SECONDS), both).await.is_err();
        if timed_out {
            warn!("round ack wait timed out after {ROUND_ACK_TIMEOUT_SECONDS}s, advancing anyway");
        }
    }

    /// Run the loop until the match ends or `stop` is called.
    pub async fn run(&self) {
        loop {
            if self.is_stopped() {
                return;
            }

            self.transition(Phase::Preparation);
            info!("entering preparation phase");
            if self.sleep_preparation().await {
                return;
            }

            self.transition(Phase::RoundStart);
            let snapshot = self.state_mgr.get_current_state_snapshot(self.tick_rate);
            self.broadcast(MatchEvent::RoundStart { simulation_data: snapshot.clone() }).await;

            self.transition(Phase::Combat);
            info!("running combat");
            let result = tokio::task::spawn_blocking(move || CombatRunner::run(&snapshot))
                .await
                .unwrap_or_default();

            self.state_mgr.apply_round_result(&result);
            self.state_mgr.clear_wave_data();

            if let Some(winner) = self.state_mgr.is_match_over() {
                self.transition(Phase::Ended);
                self.broadcast(MatchEvent::RoundResult { result, new_state: self.state_view() }).await;
                info!(?winner, "match ended");
                return;
            }

            self.transition(Phase::AwaitAck);
            self.ack_a.reset();
            self.ack_b.reset();
            self.broadcast(MatchEvent::RoundResult { result, new_state: self.state_view() }).await;
            self.wait_for_acks().await;
        }
    }
}
