//! Protocol Messages
//!
//! Wire format for client-server communication over WebSocket. Every message is a
//! tagged JSON envelope; `BuildTower`/`SendUnits`/`RoundAck` are unary requests
//! correlated to their `Ack` reply by a client-supplied `request_id`. `QueueForMatch`
//! from spec.md §6 is simply opening the socket: the server immediately starts
//! streaming `ServerMessage::Event` frames, the first of which is `MatchFound`.

use serde::{Serialize, Deserialize};

use crate::balance::MAP_COLS;
use crate::game::combat::RoundResult;
use crate::game::placement::TowerPlacement;
use crate::game::player::PlayerId;
use crate::game::snapshot::SimulationData;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Place a tower. Coordinates are in the sender's own (possibly mirrored) frame.
    BuildTower {
        request_id: u64,
        tower_type: String,
        tile_row: i32,
        tile_col: i32,
    },

    /// Queue units for the next round.
    SendUnits {
        request_id: u64,
        units: Vec<UnitRequest>,
    },

    /// Acknowledge the round just displayed.
    RoundAck { request_id: u64 },
}

/// One line item of a `SendUnits` request: `count` units of `unit_type` on `route`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitRequest {
    pub unit_type: String,
    pub route: u8,
    pub count: u32,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Reply to a unary request, correlated by `request_id`.
    Ack {
        request_id: u64,
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    /// An asynchronous match event, in enqueue order.
    Event(MatchEvent),
}

/// Gold and lives for both players, as broadcast to clients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchStateView {
    pub gold_a: u32,
    pub gold_b: u32,
    pub lives_a: u32,
    pub lives_b: u32,
}

/// A tower placement, in the owning player's wire frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerPlacedView {
    pub player: PlayerId,
    pub tower_type: String,
    pub tile_row: i32,
    pub tile_col: i32,
}

impl TowerPlacedView {
    pub fn from_placement(placement: &TowerPlacement) -> Self {
        Self {
            player: placement.player,
            tower_type: placement.tower_type.clone(),
            tile_row: placement.row,
            tile_col: to_wire_col(placement.player, placement.col),
        }
    }
}

/// Events pushed to a client's outbox, drained by its persistent stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    /// First event on every connection: which seat you are and the starting state.
    MatchFound { player_id: PlayerId, opponent: PlayerId, initial_state: MatchStateView },

    /// A round's frozen input is about to run; clients may render it themselves.
    RoundStart { simulation_data: SimulationData },

    /// A round finished; carries both the delta and the resulting state.
    RoundResult { result: RoundResult, new_state: MatchStateView },

    /// A tower was accepted for either player.
    TowerPlaced { placement: TowerPlacedView },

    /// The other client's connection ended.
    OpponentDisconnected,
}

/// Player B's tile column is mirrored at the wire boundary; player A's is identity.
/// Internally, `PlacementGrid` and the kernel never mirror — see `game::grid`.
pub fn to_internal_col(player: PlayerId, wire_col: i32) -> i32 {
    mirror_col(player, wire_col)
}

/// Inverse of `to_internal_col`; mirroring is its own inverse.
pub fn to_wire_col(player: PlayerId, internal_col: i32) -> i32 {
    mirror_col(player, internal_col)
}

fn mirror_col(player: PlayerId, col: i32) -> i32 {
    match player {
        PlayerId::A => col,
        PlayerId::B => MAP_COLS as i32 - 1 - col,
    }
}

impl ClientMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_message_json_roundtrip() {
        let msg = ClientMessage::BuildTower { request_id: 7, tower_type: "standard".to_string(), tile_row: 5, tile_col: 3 };
        let json = msg.to_json().unwrap();
        let parsed = ClientMessage::from_json(&json).unwrap();
        match parsed {
            ClientMessage::BuildTower { request_id, tile_row, tile_col, .. } => {
                assert_eq!(request_id, 7);
                assert_eq!(tile_row, 5);
                assert_eq!(tile_col, 3);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn server_ack_omits_error_when_successful() {
        let msg = ServerMessage::Ack { request_id: 1, success: true, error: None };
        let json = msg.to_json().unwrap();
        assert!(!json.contains("error"));
    }

    #[test]
    fn match_event_json_roundtrip() {
        let event = MatchEvent::OpponentDisconnected;
        let msg = ServerMessage::Event(event);
        let json = msg.to_json().unwrap();
        let parsed = ServerMessage::from_json(&json).unwrap();
        assert!(matches!(parsed, ServerMessage::Event(MatchEvent::OpponentDisconnected)));
    }

    #[test]
    fn player_a_tile_column_is_unmirrored() {
        assert_eq!(to_internal_col(PlayerId::A, 3), 3);
        assert_eq!(to_wire_col(PlayerId::A, 3), 3);
    }

    #[test]
    fn player_b_tile_column_mirrors_and_is_its_own_inverse() {
        let internal = to_internal_col(PlayerId::B, 0);
        assert_eq!(internal, MAP_COLS as i32 - 1);
        assert_eq!(to_wire_col(PlayerId::B, internal), 0);
    }
}
