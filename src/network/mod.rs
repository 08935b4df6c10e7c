//! Network Layer
//!
//! WebSocket server for the 1v1 match lifecycle. This layer is non-deterministic;
//! all game logic runs through `game/`.

pub mod protocol;
pub mod round_manager;
pub mod server;

pub use protocol::{ClientMessage, MatchEvent, ServerMessage, UnitRequest};
pub use round_manager::RoundManager;
pub use server::MatchServer;
