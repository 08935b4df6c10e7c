//! Error Taxonomy
//!
//! Every mutation path returns one of these instead of panicking. Handlers in
//! `network::server` translate a `GameError` directly into the RPC response's
//! `success=false, error=<kind>` field; no partial state change ever precedes one.

use thiserror::Error;

/// Structured error surfaced to clients over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// Action rejected because the current phase isn't Preparation.
    #[error("wrong phase for this action")]
    WrongPhase,

    /// Requested spend exceeds the player's current gold.
    #[error("insufficient gold")]
    InsufficientGold,

    /// Target cell is already occupied by a tower.
    #[error("cell is occupied")]
    CellOccupied,

    /// Target cell can't be built on (path tile or out of bounds).
    #[error("cell is not buildable")]
    NotBuildable,

    /// Tower or unit type name isn't in the stats table.
    #[error("unknown type")]
    UnknownType,

    /// Route index outside 0..5.
    #[error("invalid route")]
    InvalidRoute,

    /// Caller has no active match.
    #[error("not in a match")]
    NotInMatch,

    /// Unexpected failure; the caller-visible message is deliberately generic.
    #[error("internal error")]
    InternalError,
}
