//! Game Logic Module
//!
//! All authoritative match state and the combat simulation kernel. Nothing in this
//! module performs I/O or depends on `network/` — the dependency only ever runs the
//! other way.
//!
//! ## Module Structure
//!
//! - `player`: Player identity
//! - `grid`: Per-player buildable-tile grid
//! - `economy`: Gold and lives bookkeeping
//! - `placement`: Tower placement records
//! - `wave`: Queued units awaiting a round
//! - `snapshot`: Frozen, combat-ready round input
//! - `sim`: The deterministic combat kernel
//! - `combat`: Runs the kernel to completion and derives a round result
//! - `state_manager`: The mutex-guarded façade tying all of the above together

pub mod combat;
pub mod economy;
pub mod grid;
pub mod placement;
pub mod player;
pub mod sim;
pub mod snapshot;
pub mod state_manager;
pub mod wave;

pub use combat::{CombatRunner, RoundResult};
pub use economy::{Economy, EconomyView};
pub use player::PlayerId;
pub use sim::GameState;
pub use state_manager::{GameStateManager, Phase};
