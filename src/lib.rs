//! # Roundhold Server
//!
//! Authoritative server for Roundhold, a deterministic-lockstep 1v1 tower-defense
//! game. Two players alternate Preparation (build towers, queue units) and Combat
//! (a frozen snapshot runs to completion) phases until one side's lives reach zero.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ROUNDHOLD SERVER                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Shared primitives                      │
//! │  └── vec2.rs       - Pixel-space 2D vector                  │
//! │                                                              │
//! │  balance.rs         - Tower/unit stats, routes, timing       │
//! │  error.rs           - GameError taxonomy                     │
//! │  config.rs          - ServerConfig / CLI                     │
//! │                                                              │
//! │  game/             - Game logic (deterministic)              │
//! │  ├── player.rs     - Player identity                         │
//! │  ├── grid.rs       - Buildable-tile grid                     │
//! │  ├── economy.rs    - Gold and lives                          │
//! │  ├── placement.rs  - Tower placement records                 │
//! │  ├── wave.rs       - Queued units                            │
//! │  ├── snapshot.rs   - Frozen round input                      │
//! │  ├── sim/          - Combat simulation kernel                │
//! │  ├── combat.rs     - Runs the kernel, derives a round result │
//! │  └── state_manager.rs - Mutex-guarded façade                 │
//! │                                                              │
//! │  network/          - Networking (non-deterministic)          │
//! │  ├── server.rs     - WebSocket accept loop + matchmaking     │
//! │  ├── protocol.rs   - Wire message types                      │
//! │  └── round_manager.rs - Phase loop for one match             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! `game::sim` runs at a fixed tick rate with a stable processing order (units, then
//! towers, by master-list index) so a frozen `SimulationData` snapshot always
//! produces the same `RoundResult`, independent of wall-clock timing.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod balance;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod network;

pub use error::GameError;
pub use game::PlayerId;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
