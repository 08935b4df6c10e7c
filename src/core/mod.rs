//! Core primitives shared by the simulation kernel.

pub mod vec2;

pub use vec2::Vec2;
