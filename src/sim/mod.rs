//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Caller supplies the frame delta
//! - Row-major brick iteration
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{first_brick_hit, hits_paddle, overlaps_brick};
pub use state::{
    Ball, Brick, BrickGrid, GamePhase, GameState, InputState, Paddle, PhaseCommand,
};
pub use tick::{GameEvent, TickInput, advance, paddle_velocity, tick};
