//! Merry Brickfall - a single-paddle brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, bricks, collisions)
//! - `renderer`: Drawing verbs and the frame draw routine
//! - `platform`: Keyboard latch and frame clock
//! - `tuning`: Data-driven geometry and speeds
//! - `settings`: Presentation preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Reference configuration constants
pub mod consts {
    /// Drawing surface dimensions
    pub const SURFACE_WIDTH: f32 = 600.0;
    pub const SURFACE_HEIGHT: f32 = 400.0;

    /// Paddle defaults (pixels, pixels/s)
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    /// Distance from the bottom of the surface to the paddle's top edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 300.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 6.0;
    /// Spawn height above the bottom of the surface
    pub const BALL_SPAWN_OFFSET: f32 = 40.0;
    pub const BALL_SPAWN_VX: f32 = 140.0;
    pub const BALL_SPAWN_VY: f32 = -140.0;

    /// Brick layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 8;
    pub const BRICK_WIDTH: f32 = 48.0;
    pub const BRICK_HEIGHT: f32 = 16.0;
    pub const BRICK_PADDING: f32 = 6.0;
    pub const BRICK_OFFSET_TOP: f32 = 50.0;
    pub const BRICK_OFFSET_LEFT: f32 = 20.0;

    /// Nominal frame delta used when no previous timestamp exists
    pub const NOMINAL_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta integrated in one tick (tab switches, debugger stops)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
