//! Data-driven game geometry and speeds
//!
//! Every number the simulation depends on lives here so a run can be
//! reproduced from a single JSON document. Missing fields fall back to the
//! reference constants in [`crate::consts`].

use std::fmt::{Display, Formatter};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning document is rejected
#[derive(Debug)]
pub enum TuningError {
    /// Malformed JSON or wrong field types
    Parse(serde_json::Error),
    /// A dimension or speed that must be a positive finite number is not
    NotPositive { field: &'static str, value: f32 },
    /// Brick grid with no rows or no columns
    EmptyGrid,
    /// Paddle does not fit on the surface
    PaddleTooWide { width: f32, surface_width: f32 },
    /// Ball spans the whole surface, so both side walls would fire at once
    BallTooLarge { radius: f32, surface_width: f32 },
    /// Brick layout runs past the right or bottom edge of the surface
    GridOutOfBounds { right: f32, bottom: f32 },
}

impl Display for TuningError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning JSON: {e}"),
            TuningError::NotPositive { field, value } => {
                write!(f, "`{field}` must be positive and finite, got {value}")
            }
            TuningError::EmptyGrid => f.write_str("brick grid needs at least one row and column"),
            TuningError::PaddleTooWide {
                width,
                surface_width,
            } => write!(
                f,
                "paddle width {width} does not fit surface width {surface_width}"
            ),
            TuningError::BallTooLarge {
                radius,
                surface_width,
            } => write!(
                f,
                "ball radius {radius} leaves no room on surface width {surface_width}"
            ),
            TuningError::GridOutOfBounds { right, bottom } => write!(
                f,
                "brick grid extends to ({right}, {bottom}), outside the surface"
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game geometry and speeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Surface ===
    pub surface_width: f32,
    pub surface_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle's top edge and the bottom of the surface
    pub paddle_bottom_offset: f32,
    /// Pixels per second while a direction key is held
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Spawn height above the bottom of the surface
    pub ball_spawn_offset: f32,
    pub ball_spawn_vx: f32,
    pub ball_spawn_vy: f32,

    // === Bricks ===
    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_offset_left: f32,

    // === Frame pacing ===
    /// Cap on a single frame's delta in seconds
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_spawn_offset: BALL_SPAWN_OFFSET,
            ball_spawn_vx: BALL_SPAWN_VX,
            ball_spawn_vy: BALL_SPAWN_VY,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_offset_top: BRICK_OFFSET_TOP,
            brick_offset_left: BRICK_OFFSET_LEFT,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Reference tuning on a surface of a different size
    pub fn for_surface(width: f32, height: f32) -> Self {
        Self {
            surface_width: width,
            surface_height: height,
            ..Self::default()
        }
    }

    /// Tuning for a canvas of the given size with optional JSON overrides.
    ///
    /// The canvas size always wins over any surface size in `overrides`.
    /// Falls back to the reference tuning on that surface, and when the
    /// surface cannot hold the reference grid either, to [`Tuning::default`].
    /// The result always validates; the caller must resize the canvas when
    /// the returned surface differs from what it passed in.
    pub fn for_canvas(width: f32, height: f32, overrides: Option<&str>) -> Self {
        let reference = Self::for_surface(width, height);

        let candidate = match overrides.map(|json| serde_json::from_str::<Tuning>(json)) {
            Some(Ok(custom)) => Self {
                surface_width: width,
                surface_height: height,
                ..custom
            },
            Some(Err(e)) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                reference.clone()
            }
            None => reference.clone(),
        };

        match candidate.validate() {
            Ok(()) => return candidate,
            Err(e) if candidate != reference => {
                log::warn!("Invalid tuning overrides ({}), trying reference layout", e)
            }
            Err(_) => {}
        }

        match reference.validate() {
            Ok(()) => reference,
            Err(e) => {
                log::warn!(
                    "Surface {}x{} cannot hold the reference layout ({}), using {}x{}",
                    width,
                    height,
                    e,
                    SURFACE_WIDTH,
                    SURFACE_HEIGHT
                );
                Self::default()
            }
        }
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the numbers describe a playable layout
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("surface_width", self.surface_width),
            ("surface_height", self.surface_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("paddle_bottom_offset", self.paddle_bottom_offset),
            ("ball_spawn_offset", self.ball_spawn_offset),
            ("ball_spawn_vx", self.ball_spawn_vx.abs()),
            ("ball_spawn_vy", self.ball_spawn_vy.abs()),
            ("brick_padding", self.brick_padding),
            ("brick_offset_top", self.brick_offset_top),
            ("brick_offset_left", self.brick_offset_left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(TuningError::EmptyGrid);
        }
        if self.paddle_width > self.surface_width {
            return Err(TuningError::PaddleTooWide {
                width: self.paddle_width,
                surface_width: self.surface_width,
            });
        }
        if 2.0 * self.ball_radius >= self.surface_width {
            return Err(TuningError::BallTooLarge {
                radius: self.ball_radius,
                surface_width: self.surface_width,
            });
        }

        let last = self.brick_origin(self.brick_rows - 1, self.brick_cols - 1);
        let right = last.x + self.brick_width;
        let bottom = last.y + self.brick_height;
        if right > self.surface_width || bottom > self.surface_height {
            return Err(TuningError::GridOutOfBounds { right, bottom });
        }

        Ok(())
    }

    /// Top-left corner of the paddle at start: centered, near the bottom
    pub fn paddle_spawn(&self) -> Vec2 {
        Vec2::new(
            self.surface_width / 2.0 - self.paddle_width / 2.0,
            self.surface_height - self.paddle_bottom_offset,
        )
    }

    /// Ball center at spawn and after every fall-out
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(
            self.surface_width / 2.0,
            self.surface_height - self.ball_spawn_offset,
        )
    }

    pub fn ball_spawn_velocity(&self) -> Vec2 {
        Vec2::new(self.ball_spawn_vx, self.ball_spawn_vy)
    }

    /// Top-left corner of the brick at (row, col)
    pub fn brick_origin(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            self.brick_offset_left + col as f32 * (self.brick_width + self.brick_padding),
            self.brick_offset_top + row as f32 * (self.brick_height + self.brick_padding),
        )
    }

    pub fn brick_size(&self) -> Vec2 {
        Vec2::new(self.brick_width, self.brick_height)
    }
}
