//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in [`GameState`]; there is no
//! ambient global state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Run state of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance the world
    #[default]
    Running,
    /// World frozen, can resume
    Paused,
    /// Terminal: the frame loop stops scheduling itself
    Stopped,
}

/// Requested phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseCommand {
    Pause,
    Resume,
    TogglePause,
    Stop,
}

impl GamePhase {
    /// Phase after applying `command`. `Stopped` absorbs everything.
    pub fn apply(self, command: PhaseCommand) -> GamePhase {
        use GamePhase::*;
        match (self, command) {
            (Stopped, _) => Stopped,
            (_, PhaseCommand::Stop) => Stopped,
            (Running, PhaseCommand::Pause | PhaseCommand::TogglePause) => Paused,
            (Paused, PhaseCommand::Resume | PhaseCommand::TogglePause) => Running,
            (phase, _) => phase,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per second while a key is held
    pub speed: f32,
    /// Horizontal velocity derived from input on the last tick
    pub vel_x: f32,
}

impl Paddle {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.paddle_spawn(),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            speed: tuning.paddle_speed,
            vel_x: 0.0,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Keep the paddle fully on a surface of the given width.
    /// Velocity is left untouched.
    pub fn clamp_to(&mut self, surface_width: f32) {
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        } else if self.pos.x + self.width > surface_width {
            self.pos.x = surface_width - self.width;
        }
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.ball_spawn(),
            vel: tuning.ball_spawn_velocity(),
            radius: tuning.ball_radius,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Back to the spawn point with the spawn velocity
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = tuning.ball_spawn();
        self.vel = tuning.ball_spawn_velocity();
    }
}

/// A single brick cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    /// Top-left corner
    pub pos: Vec2,
    pub alive: bool,
}

impl Brick {
    /// One-way transition, a dead brick stays dead
    pub fn destroy(&mut self) {
        self.alive = false;
    }
}

/// Fixed rows x cols grid of bricks, stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    pub rows: usize,
    pub cols: usize,
    /// Width and height shared by every brick
    pub size: Vec2,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    pub fn new(tuning: &Tuning) -> Self {
        let mut bricks = Vec::with_capacity(tuning.brick_rows * tuning.brick_cols);
        for row in 0..tuning.brick_rows {
            for col in 0..tuning.brick_cols {
                bricks.push(Brick {
                    row,
                    col,
                    pos: tuning.brick_origin(row, col),
                    alive: true,
                });
            }
        }
        Self {
            rows: tuning.brick_rows,
            cols: tuning.brick_cols,
            size: tuning.brick_size(),
            bricks,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.bricks.get(row * self.cols + col)
    }

    /// Mutable access by row-major index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Brick> {
        self.bricks.get_mut(index)
    }

    /// Bricks in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.alive)
    }
}

/// Latest held state of the two movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// Ticks simulated while running
    pub ticks: u64,
    /// Times the ball fell out and was put back
    pub respawns: u32,
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Running,
            paddle: Paddle::new(&tuning),
            ball: Ball::new(&tuning),
            bricks: BrickGrid::new(&tuning),
            ticks: 0,
            respawns: 0,
            tuning,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn respawn_ball(&mut self) {
        self.ball.respawn(&self.tuning);
        self.respawns += 1;
    }

    /// Fresh grid, centered paddle, ball at spawn, running again
    pub fn restart(&mut self) {
        *self = GameState::new(self.tuning.clone());
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
