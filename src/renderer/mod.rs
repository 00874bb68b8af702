//! Rendering module
//!
//! The game only needs four drawing verbs, expressed as the [`Surface`]
//! trait. The browser build draws through the 2D canvas; headless runs and
//! tests record the calls instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// A CSS color string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color<'a>(pub &'a str);

/// Rectangular drawing target
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (f32, f32);
    /// Wipe the whole surface
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color<'_>);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color<'_>);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: Color<'_>);
}

/// Draw one frame. Reads the state only.
pub fn draw<S: Surface>(state: &GameState, settings: &Settings, surface: &mut S) {
    let (width, height) = surface.size();

    surface.clear();
    surface.fill_rect(0.0, 0.0, width, height, Color(&settings.background));

    let size = state.bricks.size;
    for brick in state.bricks.iter().filter(|b| b.alive) {
        surface.fill_rect(
            brick.pos.x,
            brick.pos.y,
            size.x,
            size.y,
            Color(&settings.brick_color),
        );
    }

    let paddle = &state.paddle;
    surface.fill_rect(
        paddle.pos.x,
        paddle.pos.y,
        paddle.width,
        paddle.height,
        Color(&settings.paddle_color),
    );

    let ball = &state.ball;
    surface.fill_circle(ball.pos.x, ball.pos.y, ball.radius, Color(&settings.ball_color));

    if settings.show_title {
        let (x, y) = settings.title_pos;
        surface.fill_text(
            &settings.title,
            x,
            y,
            &settings.font,
            Color(&settings.text_color),
        );
    }

    if settings.show_stats {
        let (x, y) = settings.stats_pos();
        surface.fill_text(
            &stats_line(state),
            x,
            y,
            &settings.font,
            Color(&settings.text_color),
        );
    }
}

/// HUD line with brick count and phase
fn stats_line(state: &GameState) -> String {
    let phase = match state.phase {
        GamePhase::Running => "",
        GamePhase::Paused => " [paused]",
        GamePhase::Stopped => " [stopped]",
    };
    format!(
        "bricks {}/{}  respawns {}{}",
        state.bricks.alive_count(),
        state.bricks.rows * state.bricks.cols,
        state.respawns,
        phase
    )
}
