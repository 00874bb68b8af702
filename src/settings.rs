//! Presentation preferences
//!
//! Colors and HUD text only. Nothing here affects the simulation.

use serde::{Deserialize, Serialize};

/// Drawing preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Colors (any CSS color string) ===
    pub background: String,
    pub brick_color: String,
    pub paddle_color: String,
    pub ball_color: String,
    pub text_color: String,

    // === HUD ===
    /// CSS font shorthand for HUD text
    pub font: String,
    /// Title drawn in the top-left corner
    pub title: String,
    pub title_pos: (f32, f32),
    pub show_title: bool,
    /// Extra line with the live brick count and phase
    pub show_stats: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background: "#0f1a33".to_string(),
            brick_color: "white".to_string(),
            paddle_color: "white".to_string(),
            ball_color: "white".to_string(),
            text_color: "white".to_string(),

            font: "14px monospace".to_string(),
            title: "Merry Brickfall".to_string(),
            title_pos: (10.0, 20.0),
            show_title: true,
            show_stats: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Baseline for the stats line, one HUD row below the title
    pub fn stats_pos(&self) -> (f32, f32) {
        (self.title_pos.0, self.title_pos.1 + 18.0)
    }
}
