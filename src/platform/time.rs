//! Frame timing
//!
//! Converts the monotonic millisecond timestamps handed to the animation
//! frame callback into a seconds delta for the tick.

use crate::consts::NOMINAL_DT;

/// Tracks the previous frame timestamp
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous call.
    ///
    /// - First frame: [`NOMINAL_DT`], not the time since page load
    /// - Timestamp going backwards: 0, logged
    /// - Longer than `max_dt`: capped, logged
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return NOMINAL_DT;
        };

        let dt = ((now_ms - last) / 1000.0) as f32;
        if dt < 0.0 {
            log::warn!("frame timestamp went backwards by {:.3}s, using 0", -dt);
            return 0.0;
        }
        if dt > self.max_dt {
            log::debug!("frame delta {:.3}s capped to {:.3}s", dt, self.max_dt);
            return self.max_dt;
        }
        dt
    }

    /// Forget the previous timestamp so time spent paused is not integrated
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
