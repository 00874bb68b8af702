//! Platform abstraction layer
//!
//! Browser-independent pieces of the frame loop:
//! - Keyboard latch (key names in, held flags and commands out)
//! - Frame clock (millisecond timestamps in, seconds delta out)

pub mod input;
pub mod time;

pub use input::{Key, KeyboardState};
pub use time::FrameClock;
