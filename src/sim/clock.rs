//! Frame timing
//!
//! Turns display-refresh timestamps into clamped simulation steps.

use crate::consts::MAX_FRAME_DT;

/// Clamp a raw wall-clock delta (seconds) into a usable step
#[inline]
pub fn clamp_dt(raw: f32, max_dt: f32) -> f32 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, max_dt)
}

/// Tracks the previous frame timestamp
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_timestamp_ms: Option<f64>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_timestamp_ms: None,
            max_dt,
        }
    }

    /// Step for the frame at `timestamp_ms`; the first frame gets 0
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_timestamp_ms {
            Some(prev) => clamp_dt(((timestamp_ms - prev) / 1000.0) as f32, self.max_dt),
            None => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        dt
    }

    /// Forget the previous timestamp (next frame is treated as the first)
    pub fn reset(&mut self) {
        self.last_timestamp_ms = None;
    }
}
