//! Frame timing
//!
//! Converts host timestamps (ms) into bounded frame deltas for the fixed
//! timestep driver.

/// Longest frame delta accepted (ms); longer gaps are treated as a stall
pub const MAX_FRAME_MS: f64 = 100.0;

/// Tracks the previous host timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call, clamped to `[0, MAX_FRAME_MS]`.
    /// The first call returns 0.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        let delta = match self.last_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta
    }

    /// Forget the previous timestamp (after the tab was hidden, etc.)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Seed derived from the host clock, for runs without a configured seed
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}
