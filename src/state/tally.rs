// Tap tally that stops the clock for good, and the fade that follows.

pub const TAPS_TO_STOP: u32 = 5;
pub const FADE_MS: f64 = 3000.0;

#[derive(Debug, Clone, Default)]
pub struct TapTally {
    count: u32,
    stopped_at: Option<f64>,
}

impl TapTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }

    /// Counts a tap. Returns false once the clock has stopped; later taps change nothing.
    pub fn tap(&mut self, now_ms: f64) -> bool {
        if self.is_stopped() {
            return false;
        }
        self.count += 1;
        if self.count >= TAPS_TO_STOP {
            self.stopped_at = Some(now_ms);
        }
        true
    }

    /// Fade toward gray in [0,1]; zero until stopped.
    pub fn fade(&self, now_ms: f64) -> f64 {
        match self.stopped_at {
            Some(t) => ((now_ms - t) / FADE_MS).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    pub fn wants_frame(&self, now_ms: f64) -> bool {
        self.is_stopped() && self.fade(now_ms) < 1.0
    }
}

/// Screen styling for a fade value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade(pub f64);

impl Fade {
    pub fn filter(&self) -> String {
        format!(
            "filter:grayscale({:.1}%) brightness({:.3});",
            self.0 * 100.0,
            1.0 - self.0 * 0.3
        )
    }

    pub fn vignette(&self) -> String {
        format!(
            "background:radial-gradient(circle, transparent 40%, rgba(0,0,0,{:.3}) 100%); opacity:{:.3};",
            self.0 * 0.5,
            self.0
        )
    }
}
