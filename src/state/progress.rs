// Darkness progress state machine: expands while held, retreats after release.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Expanding,
    Retreating,
}

/// Result of advancing the clock to `now`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub changed: bool,
    /// True only on the tick that brought a retreat down to zero.
    pub unfrozen: bool,
}

#[derive(Debug, Clone)]
pub struct ProgressClock {
    value: f64,
    phase: Phase,
    start_ms: f64,
    start_value: f64,
    expand_ms: f64,
    retreat_ms: f64,
    frozen: bool,
}

impl ProgressClock {
    pub fn new(expand_ms: f64, retreat_ms: f64) -> Self {
        Self {
            value: 0.0,
            phase: Phase::Idle,
            start_ms: 0.0,
            start_value: 0.0,
            expand_ms,
            retreat_ms,
            frozen: false,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The wall-clock readout must not be sampled while this is set.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn press(&mut self, now_ms: f64) {
        self.anchor(now_ms);
        self.phase = Phase::Expanding;
        self.frozen = true;
    }

    /// Returns false when there was no press to release (e.g. mouse-leave while idle).
    pub fn release(&mut self, now_ms: f64) -> bool {
        if self.phase != Phase::Expanding {
            return false;
        }
        self.anchor(now_ms);
        self.phase = Phase::Retreating;
        true
    }

    fn anchor(&mut self, now_ms: f64) {
        self.start_ms = now_ms;
        self.start_value = self.value;
    }

    /// Whether another tick can still move the value.
    pub fn is_animating(&self) -> bool {
        match self.phase {
            Phase::Idle => false,
            Phase::Expanding => self.value < 1.0,
            Phase::Retreating => self.value > 0.0 || self.frozen,
        }
    }

    pub fn tick(&mut self, now_ms: f64) -> Tick {
        let elapsed = (now_ms - self.start_ms).max(0.0);
        let before = self.value;
        let mut unfrozen = false;
        match self.phase {
            Phase::Idle => {}
            Phase::Expanding => {
                let v = self.start_value + rate(elapsed, self.expand_ms);
                self.value = clamp_unit(v.min(1.0));
            }
            Phase::Retreating => {
                let v = self.start_value - rate(elapsed, self.retreat_ms);
                self.value = clamp_unit(v.max(0.0));
                if self.value == 0.0 {
                    self.phase = Phase::Idle;
                    if self.frozen {
                        self.frozen = false;
                        unfrozen = true;
                    }
                }
            }
        }
        Tick {
            value: self.value,
            changed: self.value != before,
            unfrozen,
        }
    }
}

/// Fraction of the full sweep covered after `elapsed`. A non-positive duration saturates.
fn rate(elapsed: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        elapsed / duration
    } else {
        1.0
    }
}

pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
