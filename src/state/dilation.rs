// Virtual clock that crawls while held, plus the jitter and ghost schedule shown meanwhile.

use crate::mask::GrainSource;

/// Virtual time runs at this fraction of real time while held.
pub const HELD_SCALE: f64 = 0.01;
/// The main text's fringe flips between these every `FRINGE_PERIOD_MS` while held.
pub const FRINGE_CALM: f64 = 1.0;
pub const FRINGE_STRONG: f64 = 2.5;
pub const FRINGE_PERIOD_MS: f64 = 2000.0;
pub const GHOST_PERIOD_MS: f64 = 2500.0;
pub const GHOST_VISIBLE_MS: f64 = 500.0;
/// Ghost text sits this many vh above or below the middle of the screen at most.
pub const GHOST_RANGE_VH: f64 = 15.0;

const SHAKE_PERIOD_MS: f64 = 100.0;
const SHAKE_PERCENT: f64 = 3.0;
const GHOST_SHAKE_PERIOD_MS: f64 = 80.0;
const GHOST_SHAKE_PERCENT: f64 = 4.0;

/// Translation in percent of the element's own size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    fn draw(grain: &mut impl GrainSource, amplitude: f64) -> Self {
        Self {
            x: grain.noise(amplitude),
            y: grain.noise(amplitude),
        }
    }

    pub fn css(&self) -> String {
        format!("translate({:.2}%, {:.2}%)", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ghost {
    /// Vertical offset from the screen middle, in vh.
    pub offset_vh: f64,
    pub shake: Offset,
}

/// Everything the view needs for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DilationFrame {
    /// Wall-clock epoch milliseconds to display.
    pub display_ms: f64,
    pub touching: bool,
    pub shake: Offset,
    pub fringe: f64,
    pub ghost: Option<Ghost>,
}

/// Jitter that is redrawn once per slot of a fixed period.
#[derive(Clone, Copy, Debug, Default)]
struct Jitter {
    slot: Option<u64>,
    offset: Offset,
}

impl Jitter {
    /// The first slot (before one full period) stays still.
    fn at(&mut self, elapsed_ms: f64, period_ms: f64, amplitude: f64, grain: &mut impl GrainSource) -> Offset {
        let slot = (elapsed_ms / period_ms).floor() as u64;
        if slot == 0 {
            *self = Self::default();
        } else if self.slot != Some(slot) {
            self.slot = Some(slot);
            self.offset = Offset::draw(grain, amplitude);
        }
        self.offset
    }
}

#[derive(Debug, Clone)]
pub struct TimeDilation {
    origin_ms: f64,
    virtual_ms: f64,
    last_ms: f64,
    held_since: Option<f64>,
    shake: Jitter,
    /// Ghost cycle index and its vertical offset.
    ghost_cycle: Option<(u64, f64)>,
    ghost_shake: Jitter,
}

impl TimeDilation {
    pub fn new(now_ms: f64) -> Self {
        Self {
            origin_ms: now_ms,
            virtual_ms: 0.0,
            last_ms: now_ms,
            held_since: None,
            shake: Jitter::default(),
            ghost_cycle: None,
            ghost_shake: Jitter::default(),
        }
    }

    pub fn is_held(&self) -> bool {
        self.held_since.is_some()
    }

    pub fn scale(&self) -> f64 {
        if self.is_held() { HELD_SCALE } else { 1.0 }
    }

    /// Epoch milliseconds the clock currently shows.
    pub fn display_ms(&self) -> f64 {
        self.origin_ms + self.virtual_ms
    }

    /// Accrues real time since the last call at the current scale. Never runs backward.
    pub fn advance(&mut self, now_ms: f64) {
        let delta = (now_ms - self.last_ms).max(0.0);
        self.virtual_ms += delta * self.scale();
        self.last_ms = self.last_ms.max(now_ms);
    }

    /// A second press while held keeps the original anchor.
    pub fn press(&mut self, now_ms: f64) {
        if self.is_held() {
            return;
        }
        self.advance(now_ms);
        self.held_since = Some(now_ms);
    }

    pub fn release(&mut self, now_ms: f64) {
        self.advance(now_ms);
        self.held_since = None;
        self.shake = Jitter::default();
        self.ghost_cycle = None;
        self.ghost_shake = Jitter::default();
    }

    fn held_for(&self, now_ms: f64) -> Option<f64> {
        self.held_since.map(|t| (now_ms - t).max(0.0))
    }

    pub fn fringe(&self, now_ms: f64) -> f64 {
        match self.held_for(now_ms) {
            Some(held) if (held / FRINGE_PERIOD_MS).floor() as u64 % 2 == 1 => FRINGE_STRONG,
            _ => FRINGE_CALM,
        }
    }

    /// Index of the ghost appearance visible at `now_ms`, if any.
    pub fn ghost_cycle(&self, now_ms: f64) -> Option<u64> {
        let held = self.held_for(now_ms)?;
        let cycle = (held / GHOST_PERIOD_MS).floor() as u64;
        let into = held - cycle as f64 * GHOST_PERIOD_MS;
        (cycle >= 1 && into < GHOST_VISIBLE_MS).then_some(cycle)
    }

    pub fn frame(&mut self, now_ms: f64, grain: &mut impl GrainSource) -> DilationFrame {
        self.advance(now_ms);
        let Some(held) = self.held_for(now_ms) else {
            return DilationFrame {
                display_ms: self.display_ms(),
                touching: false,
                shake: Offset::default(),
                fringe: FRINGE_CALM,
                ghost: None,
            };
        };
        let shake = self.shake.at(held, SHAKE_PERIOD_MS, SHAKE_PERCENT, grain);
        let ghost = match self.ghost_cycle(now_ms) {
            Some(cycle) => {
                let offset_vh = match self.ghost_cycle {
                    Some((c, vh)) if c == cycle => vh,
                    _ => {
                        let vh = grain.noise(GHOST_RANGE_VH);
                        self.ghost_cycle = Some((cycle, vh));
                        self.ghost_shake = Jitter::default();
                        vh
                    }
                };
                let into = held - cycle as f64 * GHOST_PERIOD_MS;
                let shake = self
                    .ghost_shake
                    .at(into, GHOST_SHAKE_PERIOD_MS, GHOST_SHAKE_PERCENT, grain);
                Some(Ghost { offset_vh, shake })
            }
            None => None,
        };
        DilationFrame {
            display_ms: self.display_ms(),
            touching: true,
            shake,
            fringe: self.fringe(now_ms),
            ghost,
        }
    }
}
