//! Core data models for the darkness clocks.
//! Effect presets, the clock lineup, the touch point, the published signal and the chrome reducer live here.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

/// Touch position normalized to the surface, both axes in [0,1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl Default for TouchPoint {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl TouchPoint {
    /// Normalizes surface-local pixel coordinates. An empty surface maps to the center.
    pub fn from_surface(px: f64, py: f64, width: f64, height: f64) -> Self {
        let norm = |v: f64, extent: f64| {
            if extent > 0.0 && v.is_finite() {
                (v / extent).clamp(0.0, 1.0)
            } else {
                0.5
            }
        };
        Self {
            x: norm(px, width),
            y: norm(py, height),
        }
    }

    pub fn to_surface(self, width: f64, height: f64) -> (f64, f64) {
        (self.x * width, self.y * height)
    }
}

/// Which spatial law decides coverage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpatialLaw {
    /// Exposed disk around the touch point shrinks from the farthest corner down to the point.
    PointRadial,
    /// Darkness invades from the four screen edges toward the touch point.
    EdgeRadial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadoutPrecision {
    /// `HH:MM:SS`
    Seconds,
    /// `HH:MM:SS.cc`
    Centis,
    /// `HH:MM:SS.mmm`
    Millis,
}

/// Chromatic fringing along the coverage boundary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AberrationPolicy {
    /// Half-width of the band around the boundary, in pixels.
    pub band_width: f64,
    /// Tinting only starts once progress is strictly above this.
    pub min_progress: f64,
    /// Whether covered (black) cells get tinted too.
    pub tint_covered: bool,
    /// Draws above this become red.
    pub red_cut: f64,
    /// Draws above this (and not red) become cyan.
    pub cyan_cut: f64,
    pub red_alpha: f64,
    pub cyan_alpha: f64,
}

/// Touch-point micro animation kept alive at near-full coverage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PulseConfig {
    pub min_progress: f64,
    /// Cells farther than this from the touch point ignore the pulse.
    pub reach: f64,
    /// Cells whose animated distance stays at or below this stay uncovered.
    pub hole_radius: f64,
    pub wave_amplitude: f64,
    /// Lobes around the touch point and angular speed (rad/s) share this factor.
    pub wave_frequency: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    pub title: String,
    pub law: SpatialLaw,
    pub expand_ms: f64,
    pub retreat_ms: f64,
    /// Grain noise is drawn uniformly from [-noise_amplitude, noise_amplitude].
    pub noise_amplitude: f64,
    pub aberration: AberrationPolicy,
    pub pulse: Option<PulseConfig>,
    pub precision: ReadoutPrecision,
}

impl EffectConfig {
    /// Point-radial darkness with a fast snap-back.
    pub fn moment() -> Self {
        Self {
            title: "The Moment".to_string(),
            law: SpatialLaw::PointRadial,
            expand_ms: 5000.0,
            retreat_ms: 500.0,
            noise_amplitude: 20.0,
            aberration: AberrationPolicy {
                band_width: 80.0,
                min_progress: 0.01,
                tint_covered: true,
                red_cut: 0.7,
                cyan_cut: 0.4,
                red_alpha: 0.4,
                cyan_alpha: 0.3,
            },
            pulse: None,
            precision: ReadoutPrecision::Seconds,
        }
    }

    /// Edge-radial darkness with a slow fade and a pulsing hole under the finger.
    pub fn edge() -> Self {
        Self {
            title: "The Edge".to_string(),
            law: SpatialLaw::EdgeRadial,
            expand_ms: 5000.0,
            retreat_ms: 2000.0,
            noise_amplitude: 20.0,
            aberration: AberrationPolicy {
                band_width: 50.0,
                min_progress: 0.1,
                tint_covered: false,
                red_cut: 0.8,
                cyan_cut: 0.6,
                red_alpha: 0.4,
                cyan_alpha: 0.3,
            },
            pulse: Some(PulseConfig {
                min_progress: 0.95,
                reach: 100.0,
                hole_radius: 20.0,
                wave_amplitude: 15.0,
                wave_frequency: 3.0,
            }),
            precision: ReadoutPrecision::Centis,
        }
    }
}

/// One artwork in the navigation lineup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClockKind {
    /// Grainy darkness closing in while the screen is held.
    Darkness(EffectConfig),
    /// Time crawls at a hundredth of its speed while held.
    Resistance,
    /// A few taps stop the clock for good.
    End,
}

impl ClockKind {
    pub fn title(&self) -> &str {
        match self {
            ClockKind::Darkness(config) => &config.title,
            ClockKind::Resistance => "The Resistance",
            ClockKind::End => "The End",
        }
    }

    /// Clocks in navigation order.
    pub fn lineup() -> Vec<ClockKind> {
        vec![
            ClockKind::Darkness(EffectConfig::moment()),
            ClockKind::Resistance,
            ClockKind::End,
            ClockKind::Darkness(EffectConfig::edge()),
        ]
    }
}

/// What a clock publishes to sibling chrome on every change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClockSignal {
    pub progress: f64,
    pub touching: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChromeState {
    pub show_intro: bool,
    pub current: usize,
    pub clock_count: usize,
    /// Latest signal from the clock at `current`.
    pub signal: ClockSignal,
}

impl ChromeState {
    pub fn new(clock_count: usize) -> Self {
        Self {
            show_intro: true,
            current: 0,
            clock_count,
            signal: ClockSignal::default(),
        }
    }

    /// Navigation fades out while the visible clock is held.
    pub fn nav_opacity(&self) -> f64 {
        if self.show_intro || self.signal.touching {
            0.0
        } else {
            1.0
        }
    }
}

pub enum ChromeAction {
    ShowIntro,
    Select(usize),
    Next,
    Prev,
    Signal { index: usize, signal: ClockSignal },
}

impl Reducible for ChromeState {
    type Action = ChromeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ChromeAction::*;
        let mut new = (*self).clone();
        match action {
            ShowIntro => {
                new.show_intro = true;
                new.signal = ClockSignal::default();
            }
            Select(i) => {
                if i >= new.clock_count {
                    return self;
                }
                new.show_intro = false;
                new.current = i;
                new.signal = ClockSignal::default();
            }
            Next => {
                if new.show_intro || new.current + 1 >= new.clock_count {
                    return self;
                }
                new.current += 1;
                new.signal = ClockSignal::default();
            }
            Prev => {
                if new.show_intro || new.current == 0 {
                    return self;
                }
                new.current -= 1;
                new.signal = ClockSignal::default();
            }
            Signal { index, signal } => {
                if index != new.current || new.signal == signal {
                    return self;
                }
                new.signal = signal;
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_point_normalizes_and_clamps() {
        let t = TouchPoint::from_surface(200.0, 100.0, 400.0, 800.0);
        assert_eq!(t, TouchPoint { x: 0.5, y: 0.125 });
        let out = TouchPoint::from_surface(-5.0, 900.0, 400.0, 800.0);
        assert_eq!(out, TouchPoint { x: 0.0, y: 1.0 });
        let empty = TouchPoint::from_surface(10.0, 10.0, 0.0, 0.0);
        assert_eq!(empty, TouchPoint::default());
    }

    #[test]
    fn presets_differ_in_retreat_speed() {
        let a = EffectConfig::moment();
        let b = EffectConfig::edge();
        assert_eq!(a.law, SpatialLaw::PointRadial);
        assert_eq!(b.law, SpatialLaw::EdgeRadial);
        assert!(a.retreat_ms * 10.0 <= a.expand_ms);
        assert!(b.retreat_ms > a.retreat_ms);
        assert!(a.pulse.is_none() && b.pulse.is_some());
    }

    #[test]
    fn config_serializes_law_by_name() {
        let json = serde_json::to_string(&EffectConfig::edge()).unwrap();
        assert!(json.contains("\"EdgeRadial\""));
        let back: EffectConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EffectConfig::edge());
    }

    #[test]
    fn lineup_order_and_titles() {
        let titles: Vec<String> = ClockKind::lineup()
            .iter()
            .map(|c| c.title().to_string())
            .collect();
        assert_eq!(titles, ["The Moment", "The Resistance", "The End", "The Edge"]);
        let json = serde_json::to_string(&ClockKind::End).unwrap();
        assert_eq!(json, "\"End\"");
    }

    #[test]
    fn chrome_navigation_is_bounded() {
        let s = Rc::new(ChromeState::new(2));
        let s = s.reduce(ChromeAction::Next);
        assert_eq!(s.current, 0, "intro blocks arrow navigation");
        let s = s.reduce(ChromeAction::Select(0));
        assert!(!s.show_intro);
        let s = s.reduce(ChromeAction::Next);
        assert_eq!(s.current, 1);
        let s = s.reduce(ChromeAction::Next);
        assert_eq!(s.current, 1);
        let s = s.reduce(ChromeAction::Prev).reduce(ChromeAction::Prev);
        assert_eq!(s.current, 0);
        let s = s.reduce(ChromeAction::Select(7));
        assert_eq!(s.current, 0);
    }

    #[test]
    fn nav_fades_only_for_current_clock_signal() {
        let s = Rc::new(ChromeState::new(2)).reduce(ChromeAction::Select(0));
        assert_eq!(s.nav_opacity(), 1.0);
        let held = ClockSignal { progress: 0.3, touching: true };
        let other = s.clone().reduce(ChromeAction::Signal { index: 1, signal: held });
        assert_eq!(other.nav_opacity(), 1.0);
        let s = s.reduce(ChromeAction::Signal { index: 0, signal: held });
        assert_eq!(s.nav_opacity(), 0.0);
        let s = s.reduce(ChromeAction::Next);
        assert_eq!(s.nav_opacity(), 1.0);
    }
}
