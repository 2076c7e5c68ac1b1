use super::distance::{DistanceField, Sample};
use crate::model::{EffectConfig, PulseConfig, SpatialLaw};

/// Uniform draws in [0,1). One fresh draw per use; nothing is reused across frames.
pub trait GrainSource {
    fn next_unit(&mut self) -> f64;

    /// Symmetric noise in [-amplitude, amplitude].
    fn noise(&mut self, amplitude: f64) -> f64 {
        (self.next_unit() - 0.5) * 2.0 * amplitude
    }
}

/// Browser randomness via `Math.random`.
pub struct JsGrain;

impl GrainSource for JsGrain {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// Cell side for a surface: coarser on wide screens to bound per-frame work.
pub fn pixel_size(width: u32) -> u32 {
    (width / 240).max(3)
}

/// Everything GrainMask and AberrationBand need for one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellVerdict {
    pub covered: bool,
    /// Signed distance to the coverage boundary; negative on the exposed side
    /// for the point law, on the edge side for the edge law.
    pub boundary: f64,
}

/// Per-frame parameters of the active spatial law.
#[derive(Clone, Copy, Debug)]
pub struct Coverage<'a> {
    field: &'a DistanceField,
    law: SpatialLaw,
    progress: f64,
    pulse: Option<PulseConfig>,
    time_s: f64,
    /// Exposed radius (point law) or edge spread (edge law).
    front: f64,
}

impl<'a> Coverage<'a> {
    pub fn new(field: &'a DistanceField, config: &EffectConfig, progress: f64, time_s: f64) -> Self {
        let front = match config.law {
            SpatialLaw::PointRadial => field.reference_radius * (1.0 - progress),
            SpatialLaw::EdgeRadial => field.max_edge_distance * progress,
        };
        Self {
            field,
            law: config.law,
            progress,
            pulse: config.pulse,
            time_s,
            front,
        }
    }

    #[cfg(test)]
    pub fn front(&self) -> f64 {
        self.front
    }

    pub fn decide(&self, s: &Sample, noise: f64) -> CellVerdict {
        match self.law {
            SpatialLaw::PointRadial => CellVerdict {
                covered: s.touch_distance > self.front + noise,
                boundary: s.touch_distance - self.front,
            },
            SpatialLaw::EdgeRadial => {
                let mut covered = false;
                if s.edge_min_distance <= self.front + noise {
                    let toward = self.field.progress_toward_touch(s);
                    let spread = self.field.spread_progress(s, self.front);
                    covered = spread >= 1.0 - toward;
                }
                if let Some(p) = self.pulse {
                    if self.progress > p.min_progress && s.touch_distance < p.reach {
                        let angle = s.dy.atan2(s.dx);
                        let wave = (angle * p.wave_frequency + self.time_s * p.wave_frequency).sin()
                            * p.wave_amplitude;
                        covered = s.touch_distance + wave + noise > p.hole_radius;
                    }
                }
                CellVerdict {
                    covered,
                    boundary: s.edge_min_distance - self.front,
                }
            }
        }
    }
}
