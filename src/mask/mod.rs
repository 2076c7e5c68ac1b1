//! Grainy darkness mask: one full repaint per call, no state carried between frames.

pub mod aberration;
pub mod distance;
pub mod grain;
pub mod surface;

pub use distance::DistanceField;
pub use grain::{pixel_size, Coverage, GrainSource, JsGrain};
pub use surface::{CanvasSurface, Paint, Surface, SurfaceError};

use crate::model::{EffectConfig, TouchPoint};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaskStats {
    pub cells: usize,
    pub covered: usize,
    pub tinted: usize,
}

/// Clears `surface` and paints the mask for `progress`.
///
/// Each cell takes one noise draw for its coverage decision and, inside the
/// aberration band, one more for its tint. Nothing is painted at progress 0.
pub fn paint_mask(
    surface: &mut impl Surface,
    config: &EffectConfig,
    touch: TouchPoint,
    progress: f64,
    time_s: f64,
    grain: &mut impl GrainSource,
) -> MaskStats {
    surface.clear();
    let mut stats = MaskStats::default();
    let (w, h) = surface.size();
    if progress <= 0.0 || w == 0 || h == 0 {
        return stats;
    }
    let field = DistanceField::new(touch, w as f64, h as f64);
    let coverage = Coverage::new(&field, config, progress, time_s);
    let side = pixel_size(w);
    for y in (0..h).step_by(side as usize) {
        for x in (0..w).step_by(side as usize) {
            stats.cells += 1;
            let sample = field.sample(x as f64, y as f64);
            let noise = grain.noise(config.noise_amplitude);
            let verdict = coverage.decide(&sample, noise);
            if verdict.covered {
                stats.covered += 1;
                surface.fill_cell(x, y, side, Paint::Black);
            }
            if let Some(t) = aberration::tint(&config.aberration, progress, verdict, grain) {
                stats.tinted += 1;
                surface.fill_cell(x, y, side, t);
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::grain::testing::FixedGrain;
    use super::surface::testing::MemorySurface;
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SIZES: [(u32, u32); 4] = [(400, 800), (1920, 1080), (37, 11), (3, 3)];
    const TOUCHES: [(f64, f64); 4] = [(0.5, 0.5), (0.0, 0.0), (1.0, 0.3), (0.5, 0.125)];

    #[test]
    fn nothing_covered_at_zero_progress() {
        let mut rng = StdRng::seed_from_u64(1);
        for config in [EffectConfig::moment(), EffectConfig::edge()] {
            for (w, h) in SIZES {
                for (x, y) in TOUCHES {
                    let mut s = MemorySurface::new(w, h);
                    let stats = paint_mask(&mut s, &config, TouchPoint { x, y }, 0.0, 0.0, &mut rng);
                    assert_eq!(stats.covered, 0);
                    assert!(s.cells.is_empty() && s.tints.is_empty());
                    assert_eq!(s.clears, 1);
                }
            }
        }
    }

    #[test]
    fn point_law_covers_everything_at_full_progress_without_noise() {
        let config = EffectConfig::moment();
        for (w, h) in SIZES {
            for (x, y) in TOUCHES {
                let mut s = MemorySurface::new(w, h);
                let touch = TouchPoint { x, y };
                let stats = paint_mask(&mut s, &config, touch, 1.0, 0.0, &mut FixedGrain(0.5));
                let (tx, ty) = touch.to_surface(w as f64, h as f64);
                // Only a cell sitting exactly on the touch point can escape.
                let exact = (tx.fract() == 0.0
                    && ty.fract() == 0.0
                    && tx as u32 % pixel_size(w) == 0
                    && ty as u32 % pixel_size(w) == 0
                    && tx < w as f64
                    && ty < h as f64) as usize;
                assert_eq!(stats.covered + exact, stats.cells, "{w}x{h} at ({x},{y})");
            }
        }
    }

    #[test]
    fn edge_law_leaves_only_pulse_hole_at_full_progress() {
        let config = EffectConfig::edge();
        let pulse = config.pulse.unwrap();
        let hole = pulse.hole_radius + pulse.wave_amplitude;
        for (w, h) in [(400, 800), (1920, 1080)] {
            for (x, y) in TOUCHES {
                let touch = TouchPoint { x, y };
                let mut s = MemorySurface::new(w, h);
                let stats = paint_mask(&mut s, &config, touch, 1.0, 2.5, &mut FixedGrain(0.5));
                let field = DistanceField::new(touch, w as f64, h as f64);
                let side = pixel_size(w);
                let covered: std::collections::HashSet<_> = s.cells.iter().copied().collect();
                for cy in (0..h).step_by(side as usize) {
                    for cx in (0..w).step_by(side as usize) {
                        if !covered.contains(&(cx, cy)) {
                            let d = field.sample(cx as f64, cy as f64).touch_distance;
                            assert!(d <= hole, "{w}x{h} ({x},{y}) cell ({cx},{cy}) d={d}");
                        }
                    }
                }
                assert!(stats.covered < stats.cells);
            }
        }
    }

    #[test]
    fn point_law_scenario_half_progress() {
        let config = EffectConfig::moment();
        let touch = TouchPoint { x: 0.5, y: 0.125 };
        let mut s = MemorySurface::new(400, 800);
        paint_mask(&mut s, &config, touch, 0.5, 0.0, &mut StdRng::seed_from_u64(3));
        let field = DistanceField::new(touch, 400.0, 800.0);
        let radius = field.reference_radius * 0.5;
        for &(cx, cy) in &s.cells {
            let d = field.sample(cx as f64, cy as f64).touch_distance;
            assert!(d > radius - 20.0, "covered cell inside disk: d={d}");
        }
        assert_eq!(s.side, Some(3));
        assert!(!s.tints.is_empty());
    }

    #[test]
    fn point_law_tints_lie_over_black_cells() {
        let touch = TouchPoint { x: 0.5, y: 0.5 };
        // 0.9 pushes the noise to +16 and every band draw to red.
        let mut s = MemorySurface::new(400, 800);
        paint_mask(&mut s, &EffectConfig::moment(), touch, 0.5, 0.0, &mut FixedGrain(0.9));
        let black: std::collections::HashSet<_> = s.cells.iter().copied().collect();
        let over_black = s
            .tints
            .iter()
            .filter(|(x, y, _)| black.contains(&(*x, *y)))
            .count();
        assert!(over_black > 0);
        assert!(s.tints.iter().all(|(_, _, p)| matches!(p, Paint::Tint { rgb: aberration::RED, .. })));

        let mut s = MemorySurface::new(400, 800);
        paint_mask(&mut s, &EffectConfig::edge(), touch, 0.5, 0.0, &mut FixedGrain(0.9));
        let black: std::collections::HashSet<_> = s.cells.iter().copied().collect();
        assert!(!s.tints.is_empty());
        assert!(s.tints.iter().all(|(x, y, _)| !black.contains(&(*x, *y))));
    }

    #[test]
    fn grain_crawls_between_frames() {
        let config = EffectConfig::moment();
        let touch = TouchPoint { x: 0.5, y: 0.5 };
        let mut rng = StdRng::seed_from_u64(9);
        let mut a = MemorySurface::new(400, 800);
        let mut b = MemorySurface::new(400, 800);
        paint_mask(&mut a, &config, touch, 0.5, 0.0, &mut rng);
        paint_mask(&mut b, &config, touch, 0.5, 0.0, &mut rng);
        assert_ne!(a.cells, b.cells);
    }

    #[test]
    fn empty_surface_paints_nothing() {
        let mut s = MemorySurface::new(0, 600);
        let stats = paint_mask(
            &mut s,
            &EffectConfig::edge(),
            TouchPoint::default(),
            1.0,
            0.0,
            &mut FixedGrain(0.5),
        );
        assert_eq!(stats, MaskStats::default());
        assert_eq!(s.clears, 1);
    }
}
