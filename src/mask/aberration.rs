use super::grain::{CellVerdict, GrainSource};
use super::surface::Paint;
use crate::model::AberrationPolicy;

pub const RED: (u8, u8, u8) = (255, 0, 0);
pub const CYAN: (u8, u8, u8) = (0, 255, 255);

/// Fringe strength for a signed boundary distance: 1 on the boundary, 0 at the band's rim.
pub fn strength(boundary: f64, band_width: f64) -> f64 {
    if band_width <= 0.0 {
        return 0.0;
    }
    (1.0 - boundary.abs() / band_width).clamp(0.0, 1.0)
}

/// Tint to lay over the cell, if any. Draws from `grain` only inside the band.
pub fn tint(
    policy: &AberrationPolicy,
    progress: f64,
    verdict: CellVerdict,
    grain: &mut impl GrainSource,
) -> Option<Paint> {
    if progress <= policy.min_progress {
        return None;
    }
    if verdict.covered && !policy.tint_covered {
        return None;
    }
    if verdict.boundary.abs() >= policy.band_width {
        return None;
    }
    let s = strength(verdict.boundary, policy.band_width);
    let r = grain.next_unit();
    if r > policy.red_cut {
        Some(Paint::Tint { rgb: RED, alpha: s * policy.red_alpha })
    } else if r > policy.cyan_cut {
        Some(Paint::Tint { rgb: CYAN, alpha: s * policy.cyan_alpha })
    } else {
        None
    }
}
