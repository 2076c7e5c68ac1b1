use crate::model::TouchPoint;

/// Distances of one cell relative to the touch point and the surface edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub touch_distance: f64,
    pub edge_min_distance: f64,
    /// Offset from the touch point, kept for the pulse angle.
    pub dx: f64,
    pub dy: f64,
}

/// Per-surface distance helper. Built once per frame, sampled per cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceField {
    pub width: f64,
    pub height: f64,
    pub touch_x: f64,
    pub touch_y: f64,
    /// Distance from the touch point to its farthest surface corner.
    pub reference_radius: f64,
    /// Distance from the touch point to its farthest surface edge.
    pub max_edge_distance: f64,
}

impl DistanceField {
    pub fn new(touch: TouchPoint, width: f64, height: f64) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let (tx, ty) = touch.to_surface(width, height);
        let corners = [(0.0, 0.0), (width, 0.0), (0.0, height), (width, height)];
        let reference_radius = corners
            .iter()
            .map(|&(cx, cy)| (tx - cx).hypot(ty - cy))
            .fold(0.0, f64::max);
        let max_edge_distance = [tx, width - tx, ty, height - ty]
            .into_iter()
            .fold(0.0, f64::max);
        Self {
            width,
            height,
            touch_x: tx,
            touch_y: ty,
            reference_radius,
            max_edge_distance,
        }
    }

    pub fn sample(&self, x: f64, y: f64) -> Sample {
        let dx = x - self.touch_x;
        let dy = y - self.touch_y;
        let edge_min_distance = x.min(self.width - x).min(y).min(self.height - y);
        Sample {
            touch_distance: dx.hypot(dy),
            edge_min_distance,
            dx,
            dy,
        }
    }

    /// How far along the edge-to-touch axis a cell sits, in [0,1]; 1 at the touch point.
    pub fn progress_toward_touch(&self, s: &Sample) -> f64 {
        let m = self.max_edge_distance;
        saturating_ratio(m - s.touch_distance, m).clamp(0.0, 1.0)
    }

    /// Share of the remaining edge-to-farthest-edge distance the spread has eaten past this cell.
    pub fn spread_progress(&self, s: &Sample, spread: f64) -> f64 {
        saturating_ratio(spread - s.edge_min_distance, self.max_edge_distance - s.edge_min_distance)
    }
}

/// `num / den`, treating an empty denominator as full saturation.
pub fn saturating_ratio(num: f64, den: f64) -> f64 {
    if den.abs() <= f64::EPSILON {
        1.0
    } else {
        num / den
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_radius_is_farthest_corner() {
        let f = DistanceField::new(TouchPoint { x: 0.5, y: 0.125 }, 400.0, 800.0);
        let expected = 200f64.hypot(700.0);
        assert!((f.reference_radius - expected).abs() < 1e-9);
        assert!((f.reference_radius - 728.0).abs() < 1.0);
        assert_eq!(f.max_edge_distance, 700.0);
    }

    #[test]
    fn sample_reports_touch_and_edge_distance() {
        let f = DistanceField::new(TouchPoint { x: 0.5, y: 0.5 }, 400.0, 800.0);
        let s = f.sample(10.0, 400.0);
        assert_eq!(s.edge_min_distance, 10.0);
        assert_eq!(s.touch_distance, 190.0);
        let c = f.sample(200.0, 400.0);
        assert_eq!(c.touch_distance, 0.0);
        assert_eq!(f.progress_toward_touch(&c), 1.0);
    }

    #[test]
    fn degenerate_surface_saturates() {
        let f = DistanceField::new(TouchPoint::default(), 0.0, 0.0);
        assert_eq!(f.reference_radius, 0.0);
        assert_eq!(f.max_edge_distance, 0.0);
        let s = f.sample(0.0, 0.0);
        assert_eq!(f.progress_toward_touch(&s), 1.0);
        assert_eq!(f.spread_progress(&s, 0.0), 1.0);
    }

    #[test]
    fn far_cells_clamp_toward_touch_at_zero() {
        let f = DistanceField::new(TouchPoint { x: 0.5, y: 0.5 }, 400.0, 800.0);
        let corner = f.sample(0.0, 0.0);
        assert!(corner.touch_distance > f.max_edge_distance);
        assert_eq!(f.progress_toward_touch(&corner), 0.0);
    }
}
