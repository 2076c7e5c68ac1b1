use super::progress::{Phase, ProgressClock};
use crate::mask::{self, GrainSource, MaskStats, Surface};
use crate::model::{ClockSignal, EffectConfig, TouchPoint};

/// Outcome of one repaint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub progress: f64,
    pub changed: bool,
    /// Progress just returned to zero; the readout may resume.
    pub unfrozen: bool,
    /// Whether another frame must be requested.
    pub keep_running: bool,
    pub stats: MaskStats,
}

/// Single owner of the effect state for one clock.
pub struct FrameLoop {
    config: EffectConfig,
    clock: ProgressClock,
    touch: TouchPoint,
    touching: bool,
}

impl FrameLoop {
    pub fn new(config: EffectConfig) -> Self {
        let clock = ProgressClock::new(config.expand_ms, config.retreat_ms);
        Self {
            config,
            clock,
            touch: TouchPoint::default(),
            touching: false,
        }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn progress(&self) -> f64 {
        self.clock.value()
    }

    #[cfg(test)]
    pub fn touch(&self) -> TouchPoint {
        self.touch
    }

    pub fn is_frozen(&self) -> bool {
        self.clock.is_frozen()
    }

    pub fn signal(&self) -> ClockSignal {
        ClockSignal {
            progress: self.clock.value(),
            touching: self.touching,
        }
    }

    /// Pointer down at surface-local pixels. Progress is brought up to `now_ms` before
    /// re-anchoring. Returns whether a frame should be requested.
    pub fn pointer_down(&mut self, px: f64, py: f64, width: f64, height: f64, now_ms: f64) -> bool {
        self.touch = TouchPoint::from_surface(px, py, width, height);
        self.touching = true;
        self.clock.tick(now_ms);
        self.clock.press(now_ms);
        self.wants_frame()
    }

    /// Pointer up or leave. Returns whether a frame should be requested.
    pub fn pointer_up(&mut self, now_ms: f64) -> bool {
        self.touching = false;
        if self.clock.phase() == Phase::Expanding {
            self.clock.tick(now_ms);
        }
        self.clock.release(now_ms);
        self.wants_frame()
    }

    /// Either the progress is still moving or the touch-point pulse is alive.
    pub fn wants_frame(&self) -> bool {
        self.clock.is_animating() || self.pulsing()
    }

    fn pulsing(&self) -> bool {
        match self.config.pulse {
            Some(p) => {
                self.touching
                    && self.clock.phase() == Phase::Expanding
                    && self.clock.value() > p.min_progress
            }
            None => false,
        }
    }

    /// Advances progress to `now_ms` and repaints the whole surface.
    pub fn frame(
        &mut self,
        now_ms: f64,
        surface: &mut impl Surface,
        grain: &mut impl GrainSource,
    ) -> FrameReport {
        let tick = self.clock.tick(now_ms);
        let stats = self.repaint(now_ms, surface, grain);
        FrameReport {
            progress: tick.value,
            changed: tick.changed,
            unfrozen: tick.unfrozen,
            keep_running: self.wants_frame(),
            stats,
        }
    }

    /// Advances progress when no surface is ready; the paint is skipped, the timing is not.
    pub fn skip(&mut self, now_ms: f64) -> FrameReport {
        let tick = self.clock.tick(now_ms);
        FrameReport {
            progress: tick.value,
            changed: tick.changed,
            unfrozen: tick.unfrozen,
            keep_running: self.wants_frame(),
            stats: MaskStats::default(),
        }
    }

    /// Repaint at the current progress without advancing it (after a resize).
    pub fn repaint(
        &self,
        now_ms: f64,
        surface: &mut impl Surface,
        grain: &mut impl GrainSource,
    ) -> MaskStats {
        mask::paint_mask(
            surface,
            &self.config,
            self.touch,
            self.clock.value(),
            now_ms * 0.001,
            grain,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::grain::testing::FixedGrain;
    use crate::mask::surface::testing::MemorySurface;

    fn run_until_idle(fl: &mut FrameLoop, start: f64, s: &mut MemorySurface) -> (f64, FrameReport) {
        let mut now = start;
        loop {
            now += 16.0;
            let r = fl.frame(now, s, &mut FixedGrain(0.5));
            if !r.keep_running {
                return (now, r);
            }
            assert!(now - start < 60_000.0, "loop never settled");
        }
    }

    #[test]
    fn point_law_stops_at_full_coverage() {
        let mut fl = FrameLoop::new(EffectConfig::moment());
        let mut s = MemorySurface::new(400, 800);
        assert!(fl.pointer_down(200.0, 100.0, 400.0, 800.0, 0.0));
        assert!(fl.signal().touching);
        let (stopped_at, last) = run_until_idle(&mut fl, 0.0, &mut s);
        assert_eq!(last.progress, 1.0);
        assert!(stopped_at >= 5000.0 && stopped_at < 5016.0 + 16.0);
        assert!(fl.is_frozen());
    }

    #[test]
    fn saturating_frame_reports_its_paint() {
        let mut fl = FrameLoop::new(EffectConfig::moment());
        let mut s = MemorySurface::new(400, 800);
        fl.pointer_down(200.0, 100.0, 400.0, 800.0, 0.0);
        let r = fl.frame(5000.0, &mut s, &mut FixedGrain(0.5));
        assert!(r.changed);
        assert_eq!(r.progress, fl.progress());
        assert_eq!(r.progress, 1.0);
        assert_eq!(r.stats.covered, r.stats.cells);
        assert_eq!(r.stats.covered, s.cells.len());
        assert_eq!(r.stats.tinted, s.tints.len());
    }

    #[test]
    fn edge_law_keeps_pulsing_while_held() {
        let mut fl = FrameLoop::new(EffectConfig::edge());
        let mut s = MemorySurface::new(120, 120);
        fl.pointer_down(60.0, 60.0, 120.0, 120.0, 0.0);
        let r = fl.frame(6000.0, &mut s, &mut FixedGrain(0.5));
        assert_eq!(r.progress, 1.0);
        assert!(r.keep_running);
        assert!(fl.frame(6016.0, &mut s, &mut FixedGrain(0.5)).keep_running);
        assert!(fl.pointer_up(6032.0));
        let (_, last) = run_until_idle(&mut fl, 6032.0, &mut s);
        assert_eq!(last.progress, 0.0);
        assert!(last.unfrozen);
        assert!(s.cells.is_empty(), "final pass clears the surface");
    }

    #[test]
    fn release_scenario_unfreezes_after_retreat() {
        let mut fl = FrameLoop::new(EffectConfig::moment());
        let mut s = MemorySurface::new(400, 800);
        fl.pointer_down(200.0, 100.0, 400.0, 800.0, 0.0);
        fl.frame(5000.0, &mut s, &mut FixedGrain(0.5));
        assert!(fl.pointer_up(5000.0));
        assert!(fl.is_frozen());
        let r = fl.frame(5600.0, &mut s, &mut FixedGrain(0.5));
        assert_eq!(r.progress, 0.0);
        assert!(r.unfrozen && !r.keep_running);
        assert!(!fl.is_frozen());
        assert_eq!(fl.signal(), ClockSignal { progress: 0.0, touching: false });
    }

    #[test]
    fn touch_point_survives_release() {
        let mut fl = FrameLoop::new(EffectConfig::moment());
        fl.pointer_down(100.0, 200.0, 400.0, 800.0, 0.0);
        fl.pointer_up(100.0);
        assert_eq!(fl.touch(), TouchPoint { x: 0.25, y: 0.25 });
    }

    #[test]
    fn stray_release_requests_nothing() {
        let mut fl = FrameLoop::new(EffectConfig::edge());
        assert!(!fl.pointer_up(10.0));
        assert!(!fl.wants_frame());
    }

    #[test]
    fn skipped_frames_still_settle() {
        let mut fl = FrameLoop::new(EffectConfig::moment());
        fl.pointer_down(1.0, 1.0, 10.0, 10.0, 0.0);
        fl.pointer_up(1000.0);
        let r = fl.skip(1050.0);
        assert!(r.progress > 0.0 && r.keep_running);
        let r = fl.skip(1500.0);
        assert_eq!(r.progress, 0.0);
        assert!(r.unfrozen && !r.keep_running);
        assert_eq!(r.stats, MaskStats::default());
    }

    #[test]
    fn repaint_does_not_advance_progress() {
        let mut fl = FrameLoop::new(EffectConfig::moment());
        let mut s = MemorySurface::new(90, 90);
        fl.pointer_down(45.0, 45.0, 90.0, 90.0, 0.0);
        fl.frame(2500.0, &mut s, &mut FixedGrain(0.5));
        let before = fl.progress();
        fl.repaint(9000.0, &mut s, &mut FixedGrain(0.5));
        assert_eq!(fl.progress(), before);
        assert_eq!(s.clears, 2);
    }
}
