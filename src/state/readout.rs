use crate::model::ReadoutPrecision;
use wasm_bindgen::JsValue;

/// Wall-clock fields shown by the clock text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Readout {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

impl Readout {
    /// Local time now, from the browser clock.
    pub fn now() -> Self {
        Self::at(js_sys::Date::now())
    }

    /// Local time of an epoch timestamp in milliseconds.
    pub fn at(epoch_ms: f64) -> Self {
        let d = js_sys::Date::new(&JsValue::from_f64(epoch_ms));
        Self {
            hours: d.get_hours(),
            minutes: d.get_minutes(),
            seconds: d.get_seconds(),
            millis: d.get_milliseconds(),
        }
    }

    pub fn format(&self, precision: ReadoutPrecision) -> String {
        match precision {
            ReadoutPrecision::Seconds => {
                format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
            }
            ReadoutPrecision::Centis => format!(
                "{:02}:{:02}:{:02}.{:02}",
                self.hours,
                self.minutes,
                self.seconds,
                self.millis / 10
            ),
            ReadoutPrecision::Millis => format!(
                "{:02}:{:02}:{:02}.{:03}",
                self.hours, self.minutes, self.seconds, self.millis
            ),
        }
    }
}

/// Opacity and blur of the clock text for a given darkness progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextVeil {
    pub opacity: f64,
    pub blur_px: f64,
}

impl TextVeil {
    pub fn for_progress(progress: f64) -> Self {
        let p = super::progress::clamp_unit(progress);
        let opacity = if p > 0.7 { 1.0 - (p - 0.7) / 0.3 } else { 1.0 };
        let blur_px = if p > 0.5 { (p - 0.5) * 10.0 } else { 0.0 };
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            blur_px,
        }
    }

    pub fn style(&self) -> String {
        let filter = if self.blur_px > 0.0 {
            format!("blur({:.2}px)", self.blur_px)
        } else {
            "none".to_string()
        };
        format!("opacity:{:.3}; filter:{};", self.opacity, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_every_precision() {
        let r = Readout { hours: 7, minutes: 5, seconds: 9, millis: 987 };
        assert_eq!(r.format(ReadoutPrecision::Seconds), "07:05:09");
        assert_eq!(r.format(ReadoutPrecision::Centis), "07:05:09.98");
        assert_eq!(r.format(ReadoutPrecision::Millis), "07:05:09.987");
        let z = Readout::default();
        assert_eq!(z.format(ReadoutPrecision::Centis), "00:00:00.00");
        let early = Readout { millis: 7, ..z };
        assert_eq!(early.format(ReadoutPrecision::Millis), "00:00:00.007");
    }

    #[test]
    fn veil_fades_late_and_blurs_past_half() {
        let clear = TextVeil::for_progress(0.4);
        assert_eq!(clear, TextVeil { opacity: 1.0, blur_px: 0.0 });
        assert_eq!(clear.style(), "opacity:1.000; filter:none;");
        let mid = TextVeil::for_progress(0.6);
        assert_eq!(mid.opacity, 1.0);
        assert!((mid.blur_px - 1.0).abs() < 1e-9);
        let full = TextVeil::for_progress(1.0);
        assert!(full.opacity.abs() < 1e-9);
        assert_eq!(full.blur_px, 5.0);
        assert_eq!(TextVeil::for_progress(7.0), full);
    }
}
