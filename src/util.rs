// Console helpers

pub fn clog(msg: &str) {
    gloo::console::log!(msg);
}

pub fn cwarn(msg: &str) {
    gloo::console::warn!(msg);
}

/// Milliseconds since the epoch; shared clock for pointer events and frames.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
