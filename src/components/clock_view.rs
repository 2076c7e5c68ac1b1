use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Interval;
use web_sys::{Element, HtmlCanvasElement, MouseEvent, TouchEvent};
use yew::prelude::*;

use super::time_display::TimeDisplay;
use crate::mask::{CanvasSurface, JsGrain};
use crate::model::{ClockSignal, EffectConfig};
use crate::state::{FrameLoop, FrameReport, Readout, TextVeil};
use crate::util::{clog, cwarn, now_ms};

/// Mouse events this soon after a touch are the browser's emulation of it.
const EMULATED_MOUSE_WINDOW_MS: f64 = 800.0;
const READOUT_INTERVAL_MS: u32 = 100;

#[derive(Properties, PartialEq, Clone)]
pub struct ClockViewProps {
    pub config: EffectConfig,
    pub on_signal: Callback<ClockSignal>,
}

/// Handles shared by pointer callbacks, the frame callback and teardown.
#[derive(Clone)]
struct Driver {
    canvas: NodeRef,
    engine: Rc<RefCell<FrameLoop>>,
    /// Pending frame; `Some` is the "animation active" flag.
    frame: Rc<RefCell<Option<AnimationFrame>>>,
    progress: UseStateHandle<f64>,
    readout: UseStateHandle<Readout>,
    on_signal: Callback<ClockSignal>,
    /// Set once a skipped frame has been reported; cleared by the next good frame.
    warned: Rc<RefCell<bool>>,
}

impl Driver {
    fn ensure_running(&self) {
        if self.frame.borrow().is_some() {
            return;
        }
        let driver = self.clone();
        let handle = request_animation_frame(move |_| driver.step());
        *self.frame.borrow_mut() = Some(handle);
    }

    fn step(&self) {
        self.frame.borrow_mut().take();
        let now = now_ms();
        let report = self.paint(now);
        if report.changed {
            self.progress.set(self.engine.borrow().progress());
            if report.progress >= 1.0 {
                let s = report.stats;
                clog(&format!(
                    "darkness saturated: {}/{} cells covered, {} tinted",
                    s.covered, s.cells, s.tinted
                ));
            }
            self.publish();
        }
        if report.unfrozen {
            self.readout.set(Readout::now());
        }
        if report.keep_running {
            self.ensure_running();
        }
    }

    fn paint(&self, now: f64) -> FrameReport {
        let mut engine = self.engine.borrow_mut();
        let attached = self
            .canvas
            .cast::<HtmlCanvasElement>()
            .ok_or(crate::mask::SurfaceError::Detached)
            .and_then(|c| CanvasSurface::attach(&c));
        match attached {
            Ok(mut surface) => {
                *self.warned.borrow_mut() = false;
                engine.frame(now, &mut surface, &mut JsGrain)
            }
            Err(e) => {
                if !std::mem::replace(&mut *self.warned.borrow_mut(), true) {
                    cwarn(&format!("frame skipped: {}", e));
                }
                engine.skip(now)
            }
        }
    }

    fn repaint(&self) {
        let Some(canvas) = self.canvas.cast::<HtmlCanvasElement>() else {
            return;
        };
        if let Ok(mut surface) = CanvasSurface::attach(&canvas) {
            self.engine
                .borrow()
                .repaint(now_ms(), &mut surface, &mut JsGrain);
        }
    }

    fn press(&self, px: f64, py: f64, width: f64, height: f64) {
        let wants = self
            .engine
            .borrow_mut()
            .pointer_down(px, py, width, height, now_ms());
        self.publish();
        if wants {
            self.ensure_running();
        }
    }

    fn release(&self) {
        let wants = self.engine.borrow_mut().pointer_up(now_ms());
        self.publish();
        if wants {
            self.ensure_running();
        }
    }

    fn publish(&self) {
        let signal = self.engine.borrow().signal();
        self.on_signal.emit(signal);
    }
}

fn fit_canvas_to_window(canvas: &HtmlCanvasElement) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
}

/// Client coordinates mapped onto the canvas, plus the canvas's on-screen size.
fn local_point(canvas: &NodeRef, client_x: f64, client_y: f64) -> Option<(f64, f64, f64, f64)> {
    let rect = canvas.cast::<Element>()?.get_bounding_client_rect();
    Some((
        client_x - rect.left(),
        client_y - rect.top(),
        rect.width(),
        rect.height(),
    ))
}

#[function_component(ClockView)]
pub fn clock_view(props: &ClockViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let engine = {
        let config = props.config.clone();
        use_mut_ref(move || FrameLoop::new(config))
    };
    let frame = use_mut_ref(|| None::<AnimationFrame>);
    let warned = use_mut_ref(|| false);
    let progress = use_state(|| 0.0_f64);
    let readout = use_state(Readout::now);
    let last_touch_ms = use_mut_ref(|| f64::NEG_INFINITY);

    let driver = Driver {
        canvas: canvas_ref.clone(),
        engine: engine.clone(),
        frame: frame.clone(),
        progress: progress.clone(),
        readout: readout.clone(),
        on_signal: props.on_signal.clone(),
        warned: warned.clone(),
    };

    // Mount: size the canvas, follow window resizes, sample the wall clock at 10 Hz.
    {
        let driver = driver.clone();
        let engine = engine.clone();
        let readout = readout.clone();
        use_effect_with((), move |_| {
            if let Some(canvas) = driver.canvas.cast::<HtmlCanvasElement>() {
                fit_canvas_to_window(&canvas);
            }
            if let Ok(json) = serde_json::to_string(driver.engine.borrow().config()) {
                clog(&format!("clock mounted: {}", json));
            }
            let resize = web_sys::window().map(|window| {
                let driver = driver.clone();
                EventListener::new(&window, "resize", move |_| {
                    if let Some(canvas) = driver.canvas.cast::<HtmlCanvasElement>() {
                        fit_canvas_to_window(&canvas);
                    }
                    driver.repaint();
                })
            });
            let ticker = Interval::new(READOUT_INTERVAL_MS, move || {
                if !engine.borrow().is_frozen() {
                    readout.set(Readout::now());
                }
            });
            move || {
                drop(ticker);
                drop(resize);
                driver.frame.borrow_mut().take();
            }
        });
    }

    let onmousedown = {
        let driver = driver.clone();
        let last_touch_ms = last_touch_ms.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if now_ms() - *last_touch_ms.borrow() < EMULATED_MOUSE_WINDOW_MS {
                return;
            }
            if let Some((x, y, w, h)) =
                local_point(&driver.canvas, e.client_x() as f64, e.client_y() as f64)
            {
                driver.press(x, y, w, h);
            }
        })
    };
    let onmouseup = {
        let driver = driver.clone();
        let last_touch_ms = last_touch_ms.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if now_ms() - *last_touch_ms.borrow() < EMULATED_MOUSE_WINDOW_MS {
                return;
            }
            driver.release();
        })
    };
    let ontouchstart = {
        let driver = driver.clone();
        let last_touch_ms = last_touch_ms.clone();
        Callback::from(move |e: TouchEvent| {
            e.stop_propagation();
            *last_touch_ms.borrow_mut() = now_ms();
            let Some(t0) = e.touches().item(0) else {
                return;
            };
            if let Some((x, y, w, h)) =
                local_point(&driver.canvas, t0.client_x() as f64, t0.client_y() as f64)
            {
                driver.press(x, y, w, h);
            }
        })
    };
    let ontouchend = {
        let driver = driver.clone();
        let last_touch_ms = last_touch_ms.clone();
        Callback::from(move |e: TouchEvent| {
            e.stop_propagation();
            *last_touch_ms.borrow_mut() = now_ms();
            driver.release();
        })
    };

    let veil = TextVeil::for_progress(*progress);
    let text = readout.format(props.config.precision);

    html! {
        <div
            class="clock-container"
            style="position:relative; width:100vw; height:100vh; background:#fff; display:flex; align-items:center; justify-content:center; cursor:pointer; user-select:none; -webkit-user-select:none; touch-action:none; overflow:hidden;"
            onmousedown={onmousedown}
            onmouseup={onmouseup.clone()}
            onmouseleave={onmouseup}
            ontouchstart={ontouchstart}
            ontouchend={ontouchend.clone()}
            ontouchcancel={ontouchend}
        >
            <canvas
                ref={canvas_ref}
                style="position:absolute; top:0; left:0; width:100%; height:100%; pointer-events:none;"
            />
            <TimeDisplay text={text} veil_style={veil.style()} />
        </div>
    }
}
