use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Interval;
use web_sys::{MouseEvent, TouchEvent};
use yew::prelude::*;

use super::time_display::TimeDisplay;
use crate::model::ReadoutPrecision;
use crate::state::tally::TAPS_TO_STOP;
use crate::state::{Fade, Readout, TapTally};
use crate::util::{clog, now_ms};

const EMULATED_MOUSE_WINDOW_MS: f64 = 800.0;
const READOUT_INTERVAL_MS: u32 = 100;

/// Runs frames only while the stop fade is in progress.
#[derive(Clone)]
struct FadeDriver {
    tally: Rc<RefCell<TapTally>>,
    frame: Rc<RefCell<Option<AnimationFrame>>>,
    fade: UseStateHandle<f64>,
}

impl FadeDriver {
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
        self.fade.set(self.tally.borrow().fade(now));
        if self.tally.borrow().wants_frame(now) {
            self.ensure_running();
        }
    }
}

fn indicator_style(lit: bool) -> &'static str {
    if lit {
        "width:0.75rem; height:0.75rem; border-radius:50%; background:#000; transform:scale(1); transition:all 300ms;"
    } else {
        "width:0.75rem; height:0.75rem; border-radius:50%; background:#d1d5db; transform:scale(0.75); transition:all 300ms;"
    }
}

#[function_component(EndView)]
pub fn end_view() -> Html {
    let tally = use_mut_ref(TapTally::new);
    let frame = use_mut_ref(|| None::<AnimationFrame>);
    let taps = use_state(|| 0_u32);
    let fade = use_state(|| 0.0_f64);
    let readout = use_state(Readout::now);
    let last_touch_ms = use_mut_ref(|| f64::NEG_INFINITY);

    let driver = FadeDriver {
        tally: tally.clone(),
        frame: frame.clone(),
        fade: fade.clone(),
    };

    // The readout follows the wall clock until the tally stops it.
    {
        let tally = tally.clone();
        let readout = readout.clone();
        let frame = frame.clone();
        use_effect_with((), move |_| {
            let ticker = Interval::new(READOUT_INTERVAL_MS, move || {
                if !tally.borrow().is_stopped() {
                    readout.set(Readout::now());
                }
            });
            move || {
                drop(ticker);
                frame.borrow_mut().take();
            }
        });
    }

    let tap = {
        let taps = taps.clone();
        move || {
            let now = now_ms();
            let mut tally = driver.tally.borrow_mut();
            if !tally.tap(now) {
                return;
            }
            taps.set(tally.count());
            if tally.is_stopped() {
                drop(tally);
                clog("clock stopped");
                driver.ensure_running();
            }
        }
    };
    let onclick = {
        let tap = tap.clone();
        let last_touch_ms = last_touch_ms.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if now_ms() - *last_touch_ms.borrow() >= EMULATED_MOUSE_WINDOW_MS {
                tap();
            }
        })
    };
    let ontouchstart = Callback::from(move |e: TouchEvent| {
        e.stop_propagation();
        *last_touch_ms.borrow_mut() = now_ms();
        tap();
    });

    let stopped = *taps >= TAPS_TO_STOP;
    let look = Fade(*fade);
    let vignette = stopped.then(|| {
        let style = format!("position:absolute; inset:0; pointer-events:none; {}", look.vignette());
        html! { <div style={style} /> }
    });
    let veil = if stopped {
        "opacity:0.7; transform:scale(0.95);"
    } else {
        "opacity:1; transform:scale(1);"
    };
    let indicators = (0..TAPS_TO_STOP).map(|i| html! {
        <div key={i} style={indicator_style(i < *taps)} />
    });

    html! {
        <div
            class="clock-container"
            style={format!("position:relative; width:100vw; height:100vh; background:#fff; display:flex; align-items:center; justify-content:center; cursor:pointer; user-select:none; -webkit-user-select:none; touch-action:manipulation; overflow:hidden; {}", look.filter())}
            onclick={onclick}
            ontouchstart={ontouchstart}
        >
            { for vignette }
            <div style="position:relative; z-index:10; display:flex; flex-direction:column; align-items:center; gap:2rem;">
                <TimeDisplay text={readout.format(ReadoutPrecision::Seconds)} veil_style={veil.to_string()} />
                <div style="display:flex; gap:0.75rem; opacity:0.6;">{ for indicators }</div>
            </div>
        </div>
    }
}
