use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use web_sys::{MouseEvent, TouchEvent};
use yew::prelude::*;

use crate::mask::JsGrain;
use crate::model::ReadoutPrecision;
use crate::state::{DilationFrame, Readout, TimeDilation};
use crate::util::now_ms;

const EMULATED_MOUSE_WINDOW_MS: f64 = 800.0;
const FONT: &str = "font-weight:700; font-family:'Orbitron', 'Courier New', monospace; letter-spacing:0.2em;";

/// Continuous frame loop: virtual time moves every frame, held or not.
#[derive(Clone)]
struct Runner {
    dilation: Rc<RefCell<TimeDilation>>,
    frame: Rc<RefCell<Option<AnimationFrame>>>,
    view: UseStateHandle<DilationFrame>,
}

impl Runner {
    fn schedule(&self) {
        let runner = self.clone();
        let handle = request_animation_frame(move |_| runner.step());
        *self.frame.borrow_mut() = Some(handle);
    }

    fn step(&self) {
        self.frame.borrow_mut().take();
        let next = self.dilation.borrow_mut().frame(now_ms(), &mut JsGrain);
        self.view.set(next);
        self.schedule();
    }
}

fn main_text_style(f: &DilationFrame) -> String {
    let shadow = if f.touching {
        format!(
            "{:.1}px 0 red, -{:.1}px 0 cyan, 0 0 {:.1}px rgba(0,0,0,0.3)",
            2.0 * f.fringe,
            2.0 * f.fringe,
            20.0 * f.fringe
        )
    } else {
        "0 0 20px rgba(0,0,0,0.3)".to_string()
    };
    format!(
        "position:relative; z-index:10; {FONT} font-size:clamp(2rem, 8vw, 6rem); width:90vw; text-align:left; transition:text-shadow 300ms; pointer-events:none; transform:{}; text-shadow:{};",
        f.shake.css(),
        shadow
    )
}

#[function_component(ResistanceView)]
pub fn resistance_view() -> Html {
    let dilation = use_mut_ref(|| TimeDilation::new(now_ms()));
    let frame = use_mut_ref(|| None::<AnimationFrame>);
    let view = {
        let dilation = dilation.clone();
        use_state(move || DilationFrame {
            display_ms: dilation.borrow().display_ms(),
            ..DilationFrame::default()
        })
    };
    let last_touch_ms = use_mut_ref(|| f64::NEG_INFINITY);

    {
        let runner = Runner {
            dilation: dilation.clone(),
            frame: frame.clone(),
            view: view.clone(),
        };
        use_effect_with((), move |_| {
            runner.schedule();
            move || {
                runner.frame.borrow_mut().take();
            }
        });
    }

    let press = {
        let dilation = dilation.clone();
        move || dilation.borrow_mut().press(now_ms())
    };
    let release = {
        let dilation = dilation.clone();
        move || dilation.borrow_mut().release(now_ms())
    };
    let onmousedown = {
        let press = press.clone();
        let last_touch_ms = last_touch_ms.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if now_ms() - *last_touch_ms.borrow() >= EMULATED_MOUSE_WINDOW_MS {
                press();
            }
        })
    };
    let onmouseup = {
        let release = release.clone();
        let last_touch_ms = last_touch_ms.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if now_ms() - *last_touch_ms.borrow() >= EMULATED_MOUSE_WINDOW_MS {
                release();
            }
        })
    };
    let ontouchstart = {
        let last_touch_ms = last_touch_ms.clone();
        Callback::from(move |e: TouchEvent| {
            e.stop_propagation();
            *last_touch_ms.borrow_mut() = now_ms();
            press();
        })
    };
    let ontouchend = {
        let last_touch_ms = last_touch_ms.clone();
        Callback::from(move |e: TouchEvent| {
            e.stop_propagation();
            *last_touch_ms.borrow_mut() = now_ms();
            release();
        })
    };

    let text = Readout::at(view.display_ms).format(ReadoutPrecision::Millis);
    let ghost = view.ghost.map(|g| {
        let style = format!(
            "position:absolute; z-index:5; {FONT} font-size:clamp(6rem, 24vw, 18rem); width:100vw; text-align:center; opacity:0.3; left:0; top:{:.2}vh; transform:{} translateY(-50%); text-shadow:8px 0 rgba(255,0,0,0.6), -8px 0 rgba(0,255,255,0.6), 4px 4px rgba(255,0,0,0.3), -4px -4px rgba(0,255,255,0.3), 0 0 40px rgba(0,0,0,0.3); pointer-events:none;",
            50.0 + g.offset_vh,
            g.shake.css()
        );
        html! { <div style={style}>{ text.clone() }</div> }
    });

    html! {
        <div
            class="clock-container"
            style="position:relative; width:100vw; height:100vh; background:#fff; display:flex; align-items:center; padding-left:10vw; box-sizing:border-box; cursor:pointer; user-select:none; -webkit-user-select:none; touch-action:none; overflow:hidden;"
            onmousedown={onmousedown}
            onmouseup={onmouseup.clone()}
            onmouseleave={onmouseup}
            ontouchstart={ontouchstart}
            ontouchend={ontouchend.clone()}
            ontouchcancel={ontouchend}
        >
            <div style={main_text_style(&view)}>{ text.clone() }</div>
            { for ghost }
        </div>
    }
}
