use super::{
    clock_view::ClockView, end_view::EndView, intro_overlay::IntroOverlay, nav_bar::NavBar,
    resistance_view::ResistanceView,
};
use crate::model::{ChromeAction, ChromeState, ClockKind, ClockSignal};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let clocks = use_memo((), |_| ClockKind::lineup());
    let chrome = {
        let count = clocks.len();
        use_reducer(move || ChromeState::new(count))
    };

    // Arrow keys step between clocks.
    {
        let chrome = chrome.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "keydown", move |e| {
                    let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    match e.key().as_str() {
                        "ArrowRight" => chrome.dispatch(ChromeAction::Next),
                        "ArrowLeft" => chrome.dispatch(ChromeAction::Prev),
                        _ => {}
                    }
                })
            });
            move || drop(listener)
        });
    }

    let select = {
        let chrome = chrome.clone();
        Callback::from(move |i: usize| chrome.dispatch(ChromeAction::Select(i)))
    };
    let show_intro = {
        let chrome = chrome.clone();
        Callback::from(move |_| chrome.dispatch(ChromeAction::ShowIntro))
    };
    let on_signal = {
        let chrome = chrome.clone();
        let index = chrome.current;
        Callback::from(move |signal: ClockSignal| {
            chrome.dispatch(ChromeAction::Signal { index, signal })
        })
    };

    let titles: Vec<String> = clocks.iter().map(|c| c.title().to_string()).collect();
    let content = if chrome.show_intro {
        html! {}
    } else {
        match &clocks[chrome.current] {
            ClockKind::Darkness(config) => html! {
                <ClockView key={chrome.current} config={config.clone()} on_signal={on_signal} />
            },
            ClockKind::Resistance => html! { <ResistanceView key={chrome.current} /> },
            ClockKind::End => html! { <EndView key={chrome.current} /> },
        }
    };

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#fff;">
            { content }
            <IntroOverlay show={chrome.show_intro} titles={titles} select={select.clone()} />
            <NavBar
                count={clocks.len()}
                current={chrome.current}
                opacity={chrome.nav_opacity()}
                show_intro={show_intro}
                select={select}
            />
        </div>
    }
}
