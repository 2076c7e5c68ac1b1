use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TimeDisplayProps {
    pub text: String,
    /// Opacity and blur derived from the darkness progress.
    pub veil_style: String,
}

#[function_component(TimeDisplay)]
pub fn time_display(props: &TimeDisplayProps) -> Html {
    let style = format!(
        "position:relative; z-index:10; font-weight:700; font-size:clamp(2rem, 12vw, 10rem); font-family:'Orbitron', 'Courier New', monospace; letter-spacing:0.2em; max-width:90vw; text-shadow:0 0 20px rgba(0,0,0,0.3); transition:opacity 300ms, filter 300ms; pointer-events:none; {}",
        props.veil_style
    );
    html! {<div style={style}>{ props.text.clone() }</div>}
}
