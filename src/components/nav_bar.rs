use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NavBarProps {
    pub count: usize,
    pub current: usize,
    pub opacity: f64,
    pub show_intro: Callback<()>,
    pub select: Callback<usize>,
}

fn button_style(active: bool) -> &'static str {
    if active {
        "width:7vw; height:7vw; min-width:45px; min-height:45px; font-size:4vw; border:none; border-radius:50%; background:#000; color:#fff; font-weight:700; font-family:'Orbitron', 'Courier New', monospace; touch-action:manipulation;"
    } else {
        "width:5vw; height:5vw; min-width:35px; min-height:35px; font-size:3vw; border:none; border-radius:50%; background:#d1d5db; color:#4b5563; opacity:0.6; font-weight:700; font-family:'Orbitron', 'Courier New', monospace; touch-action:manipulation;"
    }
}

#[function_component]
pub fn NavBar(props: &NavBarProps) -> Html {
    let intro_cb = {
        let cb = props.show_intro.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let buttons = (0..props.count).map(|i| {
        let cb = props.select.clone();
        let onclick = Callback::from(move |_| cb.emit(i));
        html! {
            <button onclick={onclick} style={button_style(i == props.current)} aria-label={format!("Go to clock {}", i + 1)}>
                { (i + 1).to_string() }
            </button>
        }
    });
    let style = format!(
        "position:absolute; bottom:2rem; left:50%; transform:translateX(-50%); display:flex; gap:1.5rem; align-items:center; z-index:50; transition:opacity 300ms; opacity:{}; pointer-events:{};",
        props.opacity,
        if props.opacity > 0.0 { "auto" } else { "none" }
    );
    html! {<div style={style}>
        <button onclick={intro_cb} style={button_style(false)}>{"I"}</button>
        { for buttons }
    </div>}
}
