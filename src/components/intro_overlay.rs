use yew::prelude::*;

const TITLE: &str = "Time Series";
const BLURB: &str = "This is an interactive artwork in the scope of the Presentists movement. Touch one of the buttons below and try to stop the present moment.";
const CREDIT: &str = "Sasha Pashkov · 2025";

#[derive(Properties, PartialEq, Clone)]
pub struct IntroOverlayProps {
    pub show: bool,
    pub titles: Vec<String>,
    pub select: Callback<usize>,
}

#[function_component(IntroOverlay)]
pub fn intro_overlay(props: &IntroOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let buttons = props.titles.iter().enumerate().map(|(i, title)| {
        let cb = props.select.clone();
        let onclick = Callback::from(move |_| cb.emit(i));
        html! {
            <button onclick={onclick} title={title.clone()} aria-label={format!("Go to clock {}", i + 1)}
                style="width:5vw; height:5vw; min-width:35px; min-height:35px; font-size:3vw; border:none; border-radius:50%; background:#d1d5db; color:#4b5563; opacity:0.6; font-weight:700; font-family:'Orbitron', 'Courier New', monospace; touch-action:manipulation;">
                { (i + 1).to_string() }
            </button>
        }
    });
    html! {
        <div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:#fff; z-index:50;">
            <div style="display:flex; flex-direction:column; align-items:center; text-align:center;">
                <h1 style="font-size:2.25rem; font-weight:300; letter-spacing:0.05em; margin:0 0 2rem 0; font-family:'Orbitron', 'Courier New', monospace;">{ TITLE }</h1>
                <p style="max-width:22ch; margin:0 auto 1.5rem auto; color:#374151; font-style:italic; line-height:1.3;">
                    { BLURB }
                </p>
                <p style="font-size:0.875rem; color:#6b7280; margin:0 0 2rem 0;">{ CREDIT }</p>
                <div style="display:flex; gap:1.5rem;">{ for buttons }</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intro_copy_is_the_artwork_text() {
        assert_eq!(TITLE, "Time Series");
        assert!(BLURB.starts_with("This is an interactive artwork in the scope of the Presentists movement."));
        assert!(BLURB.ends_with("try to stop the present moment."));
        assert_eq!(CREDIT, "Sasha Pashkov · 2025");
    }
}
