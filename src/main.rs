mod components;
mod mask;
mod model;
mod state;
mod util;

fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<components::App>::new().render();
}
