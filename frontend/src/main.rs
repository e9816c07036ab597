use log::{info, Level};
use yew::prelude::*;

use thafheem_frontend::pages::landing::Landing;

#[function_component]
fn App() -> Html {
    info!("Rendering Landing page");
    html! {
        <Landing />
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
