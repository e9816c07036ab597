use yew::prelude::*;

use crate::components::donation::DonationSection;

#[function_component(Landing)]
pub fn landing() -> Html {
    // Scroll to top only on initial mount
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    html! {
        <div class="landing-page">
            <header class="hero">
                <h1>{"Thafheemul Quran"}</h1>
                <p>{"Read, listen and reflect on the Quran with translation and commentary."}</p>
                <a class="hero-cta" href="#donate">{"Support the project"}</a>
            </header>
            <main>
                <DonationSection />
            </main>
            <footer class="footer">
                <p>{"© Thafheemul Quran"}</p>
            </footer>
        </div>
    }
}
