use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

// Static page shell. The race page's dynamic parts (#tracks, #racers, #race)
// are filled by the render sink, so nothing here is reactive.

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <h1>"Page not found"</h1> }>
                <Route path=path!("/") view=Home/>
                <Route path=path!("/race") view=RacePage/>
            </Routes>
        </Router>
    }
}

#[component]
fn Home() -> impl IntoView {
    view! {
        <header>
            <h1>"Welcome to the Racer Simulator"</h1>
        </header>
        <main>
            <section>
                <p>"Pick a track, pick a racer, then click the pedal as fast as you can."</p>
                <a class="button" href="/race" rel="external">"Start a race"</a>
            </section>
        </main>
    }
}

#[component]
fn RacePage() -> impl IntoView {
    view! {
        <div id="race">
            <header>
                <h1>"Create a race"</h1>
            </header>
            <main>
                <section>
                    <h2>"Select a track"</h2>
                    <div id="tracks">
                        <h4>"Loading Tracks..."</h4>
                    </div>
                </section>
                <section>
                    <h2>"Select a racer"</h2>
                    <div id="racers">
                        <h4>"Loading Racers..."</h4>
                    </div>
                </section>
                <button id="submit-create-race" type="button">"Start race"</button>
            </main>
        </div>
    }
}
