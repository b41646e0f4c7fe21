mod app;
mod dom;
mod logging;

use std::rc::Rc;

use app::App;
use shared::{HttpApi, Orchestrator, Session};
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// the test runner mounts nothing; dom tests build their own nodes
#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    leptos::mount::mount_to_body(App);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        error!("no document to attach to");
        return;
    };

    let config = dom::load_config(&document);
    info!(api = %config.api_base, "racer client starting");
    let client = Rc::new(Orchestrator::new(
        HttpApi::new(&config.api_base),
        dom::DomSink::new(document.clone()),
        dom::BrowserTimer,
        config,
    ));
    let session = Rc::new(Session::new());

    if let Err(e) = dom::install_handlers(&document, session, Rc::clone(&client)) {
        error!(error = ?e, "failed to install click handlers");
        return;
    }

    // only the race page has the catalog containers
    if matches!(document.query_selector("#tracks"), Ok(Some(_))) {
        spawn_local(async move {
            if let Err(e) = client.load_catalog().await {
                warn!(error = %e, "problem getting tracks and racers");
            }
        });
    }
}
