use std::rc::Rc;
use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use shared::events::{classify, ClickAction, ClickTarget, Hit};
use shared::{
    Category, ClientConfig, HttpApi, Orchestrator, RaceError, RaceOutcome, RenderSink,
    Session, Timer,
};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event};

pub type Client = Orchestrator<HttpApi, DomSink, BrowserTimer>;

/// Writes markup into the first element matching a selector.
pub struct DomSink {
    document: Document,
}

impl DomSink {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl RenderSink for DomSink {
    fn render_at(&self, target: &str, html: &str) {
        match self.document.query_selector(target) {
            Ok(Some(node)) => node.set_inner_html(html),
            Ok(None) => warn!(target, "render target not on the page"),
            Err(e) => warn!(target, error = ?e, "invalid render target"),
        }
    }
}

pub struct BrowserTimer;

impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

/// Read the JSON block `<script id="racer-config" type="application/json">`.
/// A missing or broken block falls back to the defaults.
pub fn load_config(document: &Document) -> ClientConfig {
    let Some(script) = document.get_element_by_id("racer-config") else {
        return ClientConfig::default();
    };
    let text = script.text_content().unwrap_or_default();
    match ClientConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "using default client config");
            ClientConfig::default()
        }
    }
}

/// Global click delegation plus cancellation of the running race on
/// `pagehide`. Each race gets its own token from the session, so a page
/// restored from the back/forward cache can race again.
pub fn install_handlers(document: &Document, session: Rc<Session>, client: Rc<Client>) -> Result<(), JsValue> {
    let doc = document.clone();
    let click_session = Rc::clone(&session);
    let on_click = Closure::wrap(Box::new(move |event: Event| {
        handle_click(&doc, &event, &click_session, &client);
    }) as Box<dyn FnMut(_)>);
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    if let Some(window) = web_sys::window() {
        let on_leave = Closure::wrap(Box::new(move |_: Event| {
            session.cancel_race();
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("pagehide", on_leave.as_ref().unchecked_ref())?;
        on_leave.forget();
    }
    Ok(())
}

pub(crate) fn click_target(element: &Element) -> ClickTarget {
    ClickTarget::new(element.id(), &element.class_name())
}

fn handle_click(
    document: &Document,
    event: &Event,
    session: &Rc<Session>,
    client: &Rc<Client>,
) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    let parent = target.parent_element();
    let parent_target = parent.as_ref().map(click_target);

    match classify(&click_target(&target), parent_target.as_ref()) {
        Some(ClickAction::Select { category, hit, id }) => {
            let card = match hit {
                Hit::Target => Some(&target),
                Hit::Parent => parent.as_ref(),
            };
            if let Some(card) = card {
                select_card(document, session, category, card, &id);
            }
        }
        Some(ClickAction::CreateRace) => {
            event.prevent_default();
            let session = Rc::clone(session);
            let client = Rc::clone(client);
            let cancel = session.race_token();
            spawn_local(async move {
                match client.run(&session, &cancel).await {
                    Ok(RaceOutcome::Finished { positions, polls }) => {
                        info!(racers = positions.len(), polls, "race finished");
                    }
                    Ok(RaceOutcome::Cancelled { polls }) => info!(polls, "race polling cancelled"),
                    Ok(RaceOutcome::GaveUp { polls }) => warn!(polls, "stopped waiting for the race to finish"),
                    Err(RaceError::MissingSelection) => debug!("create race clicked without a track and racer"),
                    Err(e) => warn!(error = %e, "problem creating race"),
                }
            });
        }
        Some(ClickAction::Accelerate) => {
            let session = Rc::clone(session);
            let client = Rc::clone(client);
            spawn_local(async move {
                if let Err(e) = client.accelerate(&session).await {
                    warn!(error = %e, "problem with accelerate request");
                }
            });
        }
        None => {}
    }
}

/// Record the card's id in the session, then move the `selected` class to
/// it. A card whose id does not parse keeps the previous selection intact.
pub(crate) fn select_card(document: &Document, session: &Session, category: Category, card: &Element, id: &str) {
    let id = match session.select(category, id) {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, "ignoring card selection");
            return;
        }
    };
    let selector = format!("{} .selected", category.container());
    match document.query_selector(&selector) {
        Ok(Some(previous)) => {
            if let Err(e) = previous.class_list().remove_1("selected") {
                warn!(error = ?e, "could not clear previous selection");
            }
        }
        Ok(None) => {}
        Err(e) => warn!(selector, error = ?e, "invalid selection selector"),
    }
    if let Err(e) = card.class_list().add_1("selected") {
        warn!(error = ?e, "could not mark card as selected");
    }
    debug!(?category, id, "selection changed");
}
