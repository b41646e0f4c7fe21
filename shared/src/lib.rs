//! Race client core: wire types, API gateway, selection session, views and
//! the race orchestrator. Nothing in here touches the DOM.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod orchestrator;
pub mod protocol;
pub mod render;
pub mod session;
pub mod standings;

pub use api::{HttpApi, RaceApi};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, RaceError, SelectionError};
pub use orchestrator::{CancelToken, Orchestrator, RaceOutcome, RenderSink, Timer};
pub use session::{Category, Session};
