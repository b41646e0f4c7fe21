use std::{
    env,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use axum::Router;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DIST: &str = "web/dist";

/// Where to listen and which Trunk build to serve.
#[derive(Debug, PartialEq)]
struct HostConfig {
    addr: SocketAddr,
    dist: PathBuf,
}

impl HostConfig {
    /// `CLIENT_ADDR` and `CLIENT_DIST`, read after loading `.env` if present.
    fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(env::var("CLIENT_ADDR").ok(), env::var("CLIENT_DIST").ok())
    }

    fn from_vars(addr: Option<String>, dist: Option<String>) -> anyhow::Result<Self> {
        let addr = addr.unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse()
            .with_context(|| format!("CLIENT_ADDR {addr:?} is not a socket address"))?;
        let dist = PathBuf::from(dist.unwrap_or_else(|| DEFAULT_DIST.to_string()));
        Ok(Self { addr, dist })
    }
}

/// Static files from `dist`; any unknown path (`/`, `/race`) gets the SPA
/// entry point so the client router can take over.
fn app(dist: &Path) -> Router {
    let spa = ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")));
    Router::new()
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = HostConfig::from_env()?;
    if !config.dist.join("index.html").exists() {
        tracing::warn!(dist = %config.dist.display(), "no index.html found; build the client with `trunk build` first");
    }

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, dist = %config.dist.display(), "serving racer client");

    axum::serve(listener, app(&config.dist)).await?;
    Ok(())
}
