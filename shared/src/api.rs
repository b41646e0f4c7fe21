//! Race API gateway.
//!
//! `RaceApi` is the seam the orchestrator is written against; `HttpApi` is the
//! real implementation over `reqwest`, which uses `fetch` when built for wasm.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::protocol::{CreateRace, Race, RaceStatus, Racer, Track};

#[allow(async_fn_in_trait)]
pub trait RaceApi {
    async fn tracks(&self) -> Result<Vec<Track>, ApiError>;
    async fn racers(&self) -> Result<Vec<Racer>, ApiError>;
    async fn create_race(&self, player_id: u32, track_id: u32) -> Result<Race, ApiError>;
    async fn race(&self, race_id: u32) -> Result<RaceStatus, ApiError>;
    async fn start_race(&self, race_id: u32) -> Result<(), ApiError>;
    async fn accelerate(&self, race_id: u32) -> Result<(), ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base: String,
}

impl HttpApi {
    pub fn new(base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&url, e))?;
        decode(&url, response).await
    }

    async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&url, e))?;
        check_status(&url, &response)
    }
}

fn check_status(url: &str, response: &reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status {
            url: url.to_owned(),
            status: status.as_u16(),
        })
    }
}

async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T, ApiError> {
    check_status(url, &response)?;
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::from_reqwest(url, e))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        url: url.to_owned(),
        message: e.to_string(),
    })
}

impl RaceApi for HttpApi {
    async fn tracks(&self) -> Result<Vec<Track>, ApiError> {
        self.get_json("/api/tracks").await
    }

    async fn racers(&self) -> Result<Vec<Racer>, ApiError> {
        self.get_json("/api/cars").await
    }

    async fn create_race(&self, player_id: u32, track_id: u32) -> Result<Race, ApiError> {
        let url = self.url("/api/races");
        let response = self
            .client
            .post(&url)
            .json(&CreateRace { player_id, track_id })
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&url, e))?;
        decode(&url, response).await
    }

    async fn race(&self, race_id: u32) -> Result<RaceStatus, ApiError> {
        self.get_json(&format!("/api/races/{race_id}")).await
    }

    async fn start_race(&self, race_id: u32) -> Result<(), ApiError> {
        self.post_empty(&format!("/api/races/{race_id}/start")).await
    }

    async fn accelerate(&self, race_id: u32) -> Result<(), ApiError> {
        self.post_empty(&format!("/api/races/{race_id}/accelerate")).await
    }
}
