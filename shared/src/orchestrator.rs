//! Race orchestration: create a race, count down, start it, then poll its
//! status until the server reports it finished.
//!
//! The orchestrator only talks to its three collaborators (`RaceApi`,
//! `RenderSink`, `Timer`) and the `Session` it is handed, so the whole flow
//! runs the same against the browser or against test doubles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rust_fsm::StateMachineImpl;
use tracing::{debug, info, warn};

use crate::api::RaceApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, RaceError};
use crate::fsm::{PollEvent, PollState};
use crate::protocol::{Position, Progress};
use crate::render::{
    render_race_progress, render_race_start_view, render_racer_cards, render_results_view,
    render_track_cards, ViewContext,
};
use crate::session::Session;

/// Replaces the content of `target` with `html`.
pub trait RenderSink {
    fn render_at(&self, target: &str, html: &str);
}

#[allow(async_fn_in_trait)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// Stops a running poll loop at its next tick.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RaceOutcome {
    Finished { positions: Vec<Position>, polls: u32 },
    Cancelled { polls: u32 },
    GaveUp { polls: u32 },
}

pub struct Orchestrator<A, S, T> {
    api: A,
    sink: S,
    timer: T,
    config: ClientConfig,
}

impl<A: RaceApi, S: RenderSink, T: Timer> Orchestrator<A, S, T> {
    pub fn new(api: A, sink: S, timer: T, config: ClientConfig) -> Self {
        Self {
            api,
            sink,
            timer,
            config,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fill `#tracks` and `#racers`. Both requests are attempted; the first
    /// failure is returned and its list keeps the loading placeholder.
    pub async fn load_catalog(&self) -> Result<(), ApiError> {
        let tracks = self.api.tracks().await.map(|tracks| {
            debug!(count = tracks.len(), "tracks loaded");
            self.sink.render_at("#tracks", &render_track_cards(&tracks));
        });
        let racers = self.api.racers().await.map(|racers| {
            debug!(count = racers.len(), "racers loaded");
            self.sink.render_at("#racers", &render_racer_cards(&racers));
        });
        tracks.and(racers)
    }

    pub async fn accelerate(&self, session: &Session) -> Result<(), RaceError> {
        let race_id = session.race_id().ok_or(RaceError::NoActiveRace)?;
        self.api.accelerate(race_id).await?;
        Ok(())
    }

    /// Drive one race from creation to the results screen.
    ///
    /// Requires a track and a racer in `session`. Only one race may run per
    /// session at a time. `cancel` belongs to this run; an already tripped
    /// token stops it before anything is sent.
    pub async fn run(&self, session: &Session, cancel: &CancelToken) -> Result<RaceOutcome, RaceError> {
        let (Some(player_id), Some(track_id)) = (session.player_id(), session.track_id()) else {
            return Err(RaceError::MissingSelection);
        };
        let _slot = session.begin_race().ok_or(RaceError::AlreadyRunning)?;
        if cancel.is_cancelled() {
            debug!("race cancelled before creation");
            return Ok(RaceOutcome::Cancelled { polls: 0 });
        }

        let race = self.api.create_race(player_id, track_id).await?;
        let race_id = race
            .id
            .checked_sub(self.config.race_id_offset)
            .ok_or(RaceError::InvalidRaceId(race.id))?;
        session.set_race(race_id, race.track.segments.len());
        info!(
            race_id,
            server_id = race.id,
            track = %race.track.name,
            segments = race.track.segments.len(),
            "race created"
        );

        self.sink.render_at(
            "#race",
            &render_race_start_view(&race.track, self.config.countdown_from),
        );
        self.countdown().await;
        if cancel.is_cancelled() {
            info!(race_id, "race cancelled during countdown");
            return Ok(RaceOutcome::Cancelled { polls: 0 });
        }

        if let Err(e) = self.api.start_race(race_id).await {
            warn!(race_id, error = %e, "problem starting race");
        }

        Ok(self.poll(session, race_id, cancel).await)
    }

    async fn countdown(&self) {
        self.timer.sleep(self.config.countdown_delay()).await;
        let mut remaining = self.config.countdown_from;
        while remaining > 0 {
            self.timer.sleep(self.config.countdown_tick()).await;
            remaining -= 1;
            self.sink.render_at("#big-numbers", &remaining.to_string());
        }
    }

    async fn poll(&self, session: &Session, race_id: u32, cancel: &CancelToken) -> RaceOutcome {
        let mut state = PollState::INITIAL_STATE;
        let mut polls = 0u32;
        let mut outcome = RaceOutcome::Cancelled { polls };

        while !state.is_terminal() {
            let event = if cancel.is_cancelled() {
                outcome = RaceOutcome::Cancelled { polls };
                PollEvent::Abandon
            } else if matches!(self.config.max_poll_attempts, Some(max) if polls >= max) {
                warn!(race_id, polls, "giving up on race status");
                outcome = RaceOutcome::GaveUp { polls };
                PollEvent::Abandon
            } else {
                self.timer.sleep(self.config.poll_interval()).await;
                if cancel.is_cancelled() {
                    continue;
                }
                polls += 1;
                let status = match self.api.race(race_id).await {
                    Ok(status) => status,
                    Err(e) => {
                        warn!(race_id, polls, error = %e, "problem getting race info");
                        continue;
                    }
                };
                let ctx = self.view_context(session);
                match status.status {
                    Progress::Finished => {
                        self.sink
                            .render_at("#race", &render_results_view(&status.positions, &ctx));
                        outcome = RaceOutcome::Finished {
                            positions: status.positions,
                            polls,
                        };
                        PollEvent::RaceFinished
                    }
                    Progress::InProgress | Progress::Unstarted => {
                        self.sink
                            .render_at("#leaderBoard", &render_race_progress(&status.positions, &ctx));
                        PollEvent::InProgress
                    }
                }
            };

            if let Some(next) = PollState::transition(&state, &event) {
                if next != state {
                    debug!(race_id, from = ?state, to = ?next, "poll state changed");
                }
                state = next;
            }
        }

        info!(race_id, polls, final_state = ?state, "race polling stopped");
        outcome
    }

    fn view_context(&self, session: &Session) -> ViewContext {
        ViewContext {
            player_id: session.player_id(),
            segment_count: session.segment_count().unwrap_or(0),
            field_size: self.config.field_size,
        }
    }
}
