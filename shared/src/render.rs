//! Markup for the race page.
//!
//! Every function here is pure: it takes domain data and returns an HTML
//! string for the rendering sink. The markup lives in askama templates under
//! `templates/`; server text is escaped by the template engine.

use std::borrow::Cow;

use askama::Template;
use tracing::warn;

use crate::protocol::{Position, Racer, Track};
use crate::standings::{display_name, is_final, order_positions, track_percentage};

/// What the views need to know about the current player and race.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewContext {
    pub player_id: Option<u32>,
    pub segment_count: usize,
    pub field_size: Option<usize>,
}

#[derive(Template)]
#[template(path = "racer_cards.html")]
struct RacerCards<'a> {
    racers: &'a [Racer],
}

#[derive(Template)]
#[template(path = "racer_card.html")]
struct RacerCard<'a> {
    racer: &'a Racer,
}

#[derive(Template)]
#[template(path = "track_cards.html")]
struct TrackCards<'a> {
    tracks: &'a [Track],
}

#[derive(Template)]
#[template(path = "track_card.html")]
struct TrackCard<'a> {
    track: &'a Track,
}

#[derive(Template)]
#[template(path = "countdown.html")]
struct Countdown {
    count: u32,
}

#[derive(Template)]
#[template(path = "race_start.html")]
struct RaceStartView<'a> {
    track_name: &'a str,
    count: u32,
}

#[derive(Template)]
#[template(path = "results.html")]
struct ResultsView {
    board: String,
}

#[derive(Template)]
#[template(path = "leaderboard.html")]
struct Leaderboard<'a> {
    rows: Vec<Row<'a>>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct Dashboard<'a> {
    rows: Vec<Row<'a>>,
}

/// One racer as both boards show it.
struct Row<'a> {
    rank: usize,
    name: Cow<'a, str>,
    id: u32,
    left: u64,
}

fn rows<'a>(ordered: &[&'a Position], ctx: &ViewContext) -> Vec<Row<'a>> {
    ordered
        .iter()
        .enumerate()
        .map(|(index, &p)| Row {
            rank: index + 1,
            name: display_name(p, ctx.player_id),
            id: p.id,
            left: track_percentage(p.segment, ctx.segment_count),
        })
        .collect()
}

/// Templates only fail when a value's `Display` does, which none of ours do;
/// log and leave the target empty if it ever happens.
fn render(template: &impl Template) -> String {
    template.render().unwrap_or_else(|e| {
        warn!(error = %e, "template failed to render");
        String::new()
    })
}

pub fn render_racer_cards(racers: &[Racer]) -> String {
    render(&RacerCards { racers })
}

pub fn render_racer_card(racer: &Racer) -> String {
    render(&RacerCard { racer })
}

pub fn render_track_cards(tracks: &[Track]) -> String {
    render(&TrackCards { tracks })
}

pub fn render_track_card(track: &Track) -> String {
    render(&TrackCard { track })
}

pub fn render_countdown(count: u32) -> String {
    render(&Countdown { count })
}

pub fn render_race_start_view(track: &Track, countdown_from: u32) -> String {
    render(&RaceStartView {
        track_name: &track.name,
        count: countdown_from,
    })
}

/// Final results page: ranked leaderboard plus a link back to a fresh race.
pub fn render_results_view(positions: &[Position], ctx: &ViewContext) -> String {
    render(&ResultsView {
        board: render_race_progress(positions, ctx),
    })
}

/// Either the final leaderboard table or the live track dashboard, depending
/// on how many racers have a final position.
pub fn render_race_progress(positions: &[Position], ctx: &ViewContext) -> String {
    let ordered = order_positions(positions);
    let board = rows(&ordered, ctx);
    if is_final(positions, ctx.field_size) {
        render(&Leaderboard { rows: board })
    } else {
        render(&Dashboard { rows: board })
    }
}
