use std::cell::{Cell, RefCell};

use crate::error::SelectionError;
use crate::orchestrator::CancelToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Track,
    Racer,
}

impl Category {
    /// Container that holds the cards of this category.
    pub fn container(self) -> &'static str {
        match self {
            Category::Track => "#tracks",
            Category::Racer => "#racers",
        }
    }
}

/// Per-page selection state: chosen track and racer, the active race and the
/// number of segments on its track.
///
/// Single-threaded by construction; share it with `Rc`.
#[derive(Debug, Default)]
pub struct Session {
    track_id: Cell<Option<u32>>,
    player_id: Cell<Option<u32>>,
    race_id: Cell<Option<u32>>,
    segment_count: Cell<Option<usize>>,
    in_flight: Cell<bool>,
    cancel: RefCell<CancelToken>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a card click. `raw_id` is the DOM id of the card; like
    /// `parseInt`, only its leading digits count.
    pub fn select(&self, category: Category, raw_id: &str) -> Result<u32, SelectionError> {
        let id = parse_leading_id(raw_id).ok_or_else(|| SelectionError(raw_id.to_owned()))?;
        match category {
            Category::Track => self.track_id.set(Some(id)),
            Category::Racer => self.player_id.set(Some(id)),
        }
        Ok(id)
    }

    pub fn track_id(&self) -> Option<u32> {
        self.track_id.get()
    }

    pub fn player_id(&self) -> Option<u32> {
        self.player_id.get()
    }

    pub fn race_id(&self) -> Option<u32> {
        self.race_id.get()
    }

    pub fn segment_count(&self) -> Option<usize> {
        self.segment_count.get()
    }

    pub(crate) fn set_race(&self, race_id: u32, segment_count: usize) {
        self.race_id.set(Some(race_id));
        self.segment_count.set(Some(segment_count));
    }

    /// Claim the single race slot. The returned guard releases it on drop.
    pub(crate) fn begin_race(&self) -> Option<RaceSlot<'_>> {
        if self.in_flight.replace(true) {
            return None;
        }
        Some(RaceSlot { session: self })
    }

    pub fn race_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Token for the next race. While a race is in flight its own token is
    /// returned instead, so `cancel_race` keeps reaching it.
    pub fn race_token(&self) -> CancelToken {
        if !self.race_in_flight() {
            self.cancel.replace(CancelToken::new());
        }
        self.cancel.borrow().clone()
    }

    /// Trip the token of the current (or most recent) race.
    pub fn cancel_race(&self) {
        self.cancel.borrow().cancel();
    }
}

pub(crate) struct RaceSlot<'a> {
    session: &'a Session,
}

impl Drop for RaceSlot<'_> {
    fn drop(&mut self) {
        self.session.in_flight.set(false);
    }
}

fn parse_leading_id(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_overwrites_single_slot() {
        let session = Session::new();
        for raw in ["1", "4", "4", "2"] {
            session.select(Category::Track, raw).unwrap();
        }
        session.select(Category::Racer, "3").unwrap();
        session.select(Category::Racer, "3").unwrap();
        assert_eq!(session.track_id(), Some(2));
        assert_eq!(session.player_id(), Some(3));
    }

    #[test]
    fn test_select_parses_leading_digits() {
        let session = Session::new();
        assert_eq!(session.select(Category::Racer, " 12abc"), Ok(12));
        assert_eq!(
            session.select(Category::Racer, "racer-3"),
            Err(SelectionError("racer-3".to_owned()))
        );
        // a failed parse leaves the previous choice alone
        assert_eq!(session.player_id(), Some(12));
    }

    #[test]
    fn test_race_slot_is_exclusive() {
        let session = Session::new();
        let slot = session.begin_race().unwrap();
        assert!(session.race_in_flight());
        assert!(session.begin_race().is_none());
        drop(slot);
        assert!(!session.race_in_flight());
        assert!(session.begin_race().is_some());
    }

    #[test]
    fn test_each_race_gets_a_fresh_token() {
        let session = Session::new();
        let first = session.race_token();
        session.cancel_race();
        assert!(first.is_cancelled());

        let second = session.race_token();
        assert!(!second.is_cancelled());
        session.cancel_race();
        assert!(second.is_cancelled());
    }

    #[test]
    fn test_token_is_kept_while_racing() {
        let session = Session::new();
        let running = session.race_token();
        let _slot = session.begin_race().unwrap();
        let again = session.race_token();
        session.cancel_race();
        assert!(running.is_cancelled());
        assert!(again.is_cancelled());
    }

    #[test]
    fn test_container_selectors() {
        assert_eq!(Category::Track.container(), "#tracks");
        assert_eq!(Category::Racer.container(), "#racers");
    }
}
