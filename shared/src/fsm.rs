use rust_fsm::*;

/// States of the race-progress poll loop. `Finished` and `Abandoned` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollState {
    Polling,
    Finished,
    Abandoned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollEvent {
    /// A tick saw the race still running (or not yet started).
    InProgress,
    /// A tick saw the race finished.
    RaceFinished,
    /// The caller cancelled, or the attempt budget ran out.
    Abandon,
}

impl StateMachineImpl for PollState {
    type Input = PollEvent;
    type State = PollState;
    type Output = ();

    const INITIAL_STATE: Self::State = PollState::Polling;

    fn transition(state: &Self::State, input: &Self::Input) -> Option<Self::State> {
        match (state, input) {
            (PollState::Polling, PollEvent::InProgress) => Some(PollState::Polling),
            (PollState::Polling, PollEvent::RaceFinished) => Some(PollState::Finished),
            (PollState::Polling, PollEvent::Abandon) => Some(PollState::Abandoned),
            _ => None,
        }
    }

    fn output(_state: &Self::State, _input: &Self::Input) -> Option<Self::Output> {
        None
    }
}

impl Default for PollState {
    fn default() -> Self {
        PollState::INITIAL_STATE
    }
}

impl PollState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, PollState::Polling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polling_stays_polling_while_in_progress() {
        let mut state = PollState::default();
        for _ in 0..10 {
            state = PollState::transition(&state, &PollEvent::InProgress).unwrap();
        }
        assert_eq!(state, PollState::Polling);
    }

    #[test]
    fn test_finished_is_terminal() {
        let finished = PollState::transition(&PollState::Polling, &PollEvent::RaceFinished).unwrap();
        assert_eq!(finished, PollState::Finished);
        assert!(finished.is_terminal());
        for event in [PollEvent::InProgress, PollEvent::RaceFinished, PollEvent::Abandon] {
            assert_eq!(PollState::transition(&finished, &event), None);
        }
    }

    #[test]
    fn test_abandon_is_terminal() {
        let abandoned = PollState::transition(&PollState::Polling, &PollEvent::Abandon).unwrap();
        assert_eq!(abandoned, PollState::Abandoned);
        assert_eq!(PollState::transition(&abandoned, &PollEvent::InProgress), None);
    }
}
