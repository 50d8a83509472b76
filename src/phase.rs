//! Game phase as an explicit state machine.
//!
//! The terminal build has no asynchronous asset loading, so `Ready`
//! covers the span from process start (or a reset) until the first
//! primary action, which is also the user gesture that may start audio.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Idle attract screen; the player bobs in place.
    Ready,
    Playing,
    GameOver,
    Win,
}

/// A transition not present in the table below was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: Phase,
    pub to: Phase,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid phase transition {:?} -> {:?}", self.from, self.to)
    }
}

impl std::error::Error for InvalidTransition {}

impl Phase {
    /// The full transition table. Restarting from a terminal phase goes
    /// straight back to `Playing`; everything else is rejected.
    pub fn can_become(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Ready, Playing)
                | (Playing, GameOver)
                | (Playing, Win)
                | (GameOver, Playing)
                | (Win, Playing)
        )
    }

    pub fn transition(self, next: Phase) -> Result<Phase, InvalidTransition> {
        if self.can_become(next) {
            Ok(next)
        } else {
            Err(InvalidTransition { from: self, to: next })
        }
    }

    /// True once the round has ended, one way or the other.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Win)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_transitions_pass() {
        assert_eq!(Phase::Ready.transition(Phase::Playing), Ok(Phase::Playing));
        assert_eq!(Phase::Playing.transition(Phase::GameOver), Ok(Phase::GameOver));
        assert_eq!(Phase::Playing.transition(Phase::Win), Ok(Phase::Win));
        assert_eq!(Phase::GameOver.transition(Phase::Playing), Ok(Phase::Playing));
        assert_eq!(Phase::Win.transition(Phase::Playing), Ok(Phase::Playing));
    }

    #[test]
    fn illegal_transitions_are_rejected() {
        for (from, to) in [
            (Phase::Ready, Phase::GameOver),
            (Phase::Ready, Phase::Win),
            (Phase::GameOver, Phase::Win),
            (Phase::Win, Phase::GameOver),
            (Phase::GameOver, Phase::GameOver),
            (Phase::Playing, Phase::Ready),
            (Phase::Playing, Phase::Playing),
        ] {
            assert_eq!(from.transition(to), Err(InvalidTransition { from, to }));
        }
    }

    #[test]
    fn terminal_phases() {
        assert!(!Phase::Ready.is_terminal());
        assert!(!Phase::Playing.is_terminal());
        assert!(Phase::GameOver.is_terminal());
        assert!(Phase::Win.is_terminal());
    }
}
