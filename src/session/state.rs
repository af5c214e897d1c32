//! Link lifecycle state machine
//!
//! A link moves `Joining → Active → Left` and never back; `Left` is
//! terminal. A restarted process builds a brand-new link with a fresh
//! identity rather than reviving an old one.

/// Lifecycle phase of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPhase {
    /// Constructed, join burst not yet broadcast
    Joining,
    /// Join burst sent; handling messages and heartbeats
    Active,
    /// Shut down; terminal
    Left,
}

impl LinkPhase {
    /// Transition from `Joining` after the join burst goes out
    pub fn activate(&mut self) {
        if *self == LinkPhase::Joining {
            *self = LinkPhase::Active;
        }
    }

    /// Transition to the terminal phase
    pub fn leave(&mut self) {
        *self = LinkPhase::Left;
    }

    /// Whether the link is handling traffic
    pub fn is_active(&self) -> bool {
        *self == LinkPhase::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_progression() {
        let mut phase = LinkPhase::Joining;
        assert!(!phase.is_active());

        phase.activate();
        assert!(phase.is_active());

        phase.leave();
        assert_eq!(phase, LinkPhase::Left);
    }

    #[test]
    fn test_left_is_terminal() {
        let mut phase = LinkPhase::Left;

        phase.activate();
        assert_eq!(phase, LinkPhase::Left);
    }
}
