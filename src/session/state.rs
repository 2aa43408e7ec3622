//! Session lifecycle phase.

use std::fmt;

/// Lifecycle phase of a runtime session, derived from its two one-way flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Created, `Initialize` not yet accepted.
    #[default]
    NotInitialized,
    /// `Initialize("")` accepted.
    Initialized,
    /// `Terminate` accepted; no further transitions.
    Terminated,
}

impl SessionPhase {
    /// Derive the phase from the `initialized` / `terminated` flags.
    ///
    /// `terminated` wins, so a session that was terminated reads as
    /// terminated regardless of the other flag.
    pub fn from_flags(initialized: bool, terminated: bool) -> Self {
        match (initialized, terminated) {
            (_, true) => SessionPhase::Terminated,
            (true, false) => SessionPhase::Initialized,
            (false, false) => SessionPhase::NotInitialized,
        }
    }

    /// Check if transition to target phase is valid.
    ///
    /// Valid transitions:
    /// - NotInitialized -> Initialized
    /// - Initialized -> Terminated
    pub fn can_transition_to(&self, target: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (*self, target),
            (NotInitialized, Initialized) | (Initialized, Terminated)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::NotInitialized => "not-initialized",
            SessionPhase::Initialized => "initialized",
            SessionPhase::Terminated => "terminated",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
