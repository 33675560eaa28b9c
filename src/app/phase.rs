use tracing::debug;

/// Lifecycle of a run. Phases only move forward; `Reported` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunPhase {
    Dispatching,
    /// Between windows: earlier windows are folded, later ones still pending.
    Aggregating,
    Reported,
}

impl RunPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RunPhase::Dispatching => "dispatching",
            RunPhase::Aggregating => "aggregating",
            RunPhase::Reported => "reported",
        }
    }

    /// Moves to `next` if it lies ahead of the current phase. Returns whether
    /// the phase changed.
    pub fn advance(&mut self, next: RunPhase) -> bool {
        if next <= *self {
            return false;
        }
        debug!("Run phase {} -> {}", self.as_str(), next.as_str());
        *self = next;
        true
    }
}
