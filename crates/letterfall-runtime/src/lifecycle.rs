//! Simulation lifecycle - two-state machine gating simulated time.
//!
//! The sandbox starts `Running`. `pause` and `resume` are only meaningful
//! from the opposite state; calling either from the state it targets is a
//! reported no-op rather than an error.

use std::fmt;

/// Whether the coordinator advances engine time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationState {
    #[default]
    Running,
    Paused,
}

impl SimulationState {
    /// Label for the control that would leave this state
    pub fn toggle_label(&self) -> &'static str {
        match self {
            SimulationState::Running => "Pause Simulation",
            SimulationState::Paused => "Resume Simulation",
        }
    }
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationState::Running => write!(f, "running"),
            SimulationState::Paused => write!(f, "paused"),
        }
    }
}

/// Outcome of a lifecycle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed {
        from: SimulationState,
        to: SimulationState,
    },
    /// Request ignored; the machine was already in the carried state
    Unchanged(SimulationState),
}

impl Transition {
    pub fn changed(&self) -> bool {
        matches!(self, Transition::Changed { .. })
    }

    /// State after the request
    pub fn state(&self) -> SimulationState {
        match *self {
            Transition::Changed { to, .. } => to,
            Transition::Unchanged(state) => state,
        }
    }
}

/// Running/Paused state machine
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    state: SimulationState,
    pauses: u64,
}

impl Lifecycle {
    /// Starts in `Running`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    /// Number of Running → Paused transitions so far
    pub fn pause_count(&self) -> u64 {
        self.pauses
    }

    /// Running → Paused
    pub fn pause(&mut self) -> Transition {
        self.transition(SimulationState::Running, SimulationState::Paused)
    }

    /// Paused → Running
    pub fn resume(&mut self) -> Transition {
        self.transition(SimulationState::Paused, SimulationState::Running)
    }

    /// Flip between the two states
    pub fn toggle(&mut self) -> Transition {
        match self.state {
            SimulationState::Running => self.pause(),
            SimulationState::Paused => self.resume(),
        }
    }

    fn transition(&mut self, from: SimulationState, to: SimulationState) -> Transition {
        if self.state != from {
            return Transition::Unchanged(self.state);
        }
        self.state = to;
        if to == SimulationState::Paused {
            self.pauses += 1;
        }
        log::info!("Simulation {from} -> {to}");
        Transition::Changed { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_running() {
        let lc = Lifecycle::new();
        assert_eq!(lc.state(), SimulationState::Running);
        assert!(lc.is_running());
    }

    #[test]
    fn pause_and_resume() {
        let mut lc = Lifecycle::new();
        assert_eq!(
            lc.pause(),
            Transition::Changed {
                from: SimulationState::Running,
                to: SimulationState::Paused
            }
        );
        assert!(!lc.is_running());

        assert!(lc.resume().changed());
        assert!(lc.is_running());
    }

    #[test]
    fn pause_is_idempotent() {
        let mut lc = Lifecycle::new();
        lc.pause();
        let t = lc.pause();
        assert_eq!(t, Transition::Unchanged(SimulationState::Paused));
        assert_eq!(lc.pause_count(), 1);
    }

    #[test]
    fn resume_while_running_is_noop() {
        let mut lc = Lifecycle::new();
        let t = lc.resume();
        assert!(!t.changed());
        assert_eq!(t.state(), SimulationState::Running);
    }

    #[test]
    fn toggle_alternates() {
        let mut lc = Lifecycle::new();
        assert_eq!(lc.toggle().state(), SimulationState::Paused);
        assert_eq!(lc.toggle().state(), SimulationState::Running);
        assert_eq!(lc.pause_count(), 1);
    }

    #[test]
    fn toggle_labels() {
        assert_eq!(SimulationState::Running.toggle_label(), "Pause Simulation");
        assert_eq!(SimulationState::Paused.toggle_label(), "Resume Simulation");
    }
}
