//! Run state tracking.
//!
//! One orchestrator run walks a small state machine:
//! Idle -> Resolving -> Executing -> Done, with Failed reachable from the
//! two working states. Transitions are logged; an invalid edge is a
//! programming error and is reported instead of being silently accepted.

use log::debug;

/// Lifecycle states of a single phase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Request parsed, nothing resolved yet
    Idle,

    /// Toolchain and path table being resolved and validated
    Resolving,

    /// Tools running
    Executing,

    /// Request finished successfully
    Done,

    /// Request failed
    Failed,
}

impl RunState {
    /// Get the human-readable name for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Resolving => "resolving",
            RunState::Executing => "executing",
            RunState::Done => "done",
            RunState::Failed => "failed",
        }
    }

    /// Get all valid transitions FROM this state.
    pub fn valid_next_states(&self) -> Vec<RunState> {
        match self {
            RunState::Idle => vec![RunState::Resolving, RunState::Failed],
            RunState::Resolving => vec![RunState::Executing, RunState::Failed],
            RunState::Executing => vec![RunState::Done, RunState::Failed],
            RunState::Done => vec![],
            RunState::Failed => vec![],
        }
    }

    /// Check if a transition to the given state is valid.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        self.valid_next_states().contains(&next)
    }

    /// Attempt to move to `next`, logging the edge.
    pub fn transition_to(&mut self, next: RunState) -> Result<(), String> {
        if !self.can_transition_to(next) {
            return Err(format!(
                "Invalid state transition: {} -> {}",
                self.as_str(),
                next.as_str()
            ));
        }
        debug!("State transition: {} -> {}", self.as_str(), next.as_str());
        *self = next;
        Ok(())
    }
}
