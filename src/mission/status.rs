use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Macro state of a mission. Runs move strictly forward and drop back to
/// `Idle` on failure.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    #[default]
    Idle,
    Strategizing,
    Hunting,
    Closing,
    Completed,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("a mission is already running ({0})")]
    Busy(AgentStatus),
    #[error("{0} has no next phase")]
    NotAdvancing(AgentStatus),
}

impl AgentStatus {
    /// One of the three active phases
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            AgentStatus::Strategizing | AgentStatus::Hunting | AgentStatus::Closing
        )
    }

    pub fn can_start(self) -> bool {
        !self.is_busy()
    }

    /// Start a new run
    pub fn begin(self) -> Result<Self, TransitionError> {
        if self.can_start() {
            Ok(AgentStatus::Strategizing)
        } else {
            Err(TransitionError::Busy(self))
        }
    }

    /// Next phase of the current run
    pub fn advance(self) -> Result<Self, TransitionError> {
        match self {
            AgentStatus::Strategizing => Ok(AgentStatus::Hunting),
            AgentStatus::Hunting => Ok(AgentStatus::Closing),
            AgentStatus::Closing => Ok(AgentStatus::Completed),
            AgentStatus::Idle | AgentStatus::Completed => Err(TransitionError::NotAdvancing(self)),
        }
    }

    pub fn fail(self) -> Self {
        AgentStatus::Idle
    }

    /// Footer caption shown while a run is visible
    pub fn phase_label(self) -> Option<&'static str> {
        match self {
            AgentStatus::Idle => None,
            AgentStatus::Strategizing => Some("Phase 1: Strategist"),
            AgentStatus::Hunting => Some("Phase 2: Hunter"),
            AgentStatus::Closing => Some("Phase 3: Closer"),
            AgentStatus::Completed => Some("Lifecycle Success"),
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentStatus::Idle => "IDLE",
            AgentStatus::Strategizing => "STRATEGIZING",
            AgentStatus::Hunting => "HUNTING",
            AgentStatus::Closing => "CLOSING",
            AgentStatus::Completed => "COMPLETED",
        };
        f.write_str(name)
    }
}
