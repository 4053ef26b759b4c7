use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Category of a mission log line
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    #[default]
    Info,
    Success,
    Warning,
    Agent,
}

/// One entry of the append-only mission log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentLog {
    #[serde(rename = "timestamp")]
    pub at: DateTime<Local>,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
}

impl AgentLog {
    pub fn new(message: impl Into<String>, kind: LogKind) -> Self {
        Self {
            at: Local::now(),
            message: message.into(),
            kind,
        }
    }

    /// 24-hour wall clock, e.g. `14:03:27`
    pub fn timestamp(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }

    /// Mirror the entry into the tracing output
    pub(crate) fn trace(&self) {
        match self.kind {
            LogKind::Warning => warn!(kind = "warning", "{}", self.message),
            LogKind::Success => info!(kind = "success", "✅ {}", self.message),
            LogKind::Agent => info!(kind = "agent", "🤖 {}", self.message),
            LogKind::Info => info!(kind = "info", "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_24_hour_clock() {
        let entry = AgentLog::new("hello", LogKind::Agent);
        let stamp = entry.timestamp();

        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp.matches(':').count(), 2);
        assert!(!stamp.contains("AM") && !stamp.contains("PM"));
    }
}
