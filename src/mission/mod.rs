pub mod orchestrator;
pub mod outreach;
pub mod status;

pub use orchestrator::{
    MissionOrchestrator, MissionState, RunOutcome, DEFAULT_OUTREACH_PACING, OUTREACH_BATCH,
};
pub use outreach::{apply_verdict, verified_schedule, OutreachVerdict};
pub use status::{AgentStatus, TransitionError};
