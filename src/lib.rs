//! LUDIFY: a housing concierge that runs a commute strategist, a listing
//! hunter and an outreach closer in sequence against a generative backend.

pub mod agents;
pub mod config;
pub mod geo;
pub mod mission;
pub mod models;
pub mod view;

pub use agents::{ConciergeService, Discovery, GeminiConcierge};
pub use config::Settings;
pub use mission::{AgentStatus, MissionOrchestrator, MissionState, RunOutcome};
pub use models::{Currency, Listing, ListingStatus, SearchQuery, TransportMode};
