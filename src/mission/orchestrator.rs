use crate::agents::{ConciergeService, Discovery};
use crate::mission::outreach::{apply_verdict, verified_schedule, OutreachVerdict};
use crate::mission::status::AgentStatus;
use crate::models::{
    normalize_listings, AgentLog, CitationSource, Coordinates, Listing, LogKind, SearchQuery,
};
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Pause after each outreach reply. Purely cosmetic pacing so the log drips
/// in one listing at a time; it is not a latency model or a backoff.
pub const DEFAULT_OUTREACH_PACING: Duration = Duration::from_millis(1500);

/// How many listings the closer contacts per run
pub const OUTREACH_BATCH: usize = 3;

/// Everything the front-end renders
#[derive(Debug, Clone, Default, Serialize)]
pub struct MissionState {
    pub status: AgentStatus,
    pub strategy: String,
    pub listings: Vec<Listing>,
    pub sources: Vec<CitationSource>,
    pub logs: Vec<AgentLog>,
}

impl MissionState {
    /// Listings confirmed by outreach, recomputed on every call
    pub fn schedule(&self) -> Vec<&Listing> {
        verified_schedule(&self.listings)
    }

    fn reset(&mut self) {
        self.strategy.clear();
        self.listings.clear();
        self.sources.clear();
        self.logs.clear();
    }

    fn log(&mut self, message: impl Into<String>, kind: LogKind) {
        let entry = AgentLog::new(message, kind);
        entry.trace();
        self.logs.push(entry);
    }

    fn advance(&mut self) -> Result<()> {
        let next = self.status.advance()?;
        debug!("Status {} -> {}", self.status, next);
        self.status = next;
        Ok(())
    }
}

/// What a call to [`MissionOrchestrator::start_run`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Work location or budget empty; nothing changed
    Skipped,
    /// Another run is in progress
    Rejected(AgentStatus),
    Completed,
    /// The run aborted and reset to idle
    Failed(String),
}

/// Drives strategist, hunter and closer in sequence against one backend.
///
/// Cloning gives another handle on the same state, so a front-end can read
/// [`snapshot`](Self::snapshot) while a run is in flight.
#[derive(Clone)]
pub struct MissionOrchestrator {
    service: Arc<dyn ConciergeService>,
    state: Arc<Mutex<MissionState>>,
    pacing: Duration,
    coordinates: Option<Coordinates>,
}

impl MissionOrchestrator {
    pub fn new(service: Arc<dyn ConciergeService>) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(MissionState::default())),
            pacing: DEFAULT_OUTREACH_PACING,
            coordinates: None,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_coordinates(mut self, coordinates: Option<Coordinates>) -> Self {
        self.coordinates = coordinates;
        self
    }

    pub async fn status(&self) -> AgentStatus {
        self.state.lock().await.status
    }

    pub async fn snapshot(&self) -> MissionState {
        self.state.lock().await.clone()
    }

    /// Run one full mission for `query`.
    ///
    /// Errors from any phase are caught here: the message is logged as a
    /// warning, status drops back to idle, and whatever was already fetched
    /// stays in the state.
    pub async fn start_run(&self, query: &SearchQuery) -> RunOutcome {
        if !query.is_ready() {
            debug!("Work location or budget missing, not starting");
            return RunOutcome::Skipped;
        }

        {
            let mut state = self.state.lock().await;
            let next = match state.status.begin() {
                Ok(next) => next,
                Err(err) => {
                    warn!("Start rejected: {}", err);
                    return RunOutcome::Rejected(state.status);
                }
            };

            state.reset();
            state.status = next;
            info!(
                backend = self.service.name(),
                location = %query.work_location,
                "Starting mission"
            );
            state.log(
                format!("LUDIFY Lifecycle Management Initiated for: {}", query.work_location),
                LogKind::Agent,
            );
            state.log(format!("Target Currency: {}", query.currency), LogKind::Info);
            state.log(
                "PHASE 1: Strategist Agent calculating real-time Commute Zones...",
                LogKind::Info,
            );
        }

        match self.run_phases(query).await {
            Ok(()) => RunOutcome::Completed,
            Err(err) => {
                let message = format!("{:#}", err);
                let mut state = self.state.lock().await;
                state.log(format!("Critical Mission Error: {}", message), LogKind::Warning);
                state.status = state.status.fail();
                RunOutcome::Failed(message)
            }
        }
    }

    async fn run_phases(&self, query: &SearchQuery) -> Result<()> {
        // Phase 1: strategist
        let strategy = self
            .service
            .analyze_commute(query, self.coordinates)
            .await?;

        {
            let mut state = self.state.lock().await;
            state.strategy = strategy;
            state.log("Neighborhood clusters and landmark nodes verified.", LogKind::Success);
            state.advance()?;
            state.log(
                "PHASE 2: Hunter Agent (Architect Mode) scanning disparate platforms...",
                LogKind::Agent,
            );
            state.log(
                "Synthesizing extraction scripts to pull deterministic data...",
                LogKind::Info,
            );
        }

        // Phase 2: hunter
        let Discovery { listings, sources } = self.service.find_listings(query).await?;
        let listings = normalize_listings(listings);
        let batch: Vec<Listing> = listings.iter().take(OUTREACH_BATCH).cloned().collect();

        {
            let mut state = self.state.lock().await;
            state.sources = sources;
            state.listings = listings;

            // Narration only, the search is not repeated
            if state.listings.is_empty() {
                state.log("Zero direct matches. Expanding search radius by 5%...", LogKind::Warning);
            } else {
                let count = state.listings.len();
                state.log(
                    format!("Successfully extracted {} REAL listings from the live web.", count),
                    LogKind::Success,
                );
            }

            state.advance()?;
            state.log(
                "PHASE 3: Closer Agent (Outreach Bot) initiating automated sequence...",
                LogKind::Agent,
            );
        }

        // Phase 3: closer, one listing at a time
        for listing in &batch {
            self.log(
                format!("Transmitting LUDIFY proxy inquiry to {}...", listing.source),
                LogKind::Info,
            )
            .await;

            let reply = self.service.simulate_outreach(listing).await?;
            tokio::time::sleep(self.pacing).await;

            let verdict = OutreachVerdict::classify(&reply);
            debug!(listing = %listing.id, ?verdict, "Outreach reply classified");

            let mut state = self.state.lock().await;
            let updated = apply_verdict(&state.listings, &listing.id, verdict);
            state.listings = updated;

            match verdict {
                OutreachVerdict::Available => state.log(
                    format!("Inquiry Success: Viewing window locked for {}.", listing.title),
                    LogKind::Success,
                ),
                OutreachVerdict::Taken => state.log(
                    format!("Listing \"{}\" marked as SOLD OUT.", listing.title),
                    LogKind::Warning,
                ),
            }
        }

        let mut state = self.state.lock().await;
        state.advance()?;
        state.log("Lifecycle Completed: Your Verified Schedule is ready.", LogKind::Success);
        info!(verified = state.schedule().len(), "Mission completed");

        Ok(())
    }

    async fn log(&self, message: impl Into<String>, kind: LogKind) {
        self.state.lock().await.log(message, kind);
    }
}
