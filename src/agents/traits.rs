use crate::models::{CitationSource, Coordinates, Listing, SearchQuery};
use anyhow::Result;
use async_trait::async_trait;

/// Listings found by the hunter phase, plus the pages they were grounded on
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub listings: Vec<Listing>,
    pub sources: Vec<CitationSource>,
}

/// The generative backend the mission delegates its three phases to.
/// Implementations are free to fail; the orchestrator never retries.
#[async_trait]
pub trait ConciergeService: Send + Sync {
    /// Strategist: free-text commute zones for the query
    async fn analyze_commute(
        &self,
        query: &SearchQuery,
        coordinates: Option<Coordinates>,
    ) -> Result<String>;

    /// Hunter: candidate listings. An empty list is a valid answer.
    async fn find_listings(&self, query: &SearchQuery) -> Result<Discovery>;

    /// Closer: a simulated landlord reply, matched for availability keywords
    async fn simulate_outreach(&self, listing: &Listing) -> Result<String>;

    /// Get the name of the backend
    fn name(&self) -> &'static str;
}
