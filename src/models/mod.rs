use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub mod log;

pub use log::{AgentLog, LogKind};

/// Currency the budget is expressed in
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Inr,
    Aud,
    Cad,
    Sgd,
    Chf,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Inr => "INR",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Sgd => "SGD",
            Currency::Chf => "CHF",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Inr => "₹",
            Currency::Aud => "A$",
            Currency::Cad => "C$",
            Currency::Sgd => "S$",
            Currency::Chf => "Fr",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How the commute is made
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Driving,
    Transit,
    Walking,
}

impl TransportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Transit => "transit",
            TransportMode::Walking => "walking",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user is looking for. Fixed for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub work_location: String,
    pub budget: String,
    pub currency: Currency,
    pub transport: TransportMode,
    /// Minutes
    pub max_commute: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            work_location: String::new(),
            budget: String::new(),
            currency: Currency::default(),
            transport: TransportMode::default(),
            max_commute: 25,
        }
    }
}

impl SearchQuery {
    /// Both required inputs are present
    pub fn is_ready(&self) -> bool {
        !self.work_location.is_empty() && !self.budget.is_empty()
    }
}

/// Last known position of the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Outreach status of a listing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    New,
    Contacted,
    Replied,
    Rejected,
}

impl ListingStatus {
    pub fn label(self) -> &'static str {
        match self {
            ListingStatus::New => "new",
            ListingStatus::Contacted => "contacted",
            ListingStatus::Replied => "VERIFIED",
            ListingStatus::Rejected => "rejected",
        }
    }
}

/// A housing unit found during discovery
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub price: String,
    pub location: String,
    pub commute_time: String,
    pub source: String,
    pub url: String,
    pub image_url: String,
    pub status: ListingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_note: Option<String>,
}

/// Give every listing a unique id so outreach updates can address them by id.
///
/// Missing ids become `listing-<n>` (1-based), repeated ids get a `-<n>` suffix.
pub fn normalize_listings(listings: Vec<Listing>) -> Vec<Listing> {
    let mut seen = HashSet::new();

    listings
        .into_iter()
        .enumerate()
        .map(|(i, mut listing)| {
            let base = if listing.id.trim().is_empty() {
                format!("listing-{}", i + 1)
            } else {
                listing.id.trim().to_string()
            };

            let mut id = base.clone();
            let mut suffix = 2;
            while !seen.insert(id.clone()) {
                id = format!("{}-{}", base, suffix);
                suffix += 1;
            }

            listing.id = id;
            listing
        })
        .collect()
}

/// Web reference attached to a grounded answer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WebReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Citation returned alongside discovered listings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CitationSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebReference>,
}

impl CitationSource {
    pub fn uri(&self) -> Option<&str> {
        self.web.as_ref()?.uri.as_deref()
    }

    /// Title cut to 45 characters, or a numbered placeholder (`index` is 0-based)
    pub fn label(&self, index: usize) -> String {
        match self.web.as_ref().and_then(|w| w.title.as_deref()) {
            Some(title) if !title.is_empty() => title.chars().take(45).collect(),
            _ => format!("Node {}", index + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_needs_location_and_budget() {
        let mut query = SearchQuery::default();
        assert!(!query.is_ready());

        query.work_location = "10 Hudson Yards, NY".to_string();
        assert!(!query.is_ready());

        query.budget = "2000".to_string();
        assert!(query.is_ready());
    }

    #[test]
    fn listing_uses_camel_case_and_defaults_status() {
        let listing: Listing = serde_json::from_str(
            r#"{"id":"a1","title":"Loft","price":"$1,900","commuteTime":"18 min","imageUrl":"https://img/1.jpg"}"#,
        )
        .unwrap();

        assert_eq!(listing.status, ListingStatus::New);
        assert_eq!(listing.commute_time, "18 min");
        assert_eq!(listing.image_url, "https://img/1.jpg");
        assert!(listing.agent_note.is_none());

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["status"], "new");
        assert!(json.get("agentNote").is_none());
    }

    #[test]
    fn normalize_fills_and_dedupes_ids() {
        let listings = vec![
            Listing { id: "x".into(), ..Default::default() },
            Listing::default(),
            Listing { id: "x".into(), ..Default::default() },
        ];

        let ids: Vec<_> = normalize_listings(listings).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["x", "listing-2", "x-2"]);
    }

    #[test]
    fn currency_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), "\"GBP\"");
        assert_eq!(Currency::Chf.symbol(), "Fr");
    }

    #[test]
    fn citation_label_falls_back_to_node_number() {
        let titled = CitationSource {
            web: Some(WebReference {
                uri: Some("https://example.com".into()),
                title: Some("a".repeat(60)),
            }),
        };
        assert_eq!(titled.label(0).chars().count(), 45);
        assert_eq!(titled.uri(), Some("https://example.com"));

        assert_eq!(CitationSource::default().label(2), "Node 3");
    }
}
