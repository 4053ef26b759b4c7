use crate::agents::traits::{ConciergeService, Discovery};
use crate::agents::types::{Empty, GenerateRequest, GenerateResponse, Tool};
use crate::config::GeminiSettings;
use crate::models::{Coordinates, Listing, SearchQuery};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Concierge backed by the Gemini `generateContent` API
pub struct GeminiConcierge {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiConcierge {
    pub fn new(settings: &GeminiSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .context("GEMINI_API_KEY is not set")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .context("Failed to reach Gemini")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini returned status: {}", status);
            anyhow::bail!(
                "Gemini request failed ({}): {}",
                status,
                body.chars().take(300).collect::<String>()
            );
        }

        response
            .json::<GenerateResponse>()
            .await
            .context("Failed to decode Gemini response")
    }

    async fn generate_text(&self, request: &GenerateRequest) -> Result<(String, GenerateResponse)> {
        let response = self.generate(request).await?;
        let text = response.text().context("Gemini returned no text")?;
        Ok((text, response))
    }
}

#[async_trait]
impl ConciergeService for GeminiConcierge {
    async fn analyze_commute(
        &self,
        query: &SearchQuery,
        coordinates: Option<Coordinates>,
    ) -> Result<String> {
        let request = GenerateRequest::prompt(commute_prompt(query))
            .with_tool(Tool::GoogleMaps(Empty {}))
            .near(coordinates);

        let (text, _) = self.generate_text(&request).await?;
        debug!("Strategy is {} chars", text.len());
        Ok(text)
    }

    async fn find_listings(&self, query: &SearchQuery) -> Result<Discovery> {
        let request =
            GenerateRequest::prompt(listings_prompt(query)).with_tool(Tool::GoogleSearch(Empty {}));

        let (text, response) = self.generate_text(&request).await?;
        let listings = parse_listings(&text)?;
        let sources = response.sources();

        info!(
            "Gemini returned {} listings grounded on {} sources",
            listings.len(),
            sources.len()
        );

        Ok(Discovery { listings, sources })
    }

    async fn simulate_outreach(&self, listing: &Listing) -> Result<String> {
        let (text, _) = self
            .generate_text(&GenerateRequest::prompt(outreach_prompt(listing)))
            .await?;
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "Gemini"
    }
}

fn commute_prompt(query: &SearchQuery) -> String {
    format!(
        "You are a relocation strategist. The user works at \"{}\" and will commute by {} \
         for at most {} minutes each way. Their monthly rent budget is {}{} ({}).\n\
         List the neighborhoods that fit inside that commute zone, with typical commute \
         times and one landmark per neighborhood. Answer in short plain-text lines.",
        query.work_location,
        query.transport,
        query.max_commute,
        query.currency.symbol(),
        query.budget,
        query.currency,
    )
}

fn listings_prompt(query: &SearchQuery) -> String {
    format!(
        "Search the live web for rental listings within a {} minute {} commute of \"{}\" \
         costing at most {}{} ({}) per month.\n\
         Reply with ONLY a JSON array. Each element must have the string fields: \
         id, title, price, location, commuteTime, source, url, imageUrl. \
         Use the listing site name for source. Return an empty array if nothing matches.",
        query.max_commute,
        query.transport,
        query.work_location,
        query.currency.symbol(),
        query.budget,
        query.currency,
    )
}

fn outreach_prompt(listing: &Listing) -> String {
    format!(
        "Role-play the owner of the rental \"{}\" at {} listed on {} for {}. \
         A prospective tenant asks whether it is still available for a viewing. \
         Reply in one or two sentences and include exactly one of the words AVAILABLE \
         or SOLD OUT.",
        listing.title, listing.location, listing.source, listing.price,
    )
}

/// The outermost `[...]` in a model reply, fences and prose ignored
fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

fn parse_listings(text: &str) -> Result<Vec<Listing>> {
    let Some(array) = extract_json_array(text) else {
        warn!("No JSON array in discovery reply, treating as zero listings");
        return Ok(Vec::new());
    };

    serde_json::from_str(array).context("Failed to parse listings returned by Gemini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingStatus;

    #[test]
    fn extracts_array_from_fenced_reply() {
        let reply = "Here you go:\n```json\n[{\"id\":\"a\"}]\n```\nGood luck!";
        assert_eq!(extract_json_array(reply), Some("[{\"id\":\"a\"}]"));
        assert_eq!(extract_json_array("nothing found"), None);
        assert_eq!(extract_json_array("] backwards ["), None);
    }

    #[test]
    fn parses_listings_from_reply() {
        let reply = r#"```json
[
  {"title":"Sunny studio","price":"$1,950","location":"Chelsea","commuteTime":"12 min","source":"StreetEasy","url":"https://streeteasy.com/1","imageUrl":"https://img/1.jpg"},
  {"id":"z","title":"Loft","price":"$2,000","location":"Hoboken","commuteTime":"24 min","source":"Zillow","url":"https://zillow.com/z","imageUrl":""}
]
```"#;

        let listings = parse_listings(reply).unwrap();
        assert_eq!(listings.len(), 2);
        assert!(listings[0].id.is_empty());
        assert_eq!(listings[0].commute_time, "12 min");
        assert_eq!(listings[1].id, "z");
        assert!(listings.iter().all(|l| l.status == ListingStatus::New));
    }

    #[test]
    fn reply_without_array_is_zero_listings() {
        assert!(parse_listings("Sorry, no listings matched.").unwrap().is_empty());
    }

    #[test]
    fn malformed_array_is_an_error() {
        assert!(parse_listings("[{\"title\": ]").is_err());
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let settings = GeminiSettings {
            api_key: None,
            ..GeminiSettings::default()
        };
        assert!(GeminiConcierge::new(&settings).is_err());
    }

    #[test]
    fn prompts_carry_the_query() {
        let query = SearchQuery {
            work_location: "10 Hudson Yards, NY".into(),
            budget: "2000".into(),
            ..SearchQuery::default()
        };

        let prompt = listings_prompt(&query);
        assert!(prompt.contains("10 Hudson Yards, NY"));
        assert!(prompt.contains("$2000 (USD)"));
        assert!(prompt.contains("25 minute driving"));
        assert!(commute_prompt(&query).contains("driving"));
    }
}
