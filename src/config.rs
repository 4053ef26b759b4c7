use crate::mission::DEFAULT_OUTREACH_PACING;
use crate::models::Coordinates;
use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the Gemini backend
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Runtime settings, read from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub gemini: GeminiSettings,
    /// Cosmetic pause after each outreach reply
    pub outreach_pacing: Duration,
    /// Fixed position; skips the IP lookup when set
    pub coordinates: Option<Coordinates>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gemini: GeminiSettings::default(),
            outreach_pacing: DEFAULT_OUTREACH_PACING,
            coordinates: None,
        }
    }
}

impl Settings {
    /// Load from the process environment, after reading `.env` if there is one
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = GeminiSettings::default();

        let gemini = GeminiSettings {
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
        };

        let outreach_pacing = match get("LUDIFY_OUTREACH_PACING_MS") {
            Some(raw) => Duration::from_millis(
                raw.trim()
                    .parse()
                    .with_context(|| format!("LUDIFY_OUTREACH_PACING_MS is not a number: {raw}"))?,
            ),
            None => DEFAULT_OUTREACH_PACING,
        };

        let coordinates = match (get("LUDIFY_LATITUDE"), get("LUDIFY_LONGITUDE")) {
            (Some(lat), Some(lon)) => Some(Coordinates {
                latitude: parse_degrees("LUDIFY_LATITUDE", &lat, 90.0)?,
                longitude: parse_degrees("LUDIFY_LONGITUDE", &lon, 180.0)?,
            }),
            (None, None) => None,
            _ => anyhow::bail!("LUDIFY_LATITUDE and LUDIFY_LONGITUDE must be set together"),
        };

        Ok(Self {
            gemini,
            outreach_pacing,
            coordinates,
        })
    }
}

fn parse_degrees(key: &str, raw: &str, limit: f64) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} is not a number: {raw}"))?;

    if !(-limit..=limit).contains(&value) {
        anyhow::bail!("{key} must be between -{limit} and {limit}, got {value}");
    }
    Ok(value)
}
