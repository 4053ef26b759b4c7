use crate::models::Coordinates;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const LOOKUP_URL: &str = "http://ip-api.com/json/?fields=status,lat,lon";

#[derive(Debug, Deserialize)]
struct IpLocation {
    status: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl IpLocation {
    fn coordinates(&self) -> Option<Coordinates> {
        if self.status != "success" {
            return None;
        }
        Some(Coordinates {
            latitude: self.lat?,
            longitude: self.lon?,
        })
    }
}

/// Best-effort current position. Never fails; a missing position just means
/// the strategist runs without a location bias.
pub async fn locate(fixed: Option<Coordinates>, lookup: bool) -> Option<Coordinates> {
    if let Some(coords) = fixed {
        debug!("Using configured coordinates");
        return Some(coords);
    }
    if !lookup {
        return None;
    }

    match lookup_by_ip().await {
        Ok(Some(coords)) => {
            info!("📍 Geo-signal locked ({:.4}, {:.4})", coords.latitude, coords.longitude);
            Some(coords)
        }
        Ok(None) => {
            warn!("Geolocation lookup gave no position, continuing without coordinates");
            None
        }
        Err(err) => {
            warn!("Geolocation unavailable, continuing without coordinates: {:#}", err);
            None
        }
    }
}

async fn lookup_by_ip() -> Result<Option<Coordinates>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .context("Failed to create HTTP client")?;

    let location: IpLocation = client
        .get(LOOKUP_URL)
        .send()
        .await
        .context("Failed to reach geolocation service")?
        .error_for_status()?
        .json()
        .await
        .context("Failed to decode geolocation response")?;

    Ok(location.coordinates())
}
