//! Terminal rendering of the mission state.

use crate::mission::{AgentStatus, MissionState};
use crate::models::{AgentLog, Currency, LogKind};
use anyhow::{Context, Result};
use std::fmt::Write;

/// Pretty JSON dump of the whole state, for `--json`
pub fn to_json(state: &MissionState) -> Result<String> {
    serde_json::to_string_pretty(state).context("Failed to serialize mission state")
}

fn log_tag(kind: LogKind) -> &'static str {
    match kind {
        LogKind::Info => "INFO",
        LogKind::Success => "OK",
        LogKind::Warning => "WARN",
        LogKind::Agent => "AGENT",
    }
}

/// `[HH:MM:SS] TAG message`
pub fn log_line(entry: &AgentLog) -> String {
    format!("[{}] {:<5} {}", entry.timestamp(), log_tag(entry.kind), entry.message)
}

/// Human-readable report of the state
pub fn render(state: &MissionState, currency: Currency) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, state, currency);
    out
}

fn write_report(out: &mut String, state: &MissionState, currency: Currency) -> std::fmt::Result {
    if let Some(phase) = state.status.phase_label() {
        writeln!(out, "\n== {} ==", phase)?;
    }

    if !state.logs.is_empty() {
        writeln!(out, "\nMission log:")?;
        for entry in &state.logs {
            writeln!(out, "  {}", log_line(entry))?;
        }
    }

    if !state.strategy.is_empty() {
        writeln!(out, "\nStrategist output:")?;
        for line in state.strategy.lines() {
            writeln!(out, "  {}", line)?;
        }
    }

    let schedule = state.schedule();
    if state.status == AgentStatus::Completed && !schedule.is_empty() {
        writeln!(out, "\nVerified visit schedule:")?;
        for listing in schedule {
            writeln!(out, "  📅 {} - Confirmed: Sat @ 11:30 AM", listing.title)?;
        }
    }

    if !state.listings.is_empty() {
        writeln!(out, "\nListings (budget in {} {}):", currency.symbol(), currency)?;
    }
    for (i, listing) in state.listings.iter().enumerate() {
        writeln!(out, "{}. {} ({})", i + 1, listing.title, listing.price)?;
        writeln!(out, "   {} · {}", listing.location, listing.commute_time)?;
        writeln!(out, "   Source: {} [{}]", listing.source, listing.status.label())?;
        if let Some(note) = &listing.agent_note {
            writeln!(out, "   Note: {}", note)?;
        }
        writeln!(out, "   URL: {}", listing.url)?;
        writeln!(out)?;
    }

    if !state.sources.is_empty() {
        writeln!(out, "Sources:")?;
        for (i, source) in state.sources.iter().enumerate() {
            writeln!(out, "  {}... {}", source.label(i), source.uri().unwrap_or("-"))?;
        }
    }

    Ok(())
}
