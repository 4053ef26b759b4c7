use clap::Parser;
use ludify::models::{Currency, SearchQuery, TransportMode};
use ludify::{geo, view, GeminiConcierge, MissionOrchestrator, RunOutcome, Settings};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Let Us Do It For You: commute strategy, listing discovery and landlord outreach
#[derive(Parser, Debug)]
#[command(name = "ludify", version)]
struct Args {
    /// Where you work, e.g. "10 Hudson Yards, NY"
    #[arg(short, long)]
    work_location: String,

    /// Monthly rent ceiling
    #[arg(short, long)]
    budget: String,

    #[arg(short, long, value_enum, ignore_case = true, default_value_t = Currency::Usd)]
    currency: Currency,

    #[arg(short, long, value_enum, default_value_t = TransportMode::Driving)]
    transport: TransportMode,

    /// Longest acceptable commute in minutes
    #[arg(short, long, default_value_t = 25)]
    max_commute: u32,

    /// Skip the IP-based position lookup
    #[arg(long)]
    no_geolocate: bool,

    /// Print the final mission state as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging, kept off stdout so `--json` stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = Settings::from_env()?;

    info!("🔑 LUDIFY - Let Us Do It For You");
    info!("==========================================");

    let query = SearchQuery {
        work_location: args.work_location,
        budget: args.budget,
        currency: args.currency,
        transport: args.transport,
        max_commute: args.max_commute,
    };

    let coordinates = geo::locate(settings.coordinates, !args.no_geolocate).await;
    let service = GeminiConcierge::new(&settings.gemini)?;

    let orchestrator = MissionOrchestrator::new(Arc::new(service))
        .with_pacing(settings.outreach_pacing)
        .with_coordinates(coordinates);

    let outcome = orchestrator.start_run(&query).await;
    let state = orchestrator.snapshot().await;

    if args.json {
        println!("{}", view::to_json(&state)?);
    } else {
        print!("{}", view::render(&state, query.currency));
    }

    match outcome {
        // Empty work location or budget is a silent no-op
        RunOutcome::Completed | RunOutcome::Skipped => Ok(()),
        RunOutcome::Rejected(status) => anyhow::bail!("a mission is already running ({})", status),
        RunOutcome::Failed(message) => anyhow::bail!("mission failed: {}", message),
    }
}
