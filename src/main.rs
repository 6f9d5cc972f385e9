use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use farewatch::{
    AmadeusClient, Notifier, SearchConfig, build_alerts, build_date_grid, plan_queries,
    render_digest,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SearchConfig::from_env().context("Failed to load configuration")?;

    let grid = build_date_grid(
        config.window_start,
        config.window_end,
        config.trip_length_nights,
        &config.depart_weekdays,
    );
    info!(
        origins = config.origins.len(),
        date_pairs = grid.len(),
        "Built search grid"
    );

    let combinations = config.origins.len() * grid.len();
    let plan = plan_queries(&config.origins, &grid, config.max_requests_per_run);
    if plan.len() < combinations {
        warn!(
            budget = config.max_requests_per_run,
            skipped = combinations - plan.len(),
            "Request budget truncates the grid; skipped combinations are not carried over"
        );
    }

    let client = AmadeusClient::authenticate(&config.amadeus_key, &config.amadeus_secret)
        .context("Amadeus authentication failed")?;

    let mut quotes = Vec::new();
    for (origin, dates) in &plan {
        match client.search_fares(&config, origin, dates) {
            Ok(Some(quote)) => {
                debug!(
                    origin = %origin,
                    departure = %dates.departure,
                    total = quote.total_price,
                    "Got fare quote"
                );
                quotes.push(quote);
            }
            Ok(None) => {
                debug!(origin = %origin, departure = %dates.departure, "No offers for combination");
            }
            Err(e) => {
                // One failed query must not kill the rest of the run
                warn!(origin = %origin, departure = %dates.departure, error = %e, "Fare search failed");
            }
        }
    }

    let alerts = build_alerts(&quotes, &config);
    info!(
        queried = plan.len(),
        quotes = quotes.len(),
        alerts = alerts.len(),
        "Run complete"
    );

    // Silent when nothing qualifies: webhooks only fire on a hit
    if alerts.is_empty() {
        info!("No qualifying fares this run");
        return Ok(());
    }

    let digest = render_digest(&alerts, &config);
    println!("{digest}");

    let notifier = Notifier::from_env();
    if notifier.channel_count() == 0 {
        info!("No notification channels configured; digest printed to stdout only");
    } else {
        let delivered = notifier.send_all(&digest);
        info!(
            delivered,
            channels = notifier.channel_count(),
            "Notification fan-out finished"
        );
    }

    Ok(())
}
