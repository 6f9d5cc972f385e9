//! Fare admission policy and alert rendering
//!
//! Weekday filtering already happened when the date grid was built, so
//! the only policy left to apply here is the per-person price ceiling.
//! Everything in this module is pure.

use crate::config::SearchConfig;
use crate::models::{Alert, FareQuote};

/// Whether a quote passes the price policy
///
/// Price-per-person exactly equal to the ceiling is admitted.
#[must_use]
pub fn admit(quote: &FareQuote, party_size: u32, max_price_per_person: f64) -> bool {
    quote.price_per_person(party_size) <= max_price_per_person
}

/// Filter quotes against the policy and render each survivor
///
/// The output preserves the query order of the input.
#[must_use]
pub fn build_alerts(quotes: &[FareQuote], config: &SearchConfig) -> Vec<Alert> {
    quotes
        .iter()
        .filter(|quote| admit(quote, config.party_size, config.max_price_per_person))
        .map(|quote| Alert {
            quote: quote.clone(),
            message: render_message(quote, config),
        })
        .collect()
}

/// Render one qualifying quote as a human-readable message
#[must_use]
pub fn render_message(quote: &FareQuote, config: &SearchConfig) -> String {
    format!(
        "✈️ {origin} → {dest}\n\
         Out: {out}  |  Back: {back}\n\
         Total: {currency} {total:.2} for {party} adult(s) ({per_person:.2} per person, limit {limit})\n\
         Itinerary: {summary}\n\
         Tip: Search these dates on Google Flights/Chase Travel to book.",
        origin = quote.origin,
        dest = quote.destination,
        out = quote.dates.departure,
        back = quote.dates.return_date,
        currency = quote.currency,
        total = quote.total_price,
        party = config.party_size,
        per_person = quote.price_per_person(config.party_size),
        limit = config.max_price_per_person,
        summary = quote.itinerary_summary,
    )
}

/// Assemble the digest delivered to every notification channel
#[must_use]
pub fn render_digest(alerts: &[Alert], config: &SearchConfig) -> String {
    let mut digest = format!(
        "Found {} roundtrip fare(s) at or under {} {} per person:",
        alerts.len(),
        config.currency,
        config.max_price_per_person,
    );
    for alert in alerts {
        digest.push_str("\n\n");
        digest.push_str(&alert.message);
    }
    digest
}
