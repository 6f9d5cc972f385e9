//! Amadeus flight-offers pricing client
//!
//! One OAuth2 client-credentials token is obtained per run and reused
//! for every search. All calls are blocking; the run is strictly
//! sequential and each plan entry costs exactly one API request.

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::FareWatchError;
use crate::models::{DatePair, FareQuote};

const TOKEN_URL: &str = "https://test.api.amadeus.com/v1/security/oauth2/token";
const OFFERS_URL: &str = "https://test.api.amadeus.com/v2/shopping/flight-offers";

type Result<T> = std::result::Result<T, FareWatchError>;

/// Amadeus API client holding the run-scoped access token
pub struct AmadeusClient {
    client: Client,
    token: String,
}

impl AmadeusClient {
    /// Authenticate with the configured key/secret
    ///
    /// A failure here is fatal for the run: no pricing call is worth
    /// attempting without a valid token.
    pub fn authenticate(key: &str, secret: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(40))
            .user_agent(concat!("farewatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let response = client
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", key),
                ("client_secret", secret),
            ])
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(FareWatchError::auth(format!(
                "Amadeus token request rejected ({status}): {body}"
            )));
        }

        let token: TokenResponse = response.json().map_err(|e| {
            FareWatchError::parse(format!("Failed to parse Amadeus token response: {e}"))
        })?;

        info!("Authenticated with Amadeus");

        Ok(Self {
            client,
            token: token.access_token,
        })
    }

    /// Search roundtrip offers for one origin and date pair
    ///
    /// Returns the cheapest offer as a [`FareQuote`], or `None` when the
    /// provider has no offers for the combination. Absence of fares is
    /// not an error.
    pub fn search_fares(
        &self,
        config: &SearchConfig,
        origin: &str,
        dates: &DatePair,
    ) -> Result<Option<FareQuote>> {
        debug!(
            origin,
            departure = %dates.departure,
            ret = %dates.return_date,
            "Searching flight offers"
        );

        // maxPrice is the total across all passengers
        let max_total = config.max_total_price().round() as u64;

        let response = self
            .client
            .get(OFFERS_URL)
            .bearer_auth(&self.token)
            .query(&[
                ("originLocationCode", origin.to_string()),
                ("destinationLocationCode", config.destination.clone()),
                ("departureDate", dates.departure.to_string()),
                ("returnDate", dates.return_date.to_string()),
                ("adults", config.party_size.to_string()),
                ("currencyCode", config.currency.clone()),
                ("maxPrice", max_total.to_string()),
                ("nonStop", "false".to_string()),
                ("page[limit]", "5".to_string()),
                ("sort", "price".to_string()),
            ])
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();

            return match status.as_u16() {
                401 => Err(FareWatchError::auth(
                    "Amadeus access token rejected mid-run".to_string(),
                )),
                429 => Err(FareWatchError::api(
                    "Amadeus rate limit exceeded".to_string(),
                )),
                _ => Err(FareWatchError::api(format!(
                    "Amadeus error {status}: {body}"
                ))),
            };
        }

        let offers: flight_offers::OffersResponse = response.json().map_err(|e| {
            FareWatchError::parse(format!("Failed to parse flight-offers response: {e}"))
        })?;

        Ok(cheapest_quote(
            &offers,
            origin,
            &config.destination,
            dates,
            &config.currency,
        ))
    }
}

/// Pick the lowest-priced offer out of a response
///
/// Offers whose price does not parse as a number are skipped
/// individually; a response with no usable offers yields `None`.
fn cheapest_quote(
    response: &flight_offers::OffersResponse,
    origin: &str,
    destination: &str,
    dates: &DatePair,
    fallback_currency: &str,
) -> Option<FareQuote> {
    let mut best: Option<(f64, &flight_offers::Offer)> = None;

    for offer in &response.data {
        let Ok(total) = offer.price.total.parse::<f64>() else {
            continue;
        };
        if best.is_none_or(|(price, _)| total < price) {
            best = Some((total, offer));
        }
    }

    let (total_price, offer) = best?;

    Some(FareQuote {
        origin: origin.to_string(),
        destination: destination.to_string(),
        dates: *dates,
        total_price,
        currency: offer
            .price
            .currency
            .clone()
            .unwrap_or_else(|| fallback_currency.to_string()),
        itinerary_summary: summarize_offer(offer, response.dictionaries.as_ref()),
    })
}

/// Render carrier names and stop counts for one offer
fn summarize_offer(
    offer: &flight_offers::Offer,
    dictionaries: Option<&flight_offers::Dictionaries>,
) -> String {
    let mut carriers: Vec<String> = Vec::new();
    for itinerary in &offer.itineraries {
        for segment in &itinerary.segments {
            let name = dictionaries
                .and_then(|d| d.carriers.as_ref())
                .and_then(|c| c.get(&segment.carrier_code))
                .cloned()
                .unwrap_or_else(|| segment.carrier_code.clone());
            if !carriers.contains(&name) {
                carriers.push(name);
            }
        }
    }
    carriers.sort();

    let carriers_text = if carriers.is_empty() {
        "unknown carrier".to_string()
    } else {
        carriers.join(", ")
    };

    let stops_out = offer
        .itineraries
        .first()
        .map_or(0, |i| i.segments.len().saturating_sub(1));
    let stops_back = offer
        .itineraries
        .get(1)
        .map_or(0, |i| i.segments.len().saturating_sub(1));

    format!(
        "{} ({} out / {} back)",
        carriers_text,
        stops_text(stops_out),
        stops_text(stops_back)
    )
}

fn stops_text(stops: usize) -> String {
    match stops {
        0 => "nonstop".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{n} stops"),
    }
}

#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Amadeus flight-offers response structures
mod flight_offers {
    use serde::Deserialize;
    use std::collections::HashMap;

    /// Top-level response from the flight-offers endpoint
    #[derive(Debug, Deserialize)]
    pub struct OffersResponse {
        #[serde(default)]
        pub data: Vec<Offer>,
        pub dictionaries: Option<Dictionaries>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Offer {
        pub price: Price,
        #[serde(default)]
        pub itineraries: Vec<Itinerary>,
    }

    /// Prices arrive as decimal strings, e.g. `"2950.40"`
    #[derive(Debug, Deserialize)]
    pub struct Price {
        pub total: String,
        pub currency: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Itinerary {
        #[serde(default)]
        pub segments: Vec<Segment>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Segment {
        pub carrier_code: String,
    }

    /// Code-to-name lookup tables attached to the response
    #[derive(Debug, Deserialize)]
    pub struct Dictionaries {
        pub carriers: Option<HashMap<String, String>>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dates() -> DatePair {
        DatePair::new(
            NaiveDate::parse_from_str("2026-08-21", "%Y-%m-%d").unwrap(),
            14,
        )
    }

    fn sample_response() -> flight_offers::OffersResponse {
        serde_json::from_str(
            r#"{
                "data": [
                    {
                        "price": { "total": "3120.80", "currency": "USD" },
                        "itineraries": [
                            { "segments": [ { "carrierCode": "UA" }, { "carrierCode": "NH" } ] },
                            { "segments": [ { "carrierCode": "NH" } ] }
                        ]
                    },
                    {
                        "price": { "total": "2950.40", "currency": "USD" },
                        "itineraries": [
                            { "segments": [ { "carrierCode": "AA" }, { "carrierCode": "JL" } ] },
                            { "segments": [ { "carrierCode": "JL" }, { "carrierCode": "AA" } ] }
                        ]
                    },
                    {
                        "price": { "total": "not-a-price" },
                        "itineraries": []
                    }
                ],
                "dictionaries": {
                    "carriers": {
                        "AA": "AMERICAN AIRLINES",
                        "JL": "JAPAN AIRLINES"
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_cheapest_quote_picks_minimum_and_skips_unparsable() {
        let response = sample_response();
        let quote = cheapest_quote(&response, "AUS", "TYO", &dates(), "USD").unwrap();

        assert_eq!(quote.total_price, 2950.40);
        assert_eq!(quote.origin, "AUS");
        assert_eq!(quote.destination, "TYO");
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.dates, dates());
    }

    #[test]
    fn test_summary_resolves_carrier_names_and_stops() {
        let response = sample_response();
        let quote = cheapest_quote(&response, "AUS", "TYO", &dates(), "USD").unwrap();

        assert!(quote.itinerary_summary.contains("AMERICAN AIRLINES"));
        assert!(quote.itinerary_summary.contains("JAPAN AIRLINES"));
        assert!(quote.itinerary_summary.contains("1 stop out / 1 stop back"));
    }

    #[test]
    fn test_summary_falls_back_to_codes_without_dictionary() {
        let response: flight_offers::OffersResponse = serde_json::from_str(
            r#"{
                "data": [
                    {
                        "price": { "total": "1200.00" },
                        "itineraries": [
                            { "segments": [ { "carrierCode": "NH" } ] },
                            { "segments": [ { "carrierCode": "NH" } ] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        let quote = cheapest_quote(&response, "SFO", "TYO", &dates(), "USD").unwrap();
        assert_eq!(quote.itinerary_summary, "NH (nonstop out / nonstop back)");
        // Missing per-offer currency falls back to the configured one
        assert_eq!(quote.currency, "USD");
    }

    #[test]
    fn test_summary_without_itineraries_names_unknown_carrier() {
        let response: flight_offers::OffersResponse = serde_json::from_str(
            r#"{ "data": [ { "price": { "total": "999.00", "currency": "USD" } } ] }"#,
        )
        .unwrap();

        let quote = cheapest_quote(&response, "AUS", "TYO", &dates(), "USD").unwrap();
        assert_eq!(
            quote.itinerary_summary,
            "unknown carrier (nonstop out / nonstop back)"
        );
    }

    #[test]
    fn test_empty_response_yields_no_quote() {
        let response: flight_offers::OffersResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(cheapest_quote(&response, "AUS", "TYO", &dates(), "USD").is_none());
    }

    #[test]
    fn test_stops_text() {
        assert_eq!(stops_text(0), "nonstop");
        assert_eq!(stops_text(1), "1 stop");
        assert_eq!(stops_text(2), "2 stops");
    }
}
