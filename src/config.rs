//! Run configuration loaded from the environment
//!
//! Every search parameter has a documented default; only the Amadeus
//! credentials are required. Optional values that are absent or fail to
//! parse silently fall back to their default, so a scheduled run never
//! dies on a typo in a tuning knob.

use crate::FareWatchError;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Weekday};
use std::collections::HashSet;
use std::env;
use std::str::FromStr;

/// Immutable snapshot of one run's parameters
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Amadeus API key (`AMADEUS_KEY`, required)
    pub amadeus_key: String,
    /// Amadeus API secret (`AMADEUS_SECRET`, required)
    pub amadeus_secret: String,
    /// Origin airport codes (`ORIGINS`)
    pub origins: Vec<String>,
    /// Destination airport/city code (`DEST`)
    pub destination: String,
    /// First allowed departure date (`DEPART_START`)
    pub window_start: NaiveDate,
    /// Last allowed departure date (`DEPART_END`)
    pub window_end: NaiveDate,
    /// Trip length in nights (`TRIP_LENGTH`)
    pub trip_length_nights: i64,
    /// Allowed departure weekdays (`DEPART_WEEKDAYS`); empty means any day
    pub depart_weekdays: HashSet<Weekday>,
    /// Price ceiling per person (`MAX_PRICE_PER_PERSON`)
    pub max_price_per_person: f64,
    /// Number of travellers (`ADULTS`)
    pub party_size: u32,
    /// Currency code for prices (`CURRENCY`)
    pub currency: String,
    /// Hard cap on pricing queries per run (`MAX_REQUESTS_PER_RUN`)
    pub max_requests_per_run: usize,
}

// Default value functions
fn default_origins() -> Vec<String> {
    ["AUS", "IAH", "DFW", "SFO", "LAX"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn default_destination() -> String {
    "TYO".to_string()
}

fn default_year() -> i32 {
    2026
}

fn default_window_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 8, 20).unwrap_or_default()
}

fn default_window_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 10, 10).unwrap_or_default()
}

fn default_trip_length() -> i64 {
    14
}

fn default_weekdays() -> HashSet<Weekday> {
    HashSet::from([Weekday::Fri, Weekday::Sat])
}

fn default_max_price_per_person() -> f64 {
    1500.0
}

fn default_party_size() -> u32 {
    2
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_request_budget() -> usize {
    80
}

/// Read an optional env var, falling back to `default` when the variable
/// is absent or does not parse
fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a comma-separated list of airport codes
fn parse_origins(value: &str) -> Vec<String> {
    let mut origins = Vec::new();
    for code in value.split(',') {
        let code = code.trim().to_uppercase();
        if !code.is_empty() && !origins.contains(&code) {
            origins.push(code);
        }
    }
    origins
}

/// Parse a comma-separated list of weekday names ("fri,sat")
///
/// Returns `None` when any token fails to parse, so the caller falls
/// back to the default set. An empty value yields an empty set, which
/// disables weekday filtering entirely.
fn parse_weekdays(value: &str) -> Option<HashSet<Weekday>> {
    let mut weekdays = HashSet::new();
    for token in value.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        weekdays.insert(token.parse::<Weekday>().ok()?);
    }
    Some(weekdays)
}

impl SearchConfig {
    /// Load configuration from the process environment
    ///
    /// Fails only when the Amadeus credentials are missing or the
    /// resulting configuration is inconsistent.
    pub fn from_env() -> Result<Self> {
        let amadeus_key = env::var("AMADEUS_KEY").context("Missing AMADEUS_KEY env var")?;
        let amadeus_secret =
            env::var("AMADEUS_SECRET").context("Missing AMADEUS_SECRET env var")?;

        let year = env_parse("YEAR", default_year());

        let config = Self {
            amadeus_key,
            amadeus_secret,
            origins: env::var("ORIGINS")
                .ok()
                .map(|v| parse_origins(&v))
                .filter(|origins| !origins.is_empty())
                .unwrap_or_else(default_origins),
            destination: env::var("DEST")
                .ok()
                .map(|v| v.trim().to_uppercase())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_destination),
            window_start: env_parse("DEPART_START", default_window_start(year)),
            window_end: env_parse("DEPART_END", default_window_end(year)),
            trip_length_nights: env_parse("TRIP_LENGTH", default_trip_length()),
            depart_weekdays: env::var("DEPART_WEEKDAYS")
                .ok()
                .and_then(|v| parse_weekdays(&v))
                .unwrap_or_else(default_weekdays),
            max_price_per_person: env_parse("MAX_PRICE_PER_PERSON", default_max_price_per_person()),
            party_size: env_parse("ADULTS", default_party_size()),
            currency: env::var("CURRENCY")
                .ok()
                .map(|v| v.trim().to_uppercase())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_currency),
            max_requests_per_run: env_parse("MAX_REQUESTS_PER_RUN", default_request_budget()),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate the assembled configuration
    pub fn validate(&self) -> Result<()> {
        if self.origins.is_empty() {
            return Err(FareWatchError::config("Origin set cannot be empty").into());
        }

        if self.window_start > self.window_end {
            return Err(FareWatchError::config(format!(
                "Departure window start {} is after its end {}",
                self.window_start, self.window_end
            ))
            .into());
        }

        if self.trip_length_nights < 1 {
            return Err(FareWatchError::config("Trip length must be at least 1 night").into());
        }

        if self.party_size < 1 {
            return Err(FareWatchError::config("Party size must be at least 1").into());
        }

        if self.max_price_per_person <= 0.0 {
            return Err(
                FareWatchError::config("Price ceiling per person must be positive").into(),
            );
        }

        Ok(())
    }

    /// Total price ceiling for the whole party
    #[must_use]
    pub fn max_total_price(&self) -> f64 {
        self.max_price_per_person * f64::from(self.party_size)
    }
}
