//! Data models for a fare-watch run
//!
//! Everything here is created and discarded within a single run; no
//! entity survives across invocations.

use chrono::{Duration, NaiveDate};

/// A candidate departure/return date combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatePair {
    /// Departure date (always inside the configured search window)
    pub departure: NaiveDate,
    /// Return date, trip-length nights after departure
    pub return_date: NaiveDate,
}

impl DatePair {
    /// Build a pair from a departure date and trip length in nights
    #[must_use]
    pub fn new(departure: NaiveDate, trip_length_nights: i64) -> Self {
        Self {
            departure,
            return_date: departure + Duration::days(trip_length_nights),
        }
    }

    /// Nights between departure and return
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.return_date - self.departure).num_days()
    }
}

/// One priced roundtrip itinerary returned by the pricing provider
#[derive(Debug, Clone, PartialEq)]
pub struct FareQuote {
    /// Origin airport code
    pub origin: String,
    /// Destination airport/city code
    pub destination: String,
    /// Dates this quote was priced for
    pub dates: DatePair,
    /// Total price for the whole party
    pub total_price: f64,
    /// Currency code of the price
    pub currency: String,
    /// Carrier names and stop counts for the itinerary
    pub itinerary_summary: String,
}

impl FareQuote {
    /// Total price divided across the party
    #[must_use]
    pub fn price_per_person(&self, party_size: u32) -> f64 {
        self.total_price / f64::from(party_size.max(1))
    }
}

/// A fare quote that passed the admission policy, rendered for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub quote: FareQuote,
    pub message: String,
}
