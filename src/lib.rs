//! `farewatch` - scheduled roundtrip fare watching
//!
//! This library implements one unattended run: build a bounded grid of
//! departure/return date pairs, price each origin/date combination
//! against the Amadeus flight-offers API up to a hard request budget,
//! filter the quotes against a per-person price ceiling, and deliver a
//! digest of the survivors to Telegram and/or Discord webhooks.

pub mod amadeus;
pub mod config;
pub mod dates;
pub mod error;
pub mod filter;
pub mod models;
pub mod notify;

// Re-export core types for public API
pub use amadeus::AmadeusClient;
pub use config::SearchConfig;
pub use dates::{build_date_grid, plan_queries};
pub use error::FareWatchError;
pub use filter::{admit, build_alerts, render_digest, render_message};
pub use models::{Alert, DatePair, FareQuote};
pub use notify::{Channel, Notifier};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
