//! Best-effort alert delivery to Telegram and Discord
//!
//! Each channel is independently enabled by its own env vars and each
//! delivery is attempted independently: one failing webhook never
//! blocks the others and never fails the run.

use reqwest::blocking::Client;
use serde_json::json;
use std::env;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::error::FareWatchError;

/// Discord rejects message content longer than this
const DISCORD_CONTENT_LIMIT: usize = 2000;

type Result<T> = std::result::Result<T, FareWatchError>;

/// One configured notification endpoint
#[derive(Debug, Clone)]
pub enum Channel {
    Telegram { token: String, chat_id: String },
    Discord { webhook_url: String },
}

impl Channel {
    /// Channel name for log lines
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Telegram { .. } => "telegram",
            Channel::Discord { .. } => "discord",
        }
    }

    fn send(&self, client: &Client, text: &str) -> Result<()> {
        let response = match self {
            Channel::Telegram { token, chat_id } => client
                .post(format!("https://api.telegram.org/bot{token}/sendMessage"))
                .json(&json!({
                    "chat_id": chat_id,
                    "text": text,
                    "disable_web_page_preview": true,
                }))
                .send()?,
            Channel::Discord { webhook_url } => client
                .post(webhook_url)
                .json(&json!({ "content": clamp_content(text, DISCORD_CONTENT_LIMIT) }))
                .send()?,
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(FareWatchError::notify(format!(
                "{} delivery rejected ({status}): {body}",
                self.name()
            )));
        }

        Ok(())
    }
}

/// Fan-out sender over all configured channels
pub struct Notifier {
    client: Client,
    channels: Vec<Channel>,
}

impl Notifier {
    /// Discover enabled channels from the environment
    ///
    /// Telegram needs both `TELEGRAM_TOKEN` and `TELEGRAM_CHAT`;
    /// Discord needs `DISCORD_WEBHOOK`. Zero configured channels is
    /// valid — the run's only output is then its log.
    #[must_use]
    pub fn from_env() -> Self {
        let mut channels = Vec::new();

        match (env::var("TELEGRAM_TOKEN").ok(), env::var("TELEGRAM_CHAT").ok()) {
            (Some(token), Some(chat_id)) if !token.is_empty() && !chat_id.is_empty() => {
                channels.push(Channel::Telegram { token, chat_id });
            }
            (Some(_), None) | (None, Some(_)) => {
                warn!("Telegram channel disabled: TELEGRAM_TOKEN and TELEGRAM_CHAT must both be set");
            }
            _ => {}
        }

        if let Ok(webhook_url) = env::var("DISCORD_WEBHOOK") {
            if !webhook_url.is_empty() {
                channels.push(Channel::Discord { webhook_url });
            }
        }

        Self::with_channels(channels)
    }

    /// Build a notifier over an explicit channel list
    #[must_use]
    pub fn with_channels(channels: Vec<Channel>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("farewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, channels }
    }

    /// Number of configured channels
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Deliver `text` to every configured channel
    ///
    /// Failures are logged and skipped; returns how many deliveries
    /// succeeded. With zero channels this performs no network I/O.
    pub fn send_all(&self, text: &str) -> usize {
        let mut delivered = 0;
        for channel in &self.channels {
            match channel.send(&self.client, text) {
                Ok(()) => {
                    info!(channel = channel.name(), "Alert delivered");
                    delivered += 1;
                }
                Err(e) => {
                    error!(channel = channel.name(), error = %e, "Failed to deliver alert");
                }
            }
        }
        delivered
    }
}

/// Truncate on a char boundary, marking the cut
fn clamp_content(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut clamped: String = text.chars().take(limit.saturating_sub(1)).collect();
    clamped.push('…');
    clamped
}
