//! Microsoft Teams incoming-webhook connector using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use url::Url;

use crate::domain::settings::MS_TEAMS_NOTIFY_URL;
use crate::domain::{AppError, Settings};
use crate::ports::Notifier;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CARD_CONTEXT: &str = "https://schema.org/extensions";

/// Posts message cards to the configured Teams webhook.
///
/// Construction never fails. A missing or malformed webhook URL leaves the
/// connector disabled, and sending through a disabled connector reports the
/// missing option.
#[derive(Clone)]
pub struct TeamsConnector {
    webhook: Option<Url>,
    simulate: bool,
    client: Option<Client>,
}

impl std::fmt::Debug for TeamsConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamsConnector")
            .field("webhook_host", &self.webhook.as_ref().and_then(Url::host_str))
            .field("simulate", &self.simulate)
            .field("webhook", &"[REDACTED]")
            .finish()
    }
}

impl TeamsConnector {
    /// Create a connector from the webhook and run flags in `settings`.
    pub fn new(settings: &Settings) -> Self {
        let webhook = match settings.ms_teams_notify_url() {
            None => {
                tracing::debug!(
                    "{} not configured; Teams notifications disabled",
                    MS_TEAMS_NOTIFY_URL
                );
                None
            }
            Some(raw) => match Url::parse(raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!(
                        "Ignoring {}: not a valid URL ({}). Teams notifications disabled.",
                        MS_TEAMS_NOTIFY_URL,
                        e
                    );
                    None
                }
            },
        };

        let builder = Client::builder().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));
        let client = match builder.build() {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("Failed to create HTTP client for Teams notifications: {}", e);
                None
            }
        };

        Self { webhook, simulate: settings.args().simulate, client }
    }

    /// Whether a notification would reach the webhook.
    pub fn is_enabled(&self) -> bool {
        self.webhook.is_some() && self.client.is_some()
    }
}

#[derive(Debug, Serialize)]
struct MessageCard<'a> {
    #[serde(rename = "@type")]
    card_type: &'static str,
    #[serde(rename = "@context")]
    context: &'static str,
    summary: &'a str,
    title: &'a str,
    text: &'a str,
}

impl Notifier for TeamsConnector {
    fn notify(&self, title: &str, text: &str) -> Result<(), AppError> {
        if self.simulate {
            tracing::info!(title, "Simulated Teams notification: {}", text);
            return Ok(());
        }

        let webhook =
            self.webhook.as_ref().ok_or(AppError::MissingConfigKey(MS_TEAMS_NOTIFY_URL))?;
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AppError::Notification("HTTP client unavailable".into()))?;

        let card = MessageCard {
            card_type: "MessageCard",
            context: CARD_CONTEXT,
            summary: title,
            title,
            text,
        };

        let response = client
            .post(webhook.clone())
            .json(&card)
            .send()
            .map_err(|e| AppError::Notification(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(title, "Teams notification delivered");
            Ok(())
        } else {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::Notification(format!(
                "webhook returned {}: {}",
                status.as_u16(),
                error_text.trim()
            )))
        }
    }
}
