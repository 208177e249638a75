use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::core::config::LineConfig;
use crate::core::error::{AppError, Result};
use crate::modules::notify::{Notifier, NotifyMessage};
use crate::shared::constants::CELL_TIME_FORMAT;

/// LINE push-message client.
///
/// One configured endpoint, one configured recipient; no per-recipient
/// fan-out.
pub struct LineNotifier {
    config: LineConfig,
    http_client: Client,
}

impl LineNotifier {
    pub fn new(config: LineConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn format_body(message: &NotifyMessage) -> String {
        format!(
            "\n[{}]\nWO: {}\nSN: {}\nModel: {}\nFailure: {}\nBy: {}\nAt: {}",
            message.event.label(),
            message.work_order,
            message.serial_number,
            message.model,
            message.failure,
            message.actor,
            Utc::now().format(CELL_TIME_FORMAT),
        )
    }
}

#[async_trait]
impl Notifier for LineNotifier {
    async fn send(&self, message: NotifyMessage) -> bool {
        let payload = json!({
            "to": self.config.group_id,
            "messages": [{ "type": "text", "text": Self::format_body(&message) }],
        });

        let response = self
            .http_client
            .post(&self.config.push_url)
            .bearer_auth(&self.config.channel_token)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => {
                debug!(
                    "Notification delivered: {} for SN {}",
                    message.event.label(),
                    message.serial_number
                );
                true
            }
            Ok(r) => {
                warn!(
                    "Notification push returned status {} for SN {}",
                    r.status(),
                    message.serial_number
                );
                false
            }
            Err(e) => {
                warn!(
                    "Notification push failed for SN {}: {}",
                    message.serial_number, e
                );
                false
            }
        }
    }
}
