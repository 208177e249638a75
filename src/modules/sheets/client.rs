//! Wire client for the spreadsheet values API.
//!
//! Talks to a Google-Sheets-style REST endpoint: tables are addressed by
//! name, cells by A1 ranges. All reads fail soft to an empty result; writes
//! surface as `ExternalServiceError`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::core::config::SheetsConfig;
use crate::core::error::{AppError, Result};
use crate::modules::sheets::store::{column_letter, rows_from_values, SheetRow, SheetStore};

/// Physical row offset of the first data row (row 1 is the header)
const HEADER_OFFSET: u32 = 1;

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    updates: AppendUpdates,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_range: String,
}

pub struct SheetsClient {
    config: SheetsConfig,
    http_client: Client,
}

impl SheetsClient {
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/{}/values/{}",
            self.config.base_url,
            self.config.spreadsheet_id,
            urlencoding::encode(range)
        )
    }

    /// Parse the 1-based physical row out of an updated range like
    /// "sheet1!A42:U42".
    fn row_from_updated_range(range: &str) -> Option<u32> {
        let cell = range.split('!').nth(1)?.split(':').next()?;
        let digits: String = cell.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }

    async fn put_values(&self, range: &str, values: Vec<Vec<String>>) -> Result<()> {
        let url = format!("{}?valueInputOption=RAW", self.values_url(range));
        let response = self
            .http_client
            .put(&url)
            .bearer_auth(&self.config.api_token)
            .json(&json!({ "range": range, "values": values }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Store write failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Store write failed with status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SheetStore for SheetsClient {
    async fn fetch_all(&self, table: &str) -> Vec<SheetRow> {
        let url = self.values_url(table);
        let response = match self
            .http_client
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Store read failed for '{}': {}", table, e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!(
                "Store read for '{}' returned status {}",
                table,
                response.status()
            );
            return Vec::new();
        }

        match response.json::<ValueRange>().await {
            Ok(range) => {
                let rows = rows_from_values(&range.values);
                debug!("Fetched {} rows from '{}'", rows.len(), table);
                rows
            }
            Err(e) => {
                warn!("Store read for '{}' returned unparseable body: {}", table, e);
                Vec::new()
            }
        }
    }

    async fn append(&self, table: &str, values: Vec<String>) -> Result<u32> {
        let url = format!(
            "{}:append?valueInputOption=RAW",
            self.values_url(table)
        );
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_token)
            .json(&json!({ "values": [values] }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Store append failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Store append failed with status {}",
                response.status()
            )));
        }

        let body = response.json::<AppendResponse>().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Unparseable append response: {}", e))
        })?;

        let physical_row = Self::row_from_updated_range(&body.updates.updated_range)
            .ok_or_else(|| {
                AppError::ExternalServiceError(format!(
                    "Append response had no row in range '{}'",
                    body.updates.updated_range
                ))
            })?;

        Ok(physical_row - HEADER_OFFSET)
    }

    async fn update_range(
        &self,
        table: &str,
        position: u32,
        start_col: usize,
        values: Vec<String>,
    ) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let physical_row = position + HEADER_OFFSET;
        let end_col = start_col + values.len() - 1;
        let range = format!(
            "{}!{}{}:{}{}",
            table,
            column_letter(start_col),
            physical_row,
            column_letter(end_col),
            physical_row
        );
        self.put_values(&range, vec![values]).await
    }

    async fn replace_all(
        &self,
        table: &str,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<()> {
        let clear_url = format!("{}:clear", self.values_url(table));
        let response = self
            .http_client
            .post(&clear_url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Store clear failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Store clear failed with status {}",
                response.status()
            )));
        }

        let mut values = Vec::with_capacity(rows.len() + 1);
        values.push(header);
        values.extend(rows);
        self.put_values(&format!("{}!A1", table), values).await
    }
}
