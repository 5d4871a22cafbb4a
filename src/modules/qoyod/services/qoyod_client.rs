use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use crate::config::QoyodConfig;
use crate::core::{AppError, Result};
use crate::modules::bonus::models::Period;

/// Months of invoice history fetched in addition to the requested month, so
/// installment payments can still be joined to invoices issued earlier.
const INVOICE_LOOKBACK_MONTHS: u32 = 2;

/// Maximum records requested per page. Qoyod caps page size rather than
/// erroring, so a single large page stands in for real pagination.
const PAGE_SIZE: u32 = 1000;

/// Authenticated client for the Qoyod accounting API.
///
/// Records come back as raw `serde_json::Value`s on purpose: the upstream
/// schema varies across API versions, and field resolution is the
/// normalizer's job, not the transport's.
pub struct QoyodClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct InvoicesResponse {
    #[serde(default)]
    invoices: Vec<Value>,
}

#[derive(Deserialize)]
struct PaymentsResponse {
    #[serde(default)]
    invoice_payments: Vec<Value>,
}

#[derive(Deserialize)]
struct InventoriesResponse {
    #[serde(default)]
    inventories: Vec<Value>,
}

impl QoyodClient {
    pub fn new(config: &QoyodConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch invoices dated within the requested month or the two months
    /// before it (inclusive boundaries). When an inventory filter is given
    /// it is applied upstream, so the aggregation core never sees invoices
    /// from other inventories.
    pub async fn fetch_invoices(
        &self,
        period: Period,
        inventory_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        let start = period.start_date_months_back(INVOICE_LOOKBACK_MONTHS);
        let end = period.end_date();

        info!(%start, %end, ?inventory_id, "fetching invoices from Qoyod");

        let mut query: Vec<(&str, String)> = vec![
            ("q[date_gteq]", start.format("%Y-%m-%d").to_string()),
            ("q[date_lteq]", end.format("%Y-%m-%d").to_string()),
            ("per_page", PAGE_SIZE.to_string()),
        ];
        if let Some(inventory_id) = inventory_id {
            query.push(("q[inventory_id_eq]", inventory_id.to_string()));
        }

        let response: InvoicesResponse = self.get("/invoices", &query).await?;
        Ok(response.invoices)
    }

    /// Fetch payments dated within exactly the requested month.
    pub async fn fetch_payments(&self, period: Period) -> Result<Vec<Value>> {
        let start = period.start_date();
        let end = period.end_date();

        info!(%start, %end, "fetching payments from Qoyod");

        let query: Vec<(&str, String)> = vec![
            ("q[date_gteq]", start.format("%Y-%m-%d").to_string()),
            ("q[date_lteq]", end.format("%Y-%m-%d").to_string()),
            ("per_page", PAGE_SIZE.to_string()),
        ];

        let response: PaymentsResponse = self.get("/invoice_payments", &query).await?;
        Ok(response.invoice_payments)
    }

    /// Fetch the list of inventories/branches known upstream.
    pub async fn fetch_inventories(&self) -> Result<Vec<Value>> {
        let response: InventoriesResponse = self.get("/inventories", &[]).await?;
        Ok(response.inventories)
    }

    async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("API-KEY", &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Qoyod request to {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(format!(
                "Qoyod API error {} on {}: {}",
                status, path, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Failed to parse Qoyod response: {}", e)))
    }
}
