use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::bonus::models::Period;
use crate::modules::bonus::services::{compute_bonus_report, summarize};
use crate::modules::qoyod::QoyodClient;

/// Query parameters shared by the bonus endpoints
#[derive(Debug, Deserialize)]
pub struct BonusQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// Optional upstream inventory filter, applied before aggregation
    #[serde(default)]
    pub inventory_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PeriodResponse {
    year: i32,
    month: u32,
    month_name: &'static str,
}

impl From<Period> for PeriodResponse {
    fn from(period: Period) -> Self {
        Self {
            year: period.year,
            month: period.month,
            month_name: period.month_name(),
        }
    }
}

impl BonusQuery {
    /// Validate the requested period. Both parameters are required; range
    /// checks live in [`Period::new`].
    fn period(&self) -> Result<Period> {
        match (self.year, self.month) {
            (Some(year), Some(month)) => Period::new(year, month),
            _ => Err(AppError::validation(
                "year and month are required, e.g. /api/bonus/calculate?year=2026&month=02",
            )),
        }
    }
}

/// GET /api/bonus/calculate?year=2026&month=02[&inventory_id=123]
///
/// Computes the monthly bonus report across all branches. Invoices and
/// payments are fetched concurrently; if either fetch fails the whole
/// request fails before any aggregation runs.
pub async fn calculate_bonus(
    client: web::Data<QoyodClient>,
    query: web::Query<BonusQuery>,
) -> Result<HttpResponse> {
    let period = query.period()?;

    let (invoices, payments) = tokio::try_join!(
        client.fetch_invoices(period, query.inventory_id.as_deref()),
        client.fetch_payments(period),
    )?;

    info!(
        invoices = invoices.len(),
        payments = payments.len(),
        "computing bonus report for {}-{:02}",
        period.year,
        period.month
    );

    let report = compute_bonus_report(&invoices, &payments);
    let summary = summarize(&report);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "period": PeriodResponse::from(period),
        "summary": summary,
        "data": report,
    })))
}

/// GET /api/bonus/branch/{branch_name}?year=2026&month=02
///
/// Computes the full report, then returns the one requested branch. Unknown
/// branches get a 404 listing the branches that were found.
pub async fn get_branch_bonus(
    client: web::Data<QoyodClient>,
    branch_name: web::Path<String>,
    query: web::Query<BonusQuery>,
) -> Result<HttpResponse> {
    let period = query.period()?;
    let branch_name = branch_name.into_inner();

    let (invoices, payments) = tokio::try_join!(
        client.fetch_invoices(period, query.inventory_id.as_deref()),
        client.fetch_payments(period),
    )?;

    let report = compute_bonus_report(&invoices, &payments);

    match report.get(&branch_name) {
        Some(branch) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "branch": branch_name,
            "period": PeriodResponse::from(period),
            "data": branch,
        }))),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": format!("branch \"{}\" not found", branch_name),
            "availableBranches": report.keys().collect::<Vec<_>>(),
        }))),
    }
}

/// GET /api/bonus/inventories
pub async fn list_inventories(client: web::Data<QoyodClient>) -> Result<HttpResponse> {
    let inventories = client.fetch_inventories().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": inventories.len(),
        "inventories": inventories,
    })))
}

/// Configure routes for the bonus module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/bonus")
            .route("/calculate", web::get().to(calculate_bonus))
            .route("/inventories", web::get().to(list_inventories))
            .route("/branch/{branch_name}", web::get().to(get_branch_bonus)),
    );
}
