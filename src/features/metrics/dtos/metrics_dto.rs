use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Repair KPI headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummaryDto {
    pub total: usize,
    pub completed: usize,
    pub scrapped: usize,
    /// Tickets not yet picked up by a technician
    pub pending: usize,
    /// Tickets in any non-terminal status (Pending, In Progress, Wait Part)
    pub open: usize,
    /// Completed over total, percent; 0 when there are no tickets
    pub success_rate: f64,
    /// Mean submit-to-resolve duration over completed tickets, in hours;
    /// absent when no completed ticket has both timestamps
    pub avg_lead_time_hours: Option<f64>,
}

/// One `(key, count)` bucket of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BucketDto {
    pub key: String,
    pub count: usize,
}

/// Counts of closed tickets grouped three ways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsBreakdownsDto {
    pub by_classification: Vec<BucketDto>,
    pub by_defect_type: Vec<BucketDto>,
    /// Resolutions per calendar day, oldest day first
    pub by_day: Vec<BucketDto>,
}
