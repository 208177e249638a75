use std::collections::HashMap;
use std::sync::Arc;

use crate::features::metrics::dtos::{BucketDto, MetricsBreakdownsDto, MetricsSummaryDto};
use crate::features::tickets::models::{RepairTicket, TicketStatus};
use crate::features::tickets::TicketService;

/// Read-only KPI aggregation over the current ticket snapshot.
///
/// Everything here is computed in memory per request; a failed snapshot read
/// degrades to the zero report rather than an error.
pub struct MetricsService {
    tickets: Arc<TicketService>,
}

impl MetricsService {
    pub fn new(tickets: Arc<TicketService>) -> Self {
        Self { tickets }
    }

    pub async fn summary(&self) -> MetricsSummaryDto {
        summarize(&self.tickets.all_tickets().await)
    }

    pub async fn breakdowns(&self) -> MetricsBreakdownsDto {
        break_down(&self.tickets.all_tickets().await)
    }
}

/// Headline numbers over a ticket snapshot.
pub fn summarize(tickets: &[RepairTicket]) -> MetricsSummaryDto {
    let total = tickets.len();
    let completed = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Completed)
        .count();
    let scrapped = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Scrapped)
        .count();
    let pending = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Pending)
        .count();
    let open = total - completed - scrapped;

    let success_rate = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    };

    let lead_times: Vec<f64> = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Completed)
        .filter_map(|t| {
            let submitted = t.submitted_time()?;
            let resolved = t.resolved_time()?;
            let minutes = (resolved - submitted).num_minutes();
            (minutes >= 0).then(|| minutes as f64 / 60.0)
        })
        .collect();
    let avg_lead_time_hours = if lead_times.is_empty() {
        None
    } else {
        Some(lead_times.iter().sum::<f64>() / lead_times.len() as f64)
    };

    MetricsSummaryDto {
        total,
        completed,
        scrapped,
        pending,
        open,
        success_rate,
        avg_lead_time_hours,
    }
}

/// Closed-ticket breakdowns by classification, defect type and resolution
/// day.
pub fn break_down(tickets: &[RepairTicket]) -> MetricsBreakdownsDto {
    let closed: Vec<&RepairTicket> = tickets.iter().filter(|t| t.status.is_terminal()).collect();

    let by_classification = count_buckets(closed.iter().filter_map(|t| {
        (!t.classification.is_empty()).then(|| t.classification.clone())
    }));
    let by_defect_type = count_buckets(
        closed
            .iter()
            .filter_map(|t| (!t.defect_type.is_empty()).then(|| t.defect_type.clone())),
    );

    let mut by_day = count_buckets(
        closed
            .iter()
            .filter_map(|t| t.resolved_time())
            .map(|time| time.format("%Y-%m-%d").to_string()),
    );
    by_day.sort_by(|a, b| a.key.cmp(&b.key));

    MetricsBreakdownsDto {
        by_classification,
        by_defect_type,
        by_day,
    }
}

/// Count occurrences; highest count first, ties by key.
fn count_buckets(keys: impl Iterator<Item = String>) -> Vec<BucketDto> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut buckets: Vec<BucketDto> = counts
        .into_iter()
        .map(|(key, count)| BucketDto { key, count })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then(a.key.cmp(&b.key)));
    buckets
}
