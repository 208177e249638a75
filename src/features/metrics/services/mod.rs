mod metrics_service;

pub use metrics_service::{break_down, summarize, MetricsService};
