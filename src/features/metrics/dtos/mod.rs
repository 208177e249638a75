mod metrics_dto;

pub use metrics_dto::*;
