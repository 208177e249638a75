mod metrics_handler;

pub use metrics_handler::*;
