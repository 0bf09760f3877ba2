//! Integrity checks, metrics and reports over club datasets.

pub mod daily;
pub mod errors;
pub mod integrity;
pub mod metrics;
pub mod report;

pub use daily::{DAILY_REPORT_TYPE, DailyReport, build_daily_report, write_daily_report};
pub use errors::EvalError;
pub use integrity::{Violation, check_dataset};
pub use metrics::{DatasetMetrics, collect_metrics};
pub use report::render_summary;
