pub mod etl;
pub mod extract;
pub mod pipeline;
pub mod report;
pub mod resolve;

pub use crate::domain::model::{Department, Employee, OrgSnapshot, Report, ReportRow};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

pub use extract::extract_snapshot;
pub use report::build_report;
pub use resolve::HierarchyResolver;

/// Turns an organisation document into the header line plus one CSV line per employee.
///
/// Fails on the first malformed record, duplicate id, dangling manager reference or
/// manager cycle; no partial report is produced.
pub fn generate_report(document: &str) -> Result<Vec<String>> {
    let snapshot = extract_snapshot(document)?;
    build_report(&snapshot)?.lines()
}
