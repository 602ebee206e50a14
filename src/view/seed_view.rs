use crate::entity::{SeedReport, StatusDistribution};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeedView {
    pub success: bool,
    pub message: String,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_distribution: Option<StatusDistribution>,
}

impl From<SeedReport> for SeedView {
    fn from(report: SeedReport) -> Self {
        Self {
            success: true,
            message: report.message,
            count: report.count,
            status_distribution: report.distribution,
        }
    }
}
