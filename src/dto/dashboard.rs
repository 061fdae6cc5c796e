use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct CarCounts {
    pub total: i64,
    pub available: i64,
    pub sold: i64,
    pub unavailable: i64,
    pub featured: i64,
}

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestDriveCounts {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub no_show: i64,
    /// Sold cars with at least one completed test drive, per completed test
    /// drive, as a percentage rounded to two decimals. 0 when there are no
    /// completed test drives.
    pub conversion_rate: f64,
}

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub cars: CarCounts,
    pub test_drives: TestDriveCounts,
}
