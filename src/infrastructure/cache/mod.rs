pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::StokvelError;
use crate::core::models::ledger::MonthlyStatusResponse;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Read-side cache for the monthly contribution status, keyed per group and
/// period. Any committed group mutation invalidates the group's keys.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_monthly_status(
        &self,
        group_id: &str,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<Option<MonthlyStatusResponse>, StokvelError>;
    async fn save_monthly_status(
        &self,
        group_id: &str,
        status: &MonthlyStatusResponse,
        ttl: std::time::Duration,
    ) -> Result<(), StokvelError>;
    async fn invalidate_group(&self, group_id: &str) -> Result<(), StokvelError>;
}
