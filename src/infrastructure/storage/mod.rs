use crate::core::errors::StokvelError;
use crate::core::models::{audit::GroupAudit, group::Group, ledger::LedgerEntry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence port for the ledger engine.
///
/// `commit` is the per-group serialization boundary: it persists the updated
/// group document together with any appended ledger entries as one atomic
/// unit, compare-and-swapping on `Group::version`. The engine builds the full
/// mutation in memory and hands it over in a single call; it never issues
/// dependent writes separately and never retries on its own.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn insert_group(&self, group: Group) -> Result<(), StokvelError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, StokvelError>;
    async fn get_group_by_join_code(&self, join_code: &str) -> Result<Option<Group>, StokvelError>;

    /// Atomically applies one mutation set. Fails with
    /// `ConcurrentModification` (nothing applied) when the stored group's
    /// version no longer matches `group.version`. Ledger entries are
    /// append-only; existing entries are never touched.
    async fn commit(&self, group: Group, new_entries: Vec<LedgerEntry>) -> Result<Group, StokvelError>;

    async fn get_entry(&self, entry_id: &str) -> Result<Option<LedgerEntry>, StokvelError>;

    /// Entries for a group within `[period_start, period_end)`, newest first.
    async fn entries_for_group(
        &self,
        group_id: &str,
        period_start: Option<DateTime<Utc>>,
        period_end: Option<DateTime<Utc>>,
    ) -> Result<Vec<LedgerEntry>, StokvelError>;

    /// Groups where the uid is an active member.
    async fn member_groups(&self, uid: &str) -> Result<Vec<Group>, StokvelError>;

    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), StokvelError>;
    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, StokvelError>;
}

pub mod in_memory;
