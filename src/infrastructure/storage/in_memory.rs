use crate::core::errors::StokvelError;
use crate::core::models::{audit::GroupAudit, group::Group, ledger::LedgerEntry};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::collections::HashMap;
use tokio::sync::Mutex;

pub struct InMemoryStorage {
    groups: Mutex<HashMap<String, Group>>,
    join_codes: Mutex<HashMap<String, String>>, // code -> group_id
    entries: Mutex<HashMap<String, LedgerEntry>>,
    group_audits: Mutex<HashMap<String, Vec<GroupAudit>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            groups: Mutex::new(HashMap::new()),
            join_codes: Mutex::new(HashMap::new()),
            entries: Mutex::new(HashMap::new()),
            group_audits: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn insert_group(&self, group: Group) -> Result<(), StokvelError> {
        let mut groups = self.groups.lock().await;
        let mut join_codes = self.join_codes.lock().await;
        join_codes.insert(group.join_code.clone(), group.id.clone());
        debug!("inserting group {}", group.id);
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, StokvelError> {
        Ok(self.groups.lock().await.get(group_id).cloned())
    }

    async fn get_group_by_join_code(&self, join_code: &str) -> Result<Option<Group>, StokvelError> {
        // For production: database index on join_code
        let group_id = self.join_codes.lock().await.get(join_code).cloned();
        Ok(match group_id {
            Some(id) => self.groups.lock().await.get(&id).cloned(),
            None => None,
        })
    }

    async fn commit(&self, mut group: Group, new_entries: Vec<LedgerEntry>) -> Result<Group, StokvelError> {
        // Single critical section over both collections: the group document
        // and its appended entries land together or not at all.
        let mut groups = self.groups.lock().await;
        let mut entries = self.entries.lock().await;

        let stored = groups
            .get(&group.id)
            .ok_or_else(|| StokvelError::GroupNotFound(group.id.clone()))?;
        if stored.version != group.version {
            warn!(
                "stale commit for group {}: expected version {}, found {}",
                group.id, group.version, stored.version
            );
            return Err(StokvelError::ConcurrentModification);
        }

        group.version += 1;
        for entry in new_entries {
            debug!("appending {:?} entry {} to group {}", entry.entry_type, entry.id, group.id);
            entries.insert(entry.id.clone(), entry);
        }
        groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn get_entry(&self, entry_id: &str) -> Result<Option<LedgerEntry>, StokvelError> {
        Ok(self.entries.lock().await.get(entry_id).cloned())
    }

    async fn entries_for_group(
        &self,
        group_id: &str,
        period_start: Option<DateTime<Utc>>,
        period_end: Option<DateTime<Utc>>,
    ) -> Result<Vec<LedgerEntry>, StokvelError> {
        // For production: indexed range query on (group_id, created_at)
        let mut matched: Vec<LedgerEntry> = self
            .entries
            .lock()
            .await
            .values()
            .filter(|e| e.group_id == group_id)
            .filter(|e| period_start.is_none_or(|start| e.created_at >= start))
            .filter(|e| period_end.is_none_or(|end| e.created_at < end))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn member_groups(&self, uid: &str) -> Result<Vec<Group>, StokvelError> {
        Ok(self
            .groups
            .lock()
            .await
            .values()
            .filter(|g| g.active_member(uid).is_some())
            .cloned()
            .collect())
    }

    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), StokvelError> {
        let mut audits = self.group_audits.lock().await;
        audits.entry(audit.group_id.clone()).or_default().push(audit);
        Ok(())
    }

    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, StokvelError> {
        Ok(self.group_audits.lock().await.get(group_id).cloned().unwrap_or_default())
    }
}
