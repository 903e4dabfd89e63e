use crate::core::errors::StokvelError;
use crate::core::models::ledger::MonthlyStatusResponse;
use crate::infrastructure::cache::{Cache, cache_keys};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, (MonthlyStatusResponse, DateTime<Utc>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_monthly_status(
        &self,
        group_id: &str,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<Option<MonthlyStatusResponse>, StokvelError> {
        let cache = self.cache.read().await;
        let key = cache_keys::monthly_status_key(group_id, period_start, period_end);
        Ok(cache
            .get(&key)
            .filter(|(_, expiry)| *expiry > Utc::now())
            .map(|(status, _)| status.clone()))
    }

    async fn save_monthly_status(
        &self,
        group_id: &str,
        status: &MonthlyStatusResponse,
        ttl: std::time::Duration,
    ) -> Result<(), StokvelError> {
        let mut cache = self.cache.write().await;
        let key = cache_keys::monthly_status_key(group_id, status.period_start, status.period_end);
        let expiry = Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| StokvelError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        cache.insert(key, (status.clone(), expiry));
        Ok(())
    }

    async fn invalidate_group(&self, group_id: &str) -> Result<(), StokvelError> {
        let mut cache = self.cache.write().await;
        let prefix = cache_keys::group_prefix(group_id);
        cache.retain(|key, (_, expiry)| !key.starts_with(&prefix) && *expiry > Utc::now());
        Ok(())
    }
}
