mod group_tests;
mod ledger_tests;

use crate::core::models::group::MemberProfile;
use crate::core::services::StokvelService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub type TestService = StokvelService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

pub fn create_test_service() -> TestService {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    StokvelService::new(storage, logging, cache, "test-secret".to_string())
}

pub fn profile(uid: &str, name: &str) -> MemberProfile {
    MemberProfile {
        uid: uid.to_string(),
        name: name.to_string(),
        phone: None,
    }
}
