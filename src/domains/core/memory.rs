use crate::domains::core::repository::{
    CountRecords, DeleteAllRecords, FindById, Measurement, PageDescending, ProviderIdentity,
    ProviderInfo,
};
use crate::errors::{DomainResult, StoreError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory record store, kept sorted newest-first. Reference
/// implementation of the record-store contract; the surrounding
/// application supplies persistent ones with the same semantics.
pub struct MemoryStore<T> {
    entity: &'static str,
    provider: ProviderInfo,
    records: RwLock<Vec<T>>,
    disposed: AtomicBool,
}

impl<T: Measurement> MemoryStore<T> {
    pub fn new(entity: &'static str, provider: ProviderInfo) -> Self {
        Self {
            entity,
            provider,
            records: RwLock::new(Vec::new()),
            disposed: AtomicBool::new(false),
        }
    }

    fn guard(&self) -> DomainResult<()> {
        if self.disposed.load(Ordering::SeqCst) {
            Err(StoreError::Disposed(self.entity).into())
        } else {
            Ok(())
        }
    }

    /// Insert `record`, replacing any existing record with the same ID.
    pub async fn upsert(&self, record: T) -> DomainResult<()> {
        self.guard()?;
        let mut records = self.records.write().await;
        records.retain(|r| r.id() != record.id());
        records.push(record);
        // Stable sort: equal timestamps keep their insertion order, so a
        // paginated sweep never sees ties reordered between pages.
        records.sort_by(|a, b| b.measured_at().cmp(&a.measured_at()));
        Ok(())
    }

    /// Mark the store as torn down. Every later operation fails with the
    /// disposed error kind.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl<T: Measurement> CountRecords for MemoryStore<T> {
    async fn count(&self) -> DomainResult<i64> {
        self.guard()?;
        Ok(self.records.read().await.len() as i64)
    }
}

#[async_trait]
impl<T: Measurement> PageDescending<T> for MemoryStore<T> {
    async fn page_descending(&self, offset: i64, count: i64) -> DomainResult<Vec<T>> {
        self.guard()?;
        if offset < 0 {
            return Err(StoreError::OffsetIsNegative(offset).into());
        }
        if count <= 0 {
            return Err(StoreError::CountIsNotPositive(count).into());
        }
        let records = self.records.read().await;
        Ok(records
            .iter()
            .skip(offset as usize)
            .take(count as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl<T: Measurement> FindById<T> for MemoryStore<T> {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<T>> {
        self.guard()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }
}

#[async_trait]
impl<T: Measurement> DeleteAllRecords for MemoryStore<T> {
    fn entity_name(&self) -> &'static str {
        self.entity
    }

    async fn delete_all(&self) -> DomainResult<()> {
        self.guard()?;
        self.records.write().await.clear();
        Ok(())
    }
}

impl<T> ProviderIdentity for MemoryStore<T> {
    fn provider_info(&self) -> ProviderInfo {
        self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;
    use chrono::{DateTime, TimeZone, Utc};

    #[derive(Debug, Clone, PartialEq)]
    struct Sample {
        id: Uuid,
        at: DateTime<Utc>,
        label: &'static str,
    }

    impl Measurement for Sample {
        fn id(&self) -> Uuid {
            self.id
        }
        fn measured_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    fn sample(label: &'static str, hour: u32) -> Sample {
        Sample {
            id: Uuid::new_v4(),
            at: Utc.with_ymd_and_hms(2022, 7, 1, hour, 0, 0).unwrap(),
            label,
        }
    }

    fn store() -> MemoryStore<Sample> {
        MemoryStore::new(
            "samples",
            ProviderInfo {
                name: "MemorySampleStore",
                version: "1.0",
            },
        )
    }

    #[tokio::test]
    async fn upsert_replaces_record_with_same_id() {
        let store = store();
        let mut record = sample("first", 8);
        store.upsert(record.clone()).await.unwrap();

        record.label = "edited";
        store.upsert(record.clone()).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        let found = store.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.label, "edited");
    }

    #[tokio::test]
    async fn ties_keep_insertion_order_across_calls() {
        let store = store();
        let a = sample("a", 12);
        let b = sample("b", 12);
        store.upsert(a.clone()).await.unwrap();
        store.upsert(b.clone()).await.unwrap();

        let first = store.page_descending(0, 10).await.unwrap();
        let second = store.page_descending(0, 10).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].id, a.id);
        assert_eq!(first[1].id, b.id);
    }

    #[tokio::test]
    async fn delete_all_is_idempotent() {
        let store = store();
        store.upsert(sample("x", 9)).await.unwrap();
        store.delete_all().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        store.delete_all().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn disposed_store_rejects_every_operation() {
        let store = store();
        store.upsert(sample("x", 9)).await.unwrap();
        store.dispose();

        let err = store.count().await.unwrap_err();
        assert_eq!(err, DomainError::Store(StoreError::Disposed("samples")));
        assert!(store.page_descending(0, 10).await.is_err());
        assert!(store.delete_all().await.is_err());
    }
}
