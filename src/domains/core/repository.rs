use crate::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity facts describing a concrete store implementation. Recorded in
/// export documents for provenance only; never consulted for behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// A measurement that can live in a record store. Records are immutable
/// values; an edit replaces the record under the same ID.
pub trait Measurement: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn measured_at(&self) -> DateTime<Utc>;
}

/// Trait for counting records in a store
#[async_trait]
pub trait CountRecords {
    /// Number of records currently retrievable via pagination.
    async fn count(&self) -> DomainResult<i64>;
}

/// Trait for paging records newest-first
#[async_trait]
pub trait PageDescending<T> {
    /// Return up to `count` records starting at `offset`, strictly
    /// newest-measurement-first with stable tie order. An `offset` past the
    /// end yields an empty page, never an error. A negative `offset` or a
    /// non-positive `count` is a caller error.
    async fn page_descending(&self, offset: i64, count: i64) -> DomainResult<Vec<T>>;
}

/// Trait for looking up a single record
#[async_trait]
pub trait FindById<T> {
    /// `None` when no record carries `id`; an absent record is a normal
    /// outcome, not a fault.
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<T>>;
}

/// Trait for clearing a store wholesale
#[async_trait]
pub trait DeleteAllRecords: Send + Sync {
    /// The entity name (for logging and aggregate reporting)
    fn entity_name(&self) -> &'static str;

    /// Remove every record. Idempotent on an empty store.
    async fn delete_all(&self) -> DomainResult<()>;
}

/// Trait exposing the store's provenance identity
pub trait ProviderIdentity {
    fn provider_info(&self) -> ProviderInfo;
}

/// Full record-store contract, implemented once per entity type.
pub trait RecordStore<T>:
    CountRecords + PageDescending<T> + FindById<T> + DeleteAllRecords + ProviderIdentity + Send + Sync
{
}

/// Implement for any type that implements all required traits
impl<S, T> RecordStore<T> for S where
    S: CountRecords
        + PageDescending<T>
        + FindById<T>
        + DeleteAllRecords
        + ProviderIdentity
        + Send
        + Sync
{
}
