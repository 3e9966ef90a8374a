use crate::domains::core::memory::MemoryStore;
use crate::domains::core::repository::{ProviderInfo, RecordStore};
use crate::domains::weight::types::WeightRecord;

/// Store contract for weight measurements
pub trait WeightRepository: RecordStore<WeightRecord> {}

impl<S> WeightRepository for S where S: RecordStore<WeightRecord> {}

/// In-memory weight store
pub type MemoryWeightRepository = MemoryStore<WeightRecord>;

pub fn memory_weight_repository() -> MemoryWeightRepository {
    MemoryStore::new(
        "weight",
        ProviderInfo {
            name: "MemoryWeightRepository",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}
