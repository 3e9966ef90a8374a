use crate::domains::blood_sugar::types::BloodSugarRecord;
use crate::domains::core::memory::MemoryStore;
use crate::domains::core::repository::{ProviderInfo, RecordStore};

/// Store contract for blood-sugar measurements
pub trait BloodSugarRepository: RecordStore<BloodSugarRecord> {}

impl<S> BloodSugarRepository for S where S: RecordStore<BloodSugarRecord> {}

/// In-memory blood-sugar store
pub type MemoryBloodSugarRepository = MemoryStore<BloodSugarRecord>;

pub fn memory_blood_sugar_repository() -> MemoryBloodSugarRepository {
    MemoryStore::new(
        "blood_sugar",
        ProviderInfo {
            name: "MemoryBloodSugarRepository",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}
