use crate::domains::blood_pressure::types::BloodPressureRecord;
use crate::domains::core::memory::MemoryStore;
use crate::domains::core::repository::{ProviderInfo, RecordStore};

/// Store contract for blood-pressure measurements
pub trait BloodPressureRepository: RecordStore<BloodPressureRecord> {}

impl<S> BloodPressureRepository for S where S: RecordStore<BloodPressureRecord> {}

/// In-memory blood-pressure store
pub type MemoryBloodPressureRepository = MemoryStore<BloodPressureRecord>;

pub fn memory_blood_pressure_repository() -> MemoryBloodPressureRepository {
    MemoryStore::new(
        "blood_pressure",
        ProviderInfo {
            name: "MemoryBloodPressureRepository",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}
