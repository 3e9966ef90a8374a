use crate::domains::core::memory::MemoryStore;
use crate::domains::core::repository::{ProviderInfo, RecordStore};
use crate::domains::steps::types::StepsRecord;

/// Store contract for step-count entries
pub trait StepsRepository: RecordStore<StepsRecord> {}

impl<S> StepsRepository for S where S: RecordStore<StepsRecord> {}

/// In-memory steps store
pub type MemoryStepsRepository = MemoryStore<StepsRecord>;

pub fn memory_steps_repository() -> MemoryStepsRepository {
    MemoryStore::new(
        "steps",
        ProviderInfo {
            name: "MemoryStepsRepository",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}
