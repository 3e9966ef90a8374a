use crate::domains::core::memory::MemoryStore;
use crate::domains::core::repository::{ProviderInfo, RecordStore};
use crate::domains::food::types::FoodRecord;

/// Store contract for food diary entries
pub trait FoodRepository: RecordStore<FoodRecord> {}

impl<S> FoodRepository for S where S: RecordStore<FoodRecord> {}

/// In-memory food store
pub type MemoryFoodRepository = MemoryStore<FoodRecord>;

pub fn memory_food_repository() -> MemoryFoodRepository {
    MemoryStore::new(
        "food",
        ProviderInfo {
            name: "MemoryFoodRepository",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}
