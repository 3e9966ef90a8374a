pub mod repository;
pub mod types;

pub use repository::{memory_weight_repository, MemoryWeightRepository, WeightRepository};
pub use types::{WeightRecord, WeightUnit};
