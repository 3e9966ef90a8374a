pub mod repository;
pub mod types;

pub use repository::{
    memory_blood_sugar_repository, BloodSugarRepository, MemoryBloodSugarRepository,
};
pub use types::{BloodSugarRecord, SugarUnit};
