pub mod repository;
pub mod types;

pub use repository::{
    memory_blood_pressure_repository, BloodPressureRepository, MemoryBloodPressureRepository,
};
pub use types::{BloodPressureRecord, PressureUnit};
