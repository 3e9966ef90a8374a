pub mod repository;
pub mod types;

pub use repository::{memory_steps_repository, MemoryStepsRepository, StepsRepository};
pub use types::{StepsRecord, DEFAULT_STEP_GOAL};
