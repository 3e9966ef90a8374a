pub mod repository;
pub mod types;

pub use repository::{memory_food_repository, FoodRepository, MemoryFoodRepository};
pub use types::{FoodRecord, Meal};
