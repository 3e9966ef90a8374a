use crate::domains::core::repository::Measurement;
use crate::errors::{DomainResult, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Meal slot a food entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Meal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
            Meal::Snack => "snack",
        }
    }
}

/// A single food diary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    pub id: Uuid,
    pub name: String,
    pub calories: i64,
    pub meal: Meal,
    pub consumed_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl FoodRecord {
    pub fn new(
        name: &str,
        calories: i64,
        meal: Meal,
        consumed_at: DateTime<Utc>,
        note: Option<String>,
    ) -> DomainResult<Self> {
        if name.trim().is_empty() {
            return Err(ValidationError::required("name").into());
        }
        if calories < 0 {
            return Err(ValidationError::invalid_value("calories", "must not be negative").into());
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            calories,
            meal,
            consumed_at,
            note,
        })
    }
}

impl Measurement for FoodRecord {
    fn id(&self) -> Uuid {
        self.id
    }
    fn measured_at(&self) -> DateTime<Utc> {
        self.consumed_at
    }
}
