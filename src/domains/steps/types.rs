use crate::domains::core::repository::Measurement;
use crate::errors::{DomainResult, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Daily step goal used when a record does not carry its own
pub const DEFAULT_STEP_GOAL: i64 = 10_000;

/// A single step-count entry with the goal that applied on that day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsRecord {
    pub id: Uuid,
    pub count: i64,
    pub goal: i64,
    pub measured_at: DateTime<Utc>,
}

impl StepsRecord {
    pub fn new(count: i64, goal: i64, measured_at: DateTime<Utc>) -> DomainResult<Self> {
        if count < 0 {
            return Err(ValidationError::invalid_value("count", "must not be negative").into());
        }
        if goal <= 0 {
            return Err(ValidationError::invalid_value("goal", "must be positive").into());
        }
        Ok(Self {
            id: Uuid::new_v4(),
            count,
            goal,
            measured_at,
        })
    }

    pub fn goal_reached(&self) -> bool {
        self.count >= self.goal
    }
}

impl Measurement for StepsRecord {
    fn id(&self) -> Uuid {
        self.id
    }
    fn measured_at(&self) -> DateTime<Utc> {
        self.measured_at
    }
}
