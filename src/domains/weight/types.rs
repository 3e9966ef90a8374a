use crate::domains::core::repository::Measurement;
use crate::errors::{DomainResult, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weight units offered by the scale UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lb,
    St,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
            WeightUnit::St => "st",
        }
    }
}

/// A single weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRecord {
    pub id: Uuid,
    pub value: f64,
    pub unit: WeightUnit,
    pub measured_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl WeightRecord {
    pub fn new(
        value: f64,
        unit: WeightUnit,
        measured_at: DateTime<Utc>,
        note: Option<String>,
    ) -> DomainResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::invalid_value("value", "weight must be a positive number").into());
        }
        Ok(Self {
            id: Uuid::new_v4(),
            value,
            unit,
            measured_at,
            note,
        })
    }
}

impl Measurement for WeightRecord {
    fn id(&self) -> Uuid {
        self.id
    }
    fn measured_at(&self) -> DateTime<Utc> {
        self.measured_at
    }
}
