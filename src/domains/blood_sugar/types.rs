use crate::domains::core::repository::Measurement;
use crate::errors::{DomainResult, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Glucose concentration units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SugarUnit {
    #[serde(rename = "mg/dL")]
    MgDl,
    #[serde(rename = "mmol/L")]
    MmolL,
}

impl SugarUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            SugarUnit::MgDl => "mg/dL",
            SugarUnit::MmolL => "mmol/L",
        }
    }
}

/// A single blood-sugar measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodSugarRecord {
    pub id: Uuid,
    pub value: f64,
    pub unit: SugarUnit,
    pub measured_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl BloodSugarRecord {
    pub fn new(
        value: f64,
        unit: SugarUnit,
        measured_at: DateTime<Utc>,
        note: Option<String>,
    ) -> DomainResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(
                ValidationError::invalid_value("value", "glucose must be a positive number").into(),
            );
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

impl Measurement for BloodSugarRecord {
    fn id(&self) -> Uuid {
        self.id
    }
    fn measured_at(&self) -> DateTime<Utc> {
        self.measured_at
    }
}
