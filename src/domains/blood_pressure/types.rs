use crate::domains::core::repository::Measurement;
use crate::errors::{DomainResult, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pressure units offered by the measurement UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    #[serde(rename = "mmHg")]
    MmHg,
    #[serde(rename = "kPa")]
    KPa,
}

impl PressureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressureUnit::MmHg => "mmHg",
            PressureUnit::KPa => "kPa",
        }
    }
}

/// A single blood-pressure measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureRecord {
    pub id: Uuid,
    pub systolic: i64,
    pub diastolic: i64,
    pub pulse: i64,
    pub unit: PressureUnit,
    pub under_medication: bool,
    pub measured_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl BloodPressureRecord {
    pub fn new(
        systolic: i64,
        diastolic: i64,
        pulse: i64,
        unit: PressureUnit,
        under_medication: bool,
        measured_at: DateTime<Utc>,
        note: Option<String>,
    ) -> DomainResult<Self> {
        if systolic <= 0 {
            return Err(ValidationError::invalid_value("systolic", "must be positive").into());
        }
        if diastolic <= 0 {
            return Err(ValidationError::invalid_value("diastolic", "must be positive").into());
        }
        if diastolic >= systolic {
            return Err(ValidationError::invalid_value(
                "diastolic",
                "must be below the systolic reading",
            )
            .into());
        }
        if pulse <= 0 {
            return Err(ValidationError::invalid_value("pulse", "must be positive").into());
        }
        Ok(Self {
            id: Uuid::new_v4(),
            systolic,
            diastolic,
            pulse,
            unit,
            under_medication,
            measured_at,
            note,
        })
    }
}

impl Measurement for BloodPressureRecord {
    fn id(&self) -> Uuid {
        self.id
    }
    fn measured_at(&self) -> DateTime<Utc> {
        self.measured_at
    }
}
