use crate::domains::blood_pressure::types::BloodPressureRecord;
use crate::domains::blood_sugar::types::BloodSugarRecord;
use crate::domains::core::repository::RecordStore;
use crate::domains::export::types::{DataKind, ExportError};
use crate::domains::export::writer::JsonWriter;
use crate::domains::food::types::FoodRecord;
use crate::domains::steps::types::StepsRecord;
use crate::domains::weight::types::WeightRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Records fetched per page while draining a store
pub const PAGE_SIZE: i64 = 128;

type MetadataFn = Box<dyn Fn(&mut JsonWriter) -> Result<(), ExportError> + Send + Sync>;

type WriteRecordFn<T> = fn(&T, &mut JsonWriter) -> Result<(), ExportError>;

/// One entity's contribution to the export document
#[async_trait]
pub trait EntitySection: Send + Sync {
    fn kind(&self) -> DataKind;

    /// Write this entity's complete section as one JSON object.
    async fn write_section(&self, writer: &mut JsonWriter) -> Result<(), ExportError>;
}

/// Serializes one record store as a self-describing section: provider
/// identity, optional scalar metadata, then the paginated record array.
/// The per-entity variation is confined to `write_record` and the
/// metadata hook; the pagination driver is shared.
pub struct EntitySerializer<S, T> {
    kind: DataKind,
    store: Arc<S>,
    metadata: Option<MetadataFn>,
    write_record: WriteRecordFn<T>,
}

impl<S, T> EntitySerializer<S, T>
where
    S: RecordStore<T> + 'static,
    T: Send + Sync + 'static,
{
    fn new(kind: DataKind, store: Arc<S>, write_record: WriteRecordFn<T>) -> Self {
        Self {
            kind,
            store,
            metadata: None,
            write_record,
        }
    }

    fn with_metadata(mut self, metadata: MetadataFn) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[async_trait]
impl<S, T> EntitySection for EntitySerializer<S, T>
where
    S: RecordStore<T> + 'static,
    T: Send + Sync + 'static,
{
    fn kind(&self) -> DataKind {
        self.kind
    }

    async fn write_section(&self, writer: &mut JsonWriter) -> Result<(), ExportError> {
        writer.begin_object()?;

        writer.property_name("implementations")?;
        writer.begin_object()?;
        let info = self.store.provider_info();
        writer.property_name("name")?;
        writer.value_str(info.name)?;
        writer.property_name("version")?;
        writer.value_str(info.version)?;
        writer.end_object()?;

        if let Some(metadata) = &self.metadata {
            metadata(writer)?;
        }

        writer.property_name("records")?;
        writer.begin_array()?;
        // Drain against the count observed now. A store mutated during the
        // sweep may yield more or fewer records; the empty page keeps a
        // shrunken store from looping.
        let total = self.store.count().await?;
        let mut offset: i64 = 0;
        while offset < total {
            let page = self.store.page_descending(offset, PAGE_SIZE).await?;
            if page.is_empty() {
                break;
            }
            for record in &page {
                (self.write_record)(record, writer)?;
            }
            offset += page.len() as i64;
        }
        writer.end_array()?;

        writer.end_object()
    }
}

fn write_note(writer: &mut JsonWriter, note: &Option<String>) -> Result<(), ExportError> {
    writer.property_name("note")?;
    match note {
        Some(note) => writer.value_str(note),
        None => writer.value_null(),
    }
}

fn write_weight_record(record: &WeightRecord, writer: &mut JsonWriter) -> Result<(), ExportError> {
    writer.begin_object()?;
    writer.property_name("id")?;
    writer.value_str(&record.id.to_string())?;
    writer.property_name("value")?;
    writer.value_f64(record.value)?;
    writer.property_name("unit")?;
    writer.value_str(record.unit.as_str())?;
    writer.property_name("measuredAt")?;
    writer.value_timestamp(record.measured_at)?;
    write_note(writer, &record.note)?;
    writer.end_object()
}

fn write_blood_pressure_record(
    record: &BloodPressureRecord,
    writer: &mut JsonWriter,
) -> Result<(), ExportError> {
    writer.begin_object()?;
    writer.property_name("id")?;
    writer.value_str(&record.id.to_string())?;
    writer.property_name("systolic")?;
    writer.value_i64(record.systolic)?;
    writer.property_name("diastolic")?;
    writer.value_i64(record.diastolic)?;
    writer.property_name("pulse")?;
    writer.value_i64(record.pulse)?;
    writer.property_name("unit")?;
    writer.value_str(record.unit.as_str())?;
    writer.property_name("underMedication")?;
    writer.value_bool(record.under_medication)?;
    writer.property_name("measuredAt")?;
    writer.value_timestamp(record.measured_at)?;
    write_note(writer, &record.note)?;
    writer.end_object()
}

fn write_steps_record(record: &StepsRecord, writer: &mut JsonWriter) -> Result<(), ExportError> {
    writer.begin_object()?;
    writer.property_name("id")?;
    writer.value_str(&record.id.to_string())?;
    writer.property_name("count")?;
    writer.value_i64(record.count)?;
    writer.property_name("goal")?;
    writer.value_i64(record.goal)?;
    writer.property_name("measuredAt")?;
    writer.value_timestamp(record.measured_at)?;
    writer.end_object()
}

fn write_blood_sugar_record(
    record: &BloodSugarRecord,
    writer: &mut JsonWriter,
) -> Result<(), ExportError> {
    writer.begin_object()?;
    writer.property_name("id")?;
    writer.value_str(&record.id.to_string())?;
    writer.property_name("value")?;
    writer.value_f64(record.value)?;
    writer.property_name("unit")?;
    writer.value_str(record.unit.as_str())?;
    writer.property_name("measuredAt")?;
    writer.value_timestamp(record.measured_at)?;
    write_note(writer, &record.note)?;
    writer.end_object()
}

fn write_food_record(record: &FoodRecord, writer: &mut JsonWriter) -> Result<(), ExportError> {
    writer.begin_object()?;
    writer.property_name("id")?;
    writer.value_str(&record.id.to_string())?;
    writer.property_name("name")?;
    writer.value_str(&record.name)?;
    writer.property_name("calories")?;
    writer.value_i64(record.calories)?;
    writer.property_name("meal")?;
    writer.value_str(record.meal.as_str())?;
    writer.property_name("consumedAt")?;
    writer.value_timestamp(record.consumed_at)?;
    write_note(writer, &record.note)?;
    writer.end_object()
}

pub fn weight_section<S>(store: Arc<S>) -> EntitySerializer<S, WeightRecord>
where
    S: RecordStore<WeightRecord> + 'static,
{
    EntitySerializer::new(DataKind::Weight, store, write_weight_record)
}

pub fn blood_pressure_section<S>(store: Arc<S>) -> EntitySerializer<S, BloodPressureRecord>
where
    S: RecordStore<BloodPressureRecord> + 'static,
{
    EntitySerializer::new(DataKind::BloodPressure, store, write_blood_pressure_record)
}

/// The steps section carries the configured default goal as scalar
/// metadata ahead of its record array.
pub fn steps_section<S>(store: Arc<S>, default_goal: i64) -> EntitySerializer<S, StepsRecord>
where
    S: RecordStore<StepsRecord> + 'static,
{
    EntitySerializer::new(DataKind::Steps, store, write_steps_record).with_metadata(Box::new(
        move |writer| {
            writer.property_name("defaultGoal")?;
            writer.value_i64(default_goal)
        },
    ))
}

pub fn blood_sugar_section<S>(store: Arc<S>) -> EntitySerializer<S, BloodSugarRecord>
where
    S: RecordStore<BloodSugarRecord> + 'static,
{
    EntitySerializer::new(DataKind::BloodSugar, store, write_blood_sugar_record)
}

pub fn food_section<S>(store: Arc<S>) -> EntitySerializer<S, FoodRecord>
where
    S: RecordStore<FoodRecord> + 'static,
{
    EntitySerializer::new(DataKind::Food, store, write_food_record)
}
