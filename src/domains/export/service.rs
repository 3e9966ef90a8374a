use crate::domains::export::serializer::EntitySection;
use crate::domains::export::types::{DataKind, ExportError, ExportOptions};
use crate::domains::export::writer::{JsonWriter, WriterProvider};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Source of the document timestamp
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Streams the selected entity sections into one JSON document.
///
/// The first serialization failure aborts the remaining sections; the
/// partially written document is left behind after a best-effort close
/// rather than buffered and discarded. Deleting aggregates failures
/// instead (`BulkDeleteService`) — a partial wipe should still wipe as
/// much as it can, while a silently resumed export would misrepresent
/// completeness.
pub struct ExportService {
    options: ExportOptions,
    sections: HashMap<DataKind, Box<dyn EntitySection>>,
    provider: Arc<dyn WriterProvider>,
    clock: Arc<dyn Clock>,
}

impl ExportService {
    pub fn new(
        options: ExportOptions,
        sections: Vec<Box<dyn EntitySection>>,
        provider: Arc<dyn WriterProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sections = sections
            .into_iter()
            .map(|section| (section.kind(), section))
            .collect();
        Self {
            options,
            sections,
            provider,
            clock,
        }
    }

    /// Run the export. The returned result is the completion signal: `Ok`
    /// for a fully written document, otherwise the provisioning failure or
    /// the first serialization error.
    pub async fn execute(&self) -> Result<(), ExportError> {
        let mut writer = match self.provider.provide().await {
            Ok(writer) => writer,
            Err(e) => {
                log::error!("No destination writer for export: {}", e);
                return Err(e);
            }
        };

        let outcome = self.write_document(&mut writer).await;
        if let Err(close_err) = writer.close() {
            // Never overrides the outcome of the write itself.
            log::error!("Failed to close export destination: {}", close_err);
        }
        match &outcome {
            Ok(()) => log::debug!("Export document completed"),
            Err(e) => log::error!("Export aborted: {}", e),
        }
        outcome
    }

    async fn write_document(&self, writer: &mut JsonWriter) -> Result<(), ExportError> {
        writer.begin_object()?;
        writer.property_name("created")?;
        writer.value_timestamp(self.clock.now())?;
        for kind in self.options.selected() {
            let Some(section) = self.sections.get(kind) else {
                // A configuration defect, not a reason to lose the rest of
                // the document.
                log::error!(
                    "No serializer registered for {}; section skipped",
                    kind.section_name()
                );
                continue;
            };
            writer.property_name(kind.section_name())?;
            section.write_section(writer).await?;
        }
        writer.end_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::blood_pressure::types::{BloodPressureRecord, PressureUnit};
    use crate::domains::core::repository::{
        CountRecords, DeleteAllRecords, FindById, PageDescending, ProviderIdentity, ProviderInfo,
    };
    use crate::domains::export::serializer::{
        blood_pressure_section, steps_section, weight_section,
    };
    use crate::domains::export::test_util::{ReleaseTracking, SharedBuf};
    use crate::domains::steps::types::{StepsRecord, DEFAULT_STEP_GOAL};
    use crate::domains::weight::types::{WeightRecord, WeightUnit};
    use crate::errors::{DomainResult, StoreError};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicBool, Ordering};
    use uuid::Uuid;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2022, 7, 1, 12, 0, 0).unwrap(),
        ))
    }

    struct BufProvider(SharedBuf);

    #[async_trait]
    impl WriterProvider for BufProvider {
        async fn provide(&self) -> Result<JsonWriter, ExportError> {
            Ok(JsonWriter::new(Box::new(self.0.clone())))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl WriterProvider for FailingProvider {
        async fn provide(&self) -> Result<JsonWriter, ExportError> {
            Err(ExportError::Cancelled)
        }
    }

    /// Weight store whose pagination fails partway through a section.
    struct FaultyStore {
        attempted: AtomicBool,
    }

    #[async_trait]
    impl CountRecords for FaultyStore {
        async fn count(&self) -> DomainResult<i64> {
            Ok(1)
        }
    }

    #[async_trait]
    impl PageDescending<WeightRecord> for FaultyStore {
        async fn page_descending(&self, _offset: i64, _count: i64) -> DomainResult<Vec<WeightRecord>> {
            self.attempted.store(true, Ordering::SeqCst);
            Err(StoreError::Other("read failed".to_string()).into())
        }
    }

    #[async_trait]
    impl FindById<WeightRecord> for FaultyStore {
        async fn find_by_id(&self, _id: Uuid) -> DomainResult<Option<WeightRecord>> {
            Ok(None)
        }
    }

    #[async_trait]
    impl DeleteAllRecords for FaultyStore {
        fn entity_name(&self) -> &'static str {
            "weight"
        }
        async fn delete_all(&self) -> DomainResult<()> {
            Ok(())
        }
    }

    impl ProviderIdentity for FaultyStore {
        fn provider_info(&self) -> ProviderInfo {
            ProviderInfo {
                name: "FaultyStore",
                version: "1.0",
            }
        }
    }

    #[tokio::test]
    async fn empty_selection_produces_only_the_created_stamp() {
        let buf = SharedBuf::default();
        let service = ExportService::new(
            ExportOptions::from_selection([]),
            Vec::new(),
            Arc::new(BufProvider(buf.clone())),
            fixed_clock(),
        );
        service.execute().await.unwrap();
        assert_eq!(buf.contents(), r#"{"created":"2022-07-01T12:00:00"}"#);
    }

    #[tokio::test]
    async fn writes_selected_sections_in_document_order() {
        let weight = Arc::new(crate::domains::weight::memory_weight_repository());
        let pressure = Arc::new(crate::domains::blood_pressure::memory_blood_pressure_repository());
        let steps = Arc::new(crate::domains::steps::memory_steps_repository());
        let at = Utc.with_ymd_and_hms(2022, 6, 30, 7, 30, 0).unwrap();
        weight
            .upsert(WeightRecord::new(81.4, WeightUnit::Kg, at, None).unwrap())
            .await
            .unwrap();
        pressure
            .upsert(
                BloodPressureRecord::new(118, 78, 64, PressureUnit::MmHg, true, at, None).unwrap(),
            )
            .await
            .unwrap();
        steps
            .upsert(StepsRecord::new(9_512, 10_000, at).unwrap())
            .await
            .unwrap();

        let buf = SharedBuf::default();
        let service = ExportService::new(
            ExportOptions::from_selection([DataKind::Steps, DataKind::Weight, DataKind::BloodPressure]),
            vec![
                Box::new(steps_section(steps, DEFAULT_STEP_GOAL)),
                Box::new(weight_section(weight)),
                Box::new(blood_pressure_section(pressure)),
            ],
            Arc::new(BufProvider(buf.clone())),
            fixed_clock(),
        );
        service.execute().await.unwrap();

        let contents = buf.contents();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["created"], "2022-07-01T12:00:00");
        assert_eq!(parsed["weight"]["records"][0]["value"], 81.4);
        assert_eq!(parsed["bloodPressure"]["records"][0]["underMedication"], true);
        assert_eq!(parsed["steps"]["defaultGoal"], DEFAULT_STEP_GOAL);
        // Sections keep document order regardless of selection order.
        let weight_at = contents.find("\"weight\"").unwrap();
        let pressure_at = contents.find("\"bloodPressure\"").unwrap();
        let steps_at = contents.find("\"steps\"").unwrap();
        assert!(weight_at < pressure_at && pressure_at < steps_at);
    }

    #[tokio::test]
    async fn first_section_error_aborts_later_sections_and_still_closes() {
        let steps = Arc::new(crate::domains::steps::memory_steps_repository());
        let faulty = Arc::new(FaultyStore {
            attempted: AtomicBool::new(false),
        });

        let buf = SharedBuf::default();
        let (sink, released) = ReleaseTracking::new(buf.clone());
        struct OneShotProvider(std::sync::Mutex<Option<JsonWriter>>);
        #[async_trait]
        impl WriterProvider for OneShotProvider {
            async fn provide(&self) -> Result<JsonWriter, ExportError> {
                Ok(self.0.lock().unwrap().take().expect("single provisioning"))
            }
        }
        let provider = Arc::new(OneShotProvider(std::sync::Mutex::new(Some(
            JsonWriter::new(Box::new(sink)),
        ))));

        let service = ExportService::new(
            ExportOptions::from_selection([DataKind::Weight, DataKind::Steps]),
            vec![
                Box::new(weight_section(faulty.clone())),
                Box::new(steps_section(steps, DEFAULT_STEP_GOAL)),
            ],
            provider,
            fixed_clock(),
        );

        let err = service.execute().await.unwrap_err();
        assert!(matches!(err, ExportError::Domain(_)));
        assert!(faulty.attempted.load(Ordering::SeqCst));
        // Fail-fast: the steps section never made it into the document.
        assert!(!buf.contents().contains("\"steps\""));
        // The destination was still released.
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn provisioning_failure_short_circuits() {
        let service = ExportService::new(
            ExportOptions::all(),
            Vec::new(),
            Arc::new(FailingProvider),
            fixed_clock(),
        );
        assert!(matches!(
            service.execute().await.unwrap_err(),
            ExportError::Cancelled
        ));
    }

    #[tokio::test]
    async fn unregistered_selection_is_skipped_not_fatal() {
        let _ = env_logger::builder().is_test(true).try_init();
        let steps = Arc::new(crate::domains::steps::memory_steps_repository());
        let buf = SharedBuf::default();
        let service = ExportService::new(
            ExportOptions::from_selection([DataKind::Weight, DataKind::Steps]),
            vec![Box::new(steps_section(steps, DEFAULT_STEP_GOAL))],
            Arc::new(BufProvider(buf.clone())),
            fixed_clock(),
        );
        service.execute().await.unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&buf.contents()).unwrap();
        assert!(parsed.get("weight").is_none());
        assert!(parsed.get("steps").is_some());
    }
}
