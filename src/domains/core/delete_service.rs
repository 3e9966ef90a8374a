use crate::domains::core::repository::DeleteAllRecords;
use crate::errors::{DomainError, ServiceError, ServiceResult};
use std::sync::Arc;

/// Clears every registered record store in one sweep. Unlike the export
/// path, a failing store does not stop the sweep: each store is attempted
/// independently and every caught failure is reported at the end, in
/// attempt order.
pub struct BulkDeleteService {
    stores: Vec<Arc<dyn DeleteAllRecords>>,
}

impl BulkDeleteService {
    pub fn new(stores: Vec<Arc<dyn DeleteAllRecords>>) -> Self {
        Self { stores }
    }

    pub async fn execute(&self) -> ServiceResult<()> {
        let mut failures: Vec<DomainError> = Vec::new();
        for store in &self.stores {
            log::debug!("Clearing all {} records", store.entity_name());
            if let Err(e) = store.delete_all().await {
                log::error!("Failed to clear {} records: {}", store.entity_name(), e);
                failures.push(e);
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::BulkDeleteFailed(failures))
        }
    }
}
