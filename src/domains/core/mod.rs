pub mod delete_service;
pub mod memory;
pub mod repository;

// Re-export the traits and core types, not specific implementations
pub use delete_service::BulkDeleteService;
pub use repository::{
    CountRecords, DeleteAllRecords, FindById, Measurement, PageDescending, ProviderIdentity,
    ProviderInfo, RecordStore,
};
