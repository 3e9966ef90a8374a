// Public modules
pub mod domains;
pub mod errors;

pub use domains::core::delete_service::BulkDeleteService;
pub use domains::export::service::ExportService;
