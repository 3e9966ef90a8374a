pub mod serializer;
pub mod service;
pub mod types;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_util;

pub use serializer::{
    blood_pressure_section, blood_sugar_section, food_section, steps_section, weight_section,
    EntitySection, EntitySerializer, PAGE_SIZE,
};
pub use service::{Clock, ExportService, SystemClock};
pub use types::{DataKind, ExportError, ExportOptions};
pub use writer::{FileWriterProvider, JsonWriter, WriterProvider, TIMESTAMP_FORMAT};
