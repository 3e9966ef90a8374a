use crate::domains::export::types::ExportError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// ISO-8601 extended, second precision, no zone suffix. Round-trips via
/// `NaiveDateTime::parse_from_str`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const SINK_BUFFER_BYTES: usize = 256 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object,
    Array,
}

/// Streaming JSON writer with an enforced context stack: every `end_*`
/// must match the most recently opened `begin_*`, and a value inside an
/// object must be preceded by exactly one `property_name`. A violating
/// call is rejected before any output is produced, so the sink never sees
/// the malformed suffix. I/O failures surface immediately; the writer
/// stays closable afterward so the sink can always be released.
pub struct JsonWriter {
    sink: Option<BufWriter<Box<dyn Write + Send>>>,
    // (scope, has_entries) for every open container, innermost last
    stack: Vec<(Scope, bool)>,
    pending_name: bool,
    done: bool,
}

impl JsonWriter {
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Some(BufWriter::with_capacity(SINK_BUFFER_BYTES, sink)),
            stack: Vec::new(),
            pending_name: false,
            done: false,
        }
    }

    pub fn to_file(path: &Path) -> Result<Self, ExportError> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(Box::new(file)))
    }

    fn write_raw(&mut self, token: &str) -> Result<(), ExportError> {
        let sink = self
            .sink
            .as_mut()
            .ok_or_else(|| ExportError::InvalidStructure("write after close".to_string()))?;
        sink.write_all(token.as_bytes())
            .map_err(|e| ExportError::Io(e.to_string()))
    }

    /// Validate that a value may start at the current position and commit
    /// the state transition. Returns whether a separating comma is due.
    fn begin_value(&mut self, what: &str) -> Result<bool, ExportError> {
        let needs_comma = match self.stack.last() {
            None => {
                if self.done {
                    return Err(ExportError::InvalidStructure(format!(
                        "{what} after the document root was closed"
                    )));
                }
                false
            }
            Some((Scope::Object, _)) => {
                if !self.pending_name {
                    return Err(ExportError::InvalidStructure(format!(
                        "{what} inside an object requires a property name"
                    )));
                }
                false
            }
            Some((Scope::Array, has_entries)) => *has_entries,
        };
        match self.stack.last_mut() {
            Some((Scope::Object, _)) => self.pending_name = false,
            Some((Scope::Array, has_entries)) => *has_entries = true,
            None => {}
        }
        Ok(needs_comma)
    }

    fn write_scalar(&mut self, token: &str) -> Result<(), ExportError> {
        let needs_comma = self.begin_value("value")?;
        if needs_comma {
            self.write_raw(",")?;
        }
        self.write_raw(token)?;
        if self.stack.is_empty() {
            self.done = true;
        }
        Ok(())
    }

    pub fn begin_object(&mut self) -> Result<(), ExportError> {
        let needs_comma = self.begin_value("object")?;
        self.stack.push((Scope::Object, false));
        if needs_comma {
            self.write_raw(",")?;
        }
        self.write_raw("{")
    }

    pub fn end_object(&mut self) -> Result<(), ExportError> {
        match self.stack.last() {
            Some((Scope::Object, _)) if !self.pending_name => {}
            _ => {
                return Err(ExportError::InvalidStructure(
                    "end_object without a matching begin_object".to_string(),
                ))
            }
        }
        self.stack.pop();
        if self.stack.is_empty() {
            self.done = true;
        }
        self.write_raw("}")
    }

    pub fn begin_array(&mut self) -> Result<(), ExportError> {
        let needs_comma = self.begin_value("array")?;
        self.stack.push((Scope::Array, false));
        if needs_comma {
            self.write_raw(",")?;
        }
        self.write_raw("[")
    }

    pub fn end_array(&mut self) -> Result<(), ExportError> {
        match self.stack.last() {
            Some((Scope::Array, _)) => {}
            _ => {
                return Err(ExportError::InvalidStructure(
                    "end_array without a matching begin_array".to_string(),
                ))
            }
        }
        self.stack.pop();
        if self.stack.is_empty() {
            self.done = true;
        }
        self.write_raw("]")
    }

    /// Must be directly inside an object and followed by exactly one
    /// value-producing call.
    pub fn property_name(&mut self, name: &str) -> Result<(), ExportError> {
        let needs_comma = match self.stack.last() {
            Some((Scope::Object, has_entries)) if !self.pending_name => *has_entries,
            _ => {
                return Err(ExportError::InvalidStructure(format!(
                    "property name {name:?} outside an object"
                )))
            }
        };
        let encoded =
            serde_json::to_string(name).map_err(|e| ExportError::Serialization(e.to_string()))?;
        if let Some((_, has_entries)) = self.stack.last_mut() {
            *has_entries = true;
        }
        self.pending_name = true;
        if needs_comma {
            self.write_raw(",")?;
        }
        self.write_raw(&encoded)?;
        self.write_raw(":")
    }

    pub fn value_i64(&mut self, value: i64) -> Result<(), ExportError> {
        self.write_scalar(&value.to_string())
    }

    pub fn value_f64(&mut self, value: f64) -> Result<(), ExportError> {
        if !value.is_finite() {
            return Err(ExportError::Serialization(format!(
                "{value} is not representable in JSON"
            )));
        }
        let token =
            serde_json::to_string(&value).map_err(|e| ExportError::Serialization(e.to_string()))?;
        self.write_scalar(&token)
    }

    pub fn value_str(&mut self, value: &str) -> Result<(), ExportError> {
        let token =
            serde_json::to_string(value).map_err(|e| ExportError::Serialization(e.to_string()))?;
        self.write_scalar(&token)
    }

    pub fn value_bool(&mut self, value: bool) -> Result<(), ExportError> {
        self.write_scalar(if value { "true" } else { "false" })
    }

    pub fn value_timestamp(&mut self, value: DateTime<Utc>) -> Result<(), ExportError> {
        let formatted = value.format(TIMESTAMP_FORMAT).to_string();
        self.write_scalar(&format!("\"{formatted}\""))
    }

    pub fn value_null(&mut self) -> Result<(), ExportError> {
        self.write_scalar("null")
    }

    /// Flush and release the sink. Idempotent; always safe to call after a
    /// failed write. The sink is released even when the final flush fails.
    pub fn close(&mut self) -> Result<(), ExportError> {
        if let Some(mut sink) = self.sink.take() {
            sink.flush().map_err(|e| ExportError::Io(e.to_string()))?;
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }
}

/// Provides the destination writer for an export run. Provisioning may
/// need out-of-band interaction (a save dialog), hence the asynchronous
/// single-shot request; a second request is never issued before the first
/// resolves.
#[async_trait]
pub trait WriterProvider: Send + Sync {
    async fn provide(&self) -> Result<JsonWriter, ExportError>;
}

/// Writer provider backed by a file path
pub struct FileWriterProvider {
    path: PathBuf,
}

impl FileWriterProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WriterProvider for FileWriterProvider {
    async fn provide(&self) -> Result<JsonWriter, ExportError> {
        JsonWriter::to_file(&self.path)
    }
}
