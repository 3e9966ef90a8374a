use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Entity sections exportable to the backup document, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataKind {
    Weight,
    BloodPressure,
    Steps,
    BloodSugar,
    Food,
}

impl DataKind {
    pub const ALL: [DataKind; 5] = [
        DataKind::Weight,
        DataKind::BloodPressure,
        DataKind::Steps,
        DataKind::BloodSugar,
        DataKind::Food,
    ];

    /// Property name of this entity's section in the export document
    pub fn section_name(&self) -> &'static str {
        match self {
            DataKind::Weight => "weight",
            DataKind::BloodPressure => "bloodPressure",
            DataKind::Steps => "steps",
            DataKind::BloodSugar => "bloodSugar",
            DataKind::Food => "food",
        }
    }
}

/// The entity sections a user chose to include. Immutable; derived once
/// per export run. Selection never reorders sections: the document always
/// lists them in `DataKind::ALL` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    selected: Vec<DataKind>,
}

impl ExportOptions {
    pub fn all() -> Self {
        Self {
            selected: DataKind::ALL.to_vec(),
        }
    }

    pub fn from_selection(kinds: impl IntoIterator<Item = DataKind>) -> Self {
        let chosen: Vec<DataKind> = kinds.into_iter().collect();
        Self {
            selected: DataKind::ALL
                .iter()
                .copied()
                .filter(|kind| chosen.contains(kind))
                .collect(),
        }
    }

    pub fn includes(&self, kind: DataKind) -> bool {
        self.selected.contains(&kind)
    }

    pub fn selected(&self) -> &[DataKind] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Errors raised by the export pipeline
#[derive(Debug, Error)]
pub enum ExportError {
    /// Underlying sink failure; aborts the current write immediately.
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Writer misuse (mismatched nesting, value without a property name).
    /// A caller bug, never retried.
    #[error("Writer misuse: {0}")]
    InvalidStructure(String),

    /// The destination writer could not be provided.
    #[error("No destination writer: {0}")]
    DestinationUnavailable(String),

    /// Cancelled by the user while picking a destination.
    #[error("Export cancelled")]
    Cancelled,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_normalizes_to_document_order() {
        let options =
            ExportOptions::from_selection([DataKind::Food, DataKind::Weight, DataKind::Food]);
        assert_eq!(options.selected(), &[DataKind::Weight, DataKind::Food]);
        assert!(options.includes(DataKind::Weight));
        assert!(!options.includes(DataKind::Steps));
    }

    #[test]
    fn empty_selection_is_empty() {
        assert!(ExportOptions::from_selection([]).is_empty());
        assert!(!ExportOptions::all().is_empty());
    }
}
