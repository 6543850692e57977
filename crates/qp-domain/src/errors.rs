//! Errores de lectura/escritura de formatos nativos.

use thiserror::Error;

use crate::semantic::SemanticType;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid {format} content: {reason}")]
    Format { format: &'static str, reason: String },
    #[error("expected a {expected} artifact, found {found}")]
    KindMismatch { expected: SemanticType, found: SemanticType },
    #[error("Metadata column \"{0}\" does not exist")]
    MissingColumn(String),
    #[error("Metadata column \"{0}\" is not numeric")]
    NonNumericColumn(String),
    #[error("{0} is an HDF5 (BIOM 2.x) table and cannot be read as BIOM JSON")]
    Hdf5Table(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tsv: {0}")]
    Tsv(#[from] csv::Error),
}

impl DomainError {
    pub(crate) fn format(format: &'static str, reason: impl Into<String>) -> Self {
        DomainError::Format { format,
                              reason: reason.into() }
    }
}
