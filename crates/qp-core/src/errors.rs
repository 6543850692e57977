//! Taxonomía de errores del dispatcher.
//!
//! Ningún error escapa del dispatcher como pánico: todos terminan en
//! `DispatchError` y de ahí en un mensaje vía `engine::translate`.

use qp_domain::{DomainError, SemanticType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Momento en que falló el toolkit: antes de ejecutar (validación,
/// búsqueda de la acción) o durante la ejecución.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolkitErrorKind {
    Preflight,
    Execution,
}

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ToolkitError {
    pub kind: ToolkitErrorKind,
    pub message: String,
}

impl ToolkitError {
    pub fn preflight(message: impl Into<String>) -> Self {
        Self { kind: ToolkitErrorKind::Preflight,
               message: message.into() }
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self { kind: ToolkitErrorKind::Execution,
               message: message.into() }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Artifact \"{0}\" does not exist")]
    ArtifactNotFound(u64),
    #[error("Analysis \"{0}\" does not exist")]
    AnalysisNotFound(u64),
    #[error("client request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Artifact \"{0}\" is not an analysis artifact.")]
    ArtifactOwnership(u64),
    #[error("Artifact \"{id}\" has type \"{found}\" but {expected} was expected")]
    ArtifactType { id: u64, expected: SemanticType, found: String },
    #[error("Could not load artifact \"{reference}\": {source}")]
    ArtifactLoad {
        reference: String,
        #[source]
        source: DomainError,
    },
    #[error("Missing routing directive '{0}'")]
    MissingDirective(&'static str),
    #[error("Invalid value \"{value}\" for '{label}': {reason}")]
    ParameterTranslation { label: String, value: String, reason: String },
    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),
    #[error("You didn't write a metadata field in '{0}'")]
    MissingMetadataField(String),
    #[error("Unknown command \"{plugin}.{method}\"")]
    UnknownCommand { plugin: String, method: String },
    #[error("Choice registries are out of sync with the toolkit: {0}")]
    RegistryMismatch(String),
    #[error("The resulting table is empty, please review your parameters")]
    EmptyTable,
    #[error("Could not write output \"{slot}\": {source}")]
    Export {
        slot: String,
        #[source]
        source: DomainError,
    },
    #[error(transparent)]
    Toolkit(#[from] ToolkitError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("internal: {0}")]
    Internal(String),
}

impl DispatchError {
    pub(crate) fn translation(label: &str, value: &str, reason: impl Into<String>) -> Self {
        DispatchError::ParameterTranslation { label: label.to_string(),
                                              value: value.to_string(),
                                              reason: reason.into() }
    }
}
