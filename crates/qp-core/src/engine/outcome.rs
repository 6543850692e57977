use serde::{Deserialize, Serialize};

use super::translate::translate;
use crate::errors::DispatchError;
use crate::model::ArtifactResult;

/// Resultado de un despacho tal como lo recibe el cliente.
///
/// Éxito: `artifacts` presente y `message` vacío. Falla: sin artifacts y
/// con un mensaje no vacío.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub success: bool,
    pub artifacts: Option<Vec<ArtifactResult>>,
    pub message: String,
}

impl DispatchOutcome {
    pub fn succeeded(artifacts: Vec<ArtifactResult>) -> Self {
        Self { success: true,
               artifacts: Some(artifacts),
               message: String::new() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false,
               artifacts: None,
               message: message.into() }
    }
}

impl From<Result<Vec<ArtifactResult>, DispatchError>> for DispatchOutcome {
    fn from(result: Result<Vec<ArtifactResult>, DispatchError>) -> Self {
        match result {
            Ok(artifacts) => DispatchOutcome::succeeded(artifacts),
            Err(err) => DispatchOutcome::failed(translate(&err)),
        }
    }
}
