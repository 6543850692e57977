//! Costura con el cliente de workflows: lectura de artifacts y metadata,
//! alta de artifacts nuevos.
pub mod memory;

use std::collections::BTreeMap;

use crate::errors::ClientError;
use crate::model::{ArtifactRecord, NewArtifact};

pub use memory::InMemoryClient;

/// Metadata de muestras tal como la entrega el cliente: muestra -> columna -> valor.
pub type RawSampleMetadata = BTreeMap<String, BTreeMap<String, String>>;

pub trait Client {
    fn artifact(&self, id: u64) -> Result<ArtifactRecord, ClientError>;

    fn analysis_metadata(&self, analysis: u64) -> Result<RawSampleMetadata, ClientError>;

    /// Registra un artifact y devuelve su id.
    fn create_artifact(&self, artifact: NewArtifact) -> Result<u64, ClientError>;
}
