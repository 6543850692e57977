//! Vista del cliente sobre los artifacts: lo que se lee al importar y lo que
//! se entrega al exportar.

use std::path::{Path, PathBuf};

use qp_domain::SemanticType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub path: PathBuf,
    pub filepath_type: String,
}

/// Registro de un artifact tal como lo devuelve el cliente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub id: u64,
    pub artifact_type: String,
    /// Análisis dueño; `None` para uploads sueltos.
    pub analysis: Option<u64>,
    pub files: Vec<ArtifactFile>,
}

impl ArtifactRecord {
    /// Archivo a importar: el primero cuyo tipo coincide con el formato del
    /// tipo semántico, o el primero de la lista.
    pub fn primary_file(&self, semantic_type: SemanticType) -> Option<&Path> {
        self.files
            .iter()
            .find(|f| f.filepath_type == semantic_type.format_tag())
            .or_else(|| self.files.first())
            .map(|f| f.path.as_path())
    }
}

/// Resultado exportado de un paso, listo para entregarse al cliente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactResult {
    /// Pares (ruta, etiqueta de formato), en orden.
    pub files: Vec<(PathBuf, String)>,
    pub artifact_type: String,
    pub output_name: String,
}

/// Alta de un artifact nuevo en el cliente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArtifact {
    pub files: Vec<(PathBuf, String)>,
    pub artifact_type: String,
    pub name: String,
    pub analysis: u64,
    pub data_type: String,
}

impl NewArtifact {
    pub fn from_result(result: &ArtifactResult, analysis: u64, data_type: impl Into<String>) -> Self {
        Self { files: result.files.clone(),
               artifact_type: result.artifact_type.clone(),
               name: result.output_name.clone(),
               analysis,
               data_type: data_type.into() }
    }
}
