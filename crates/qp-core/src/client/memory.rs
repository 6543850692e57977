use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use super::{Client, RawSampleMetadata};
use crate::errors::ClientError;
use crate::model::{ArtifactFile, ArtifactRecord, NewArtifact};

/// Cliente en memoria para tests y ejecuciones locales.
#[derive(Default)]
pub struct InMemoryClient {
    artifacts: Mutex<BTreeMap<u64, ArtifactRecord>>,
    metadata: BTreeMap<u64, RawSampleMetadata>,
}

impl InMemoryClient {
    pub fn new() -> Self { Self::default() }

    pub fn with_artifact(self, record: ArtifactRecord) -> Self {
        if let Ok(mut guard) = self.artifacts.lock() {
            guard.insert(record.id, record);
        }
        self
    }

    pub fn with_analysis_metadata(mut self, analysis: u64, metadata: RawSampleMetadata) -> Self {
        self.metadata.insert(analysis, metadata);
        self
    }

    /// Atajo: artifact de un único archivo.
    pub fn with_file_artifact(self, id: u64, artifact_type: &str, analysis: Option<u64>, path: PathBuf, filepath_type: &str) -> Self {
        self.with_artifact(ArtifactRecord { id,
                                            artifact_type: artifact_type.to_string(),
                                            analysis,
                                            files: vec![ArtifactFile { path,
                                                                       filepath_type: filepath_type.to_string() }] })
    }
}

impl Client for InMemoryClient {
    fn artifact(&self, id: u64) -> Result<ArtifactRecord, ClientError> {
        let guard = self.artifacts.lock().map_err(|e| ClientError::Request(e.to_string()))?;
        guard.get(&id).cloned().ok_or(ClientError::ArtifactNotFound(id))
    }

    fn analysis_metadata(&self, analysis: u64) -> Result<RawSampleMetadata, ClientError> {
        self.metadata.get(&analysis).cloned().ok_or(ClientError::AnalysisNotFound(analysis))
    }

    fn create_artifact(&self, artifact: NewArtifact) -> Result<u64, ClientError> {
        let mut guard = self.artifacts.lock().map_err(|e| ClientError::Request(e.to_string()))?;
        let id = guard.keys().next_back().map_or(1, |last| last + 1);
        let files = artifact.files
                            .into_iter()
                            .map(|(path, filepath_type)| ArtifactFile { path, filepath_type })
                            .collect();
        guard.insert(id,
                     ArtifactRecord { id,
                                      artifact_type: artifact.artifact_type,
                                      analysis: Some(artifact.analysis),
                                      files });
        Ok(id)
    }
}
