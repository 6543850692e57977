//! Puente de artifacts entre el cliente y el toolkit.
//!
//! Import: id -> registro del cliente -> verificación de dueño (análisis) y
//! tipo -> lectura del archivo al formato nativo.
//! Export: artifact nativo -> archivo canónico bajo
//! `<out>/<paso>/<slot>/<archivo>` (o `<out>/<paso>/<slot>.qzv` para
//! visualizaciones) con permisos de grupo -> `ArtifactResult`.
mod files;

use std::path::{Path, PathBuf};

use log::debug;
use qp_domain::{is_hdf5_file, DomainError, SampleMetadata, SemanticType, ToolkitArtifact};

use crate::client::Client;
use crate::config::DispatchConfig;
use crate::errors::{DispatchError, ToolkitError};
use crate::model::ArtifactResult;
use crate::toolkit::Toolkit;

/// Artifact importado junto con el análisis al que pertenece.
#[derive(Debug, Clone)]
pub struct ImportedArtifact {
    pub artifact: ToolkitArtifact,
    pub analysis: u64,
}

pub struct ArtifactBridge<'a> {
    client: &'a dyn Client,
    config: &'a DispatchConfig,
    decoder: Option<&'a dyn Toolkit>,
}

impl<'a> ArtifactBridge<'a> {
    pub fn new(client: &'a dyn Client, config: &'a DispatchConfig) -> Self {
        Self { client,
               config,
               decoder: None }
    }

    /// Toolkit al que se delegan las tablas BIOM 2.x (HDF5).
    pub fn with_decoder(mut self, toolkit: &'a dyn Toolkit) -> Self {
        self.decoder = Some(toolkit);
        self
    }

    pub fn import(&self, id: u64, expected: SemanticType) -> Result<ImportedArtifact, DispatchError> {
        let record = self.client.artifact(id)?;
        let analysis = record.analysis.ok_or(DispatchError::ArtifactOwnership(id))?;
        if SemanticType::from_client_type(&record.artifact_type) != Some(expected) {
            return Err(DispatchError::ArtifactType { id,
                                                     expected,
                                                     found: record.artifact_type });
        }
        let Some(path) = record.primary_file(expected) else {
            return Err(DispatchError::ArtifactLoad { reference: id.to_string(),
                                                     source: DomainError::Format { format: "artifact",
                                                                                   reason: "the artifact has no files".to_string() } });
        };
        debug!("importing artifact {id} ({expected}) from {}", path.display());
        let load_error = |source: DomainError| DispatchError::ArtifactLoad { reference: id.to_string(),
                                                                              source };
        if let (SemanticType::FeatureTable, Some(toolkit)) = (expected, self.decoder) {
            if is_hdf5_file(path).map_err(load_error)? {
                debug!("artifact {id} is an HDF5 table, decoding through the toolkit");
                let table = toolkit.decode_hdf5_table(path)?;
                return Ok(ImportedArtifact { artifact: table.into(),
                                             analysis });
            }
        }
        let artifact = ToolkitArtifact::load(expected, path).map_err(load_error)?;
        Ok(ImportedArtifact { artifact, analysis })
    }

    /// Importa directamente desde un archivo local (p.ej. un árbol Newick).
    pub fn import_path(&self, path: &Path, expected: SemanticType) -> Result<ToolkitArtifact, DispatchError> {
        debug!("importing {expected} from path {}", path.display());
        ToolkitArtifact::load(expected, path).map_err(|source| DispatchError::ArtifactLoad { reference: path.display().to_string(),
                                                                                             source })
    }

    pub fn analysis_metadata(&self, analysis: u64) -> Result<SampleMetadata, DispatchError> {
        Ok(SampleMetadata::from_client(self.client.analysis_metadata(analysis)?))
    }

    /// Ruta de export para un artifact de `step` en `slot`.
    pub fn export_path(out_dir: &Path, step: &str, slot: &str, semantic_type: SemanticType) -> PathBuf {
        let step_dir = out_dir.join(step);
        if semantic_type.is_visualization() {
            step_dir.join(format!("{slot}.qzv"))
        } else {
            step_dir.join(slot).join(semantic_type.canonical_filename())
        }
    }

    pub fn export(&self, out_dir: &Path, step: &str, slot: &str, artifact: &ToolkitArtifact) -> Result<ArtifactResult, DispatchError> {
        let semantic_type = artifact.semantic_type();
        let artifact_type = semantic_type.client_type().ok_or_else(|| {
                                                            ToolkitError::execution(format!("output '{slot}' has type {semantic_type}, which cannot be stored by the client"))
                                                        })?;
        let path = Self::export_path(out_dir, step, slot, semantic_type);
        let mut dirs = vec![out_dir.join(step)];
        if let Some(parent) = path.parent() {
            if !dirs.iter().any(|d| d == parent) {
                dirs.push(parent.to_path_buf());
            }
        }
        for dir in &dirs {
            files::ensure_dir(dir, self.config.dir_mode).map_err(|e| self.io_error(slot, e))?;
        }
        artifact.write_to(&path).map_err(|source| DispatchError::Export { slot: slot.to_string(),
                                                                          source })?;
        files::set_mode(&path, self.config.file_mode).map_err(|e| self.io_error(slot, e))?;
        debug!("wrote {} ({artifact_type}) for slot {slot}", path.display());
        Ok(ArtifactResult { files: vec![(path, semantic_type.format_tag().to_string())],
                            artifact_type: artifact_type.to_string(),
                            output_name: slot.to_string() })
    }

    fn io_error(&self, slot: &str, err: std::io::Error) -> DispatchError {
        DispatchError::Export { slot: slot.to_string(),
                                source: err.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryClient;
    use crate::params::ResolvedParams;
    use crate::signature::ActionSignature;
    use crate::toolkit::ActionOutputs;
    use qp_domain::feature_table::HDF5_SIGNATURE;
    use qp_domain::{DistanceMatrix, FeatureTable, NativeArtifact, Visualization};

    /// Toolkit que solo sabe decodificar tablas HDF5.
    struct Hdf5Reader;

    impl Toolkit for Hdf5Reader {
        fn signature(&self, plugin: &str, action: &str) -> Result<ActionSignature, ToolkitError> {
            Ok(ActionSignature::new(plugin, action))
        }

        fn invoke(&self, _: &str, _: &str, _: &ResolvedParams) -> Result<ActionOutputs, ToolkitError> {
            Ok(ActionOutputs::new())
        }

        fn decode_hdf5_table(&self, path: &Path) -> Result<FeatureTable, ToolkitError> {
            assert!(is_hdf5_file(path).unwrap());
            Ok(FeatureTable::from_dense(vec!["O1".into(), "O2".into()], vec!["S1".into()], &[vec![4.0], vec![1.0]]).unwrap())
        }
    }

    fn hdf5_file(dir: &Path) -> PathBuf {
        let p = dir.join("table.biom");
        let mut bytes = HDF5_SIGNATURE.to_vec();
        bytes.extend_from_slice(&[0u8; 24]);
        std::fs::write(&p, bytes).unwrap();
        p
    }

    fn table_file(dir: &Path) -> PathBuf {
        let t = FeatureTable::from_dense(vec!["O1".into()], vec!["S1".into()], &[vec![2.0]]).unwrap();
        let p = dir.join("t.biom");
        t.write(&p).unwrap();
        p
    }

    #[test]
    fn import_rejects_artifacts_outside_an_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let client = InMemoryClient::new().with_file_artifact(5, "BIOM", None, table_file(dir.path()), "biom");
        let cfg = DispatchConfig::default();
        let err = ArtifactBridge::new(&client, &cfg).import(5, SemanticType::FeatureTable).unwrap_err();
        assert_eq!(err.to_string(), "Artifact \"5\" is not an analysis artifact.");
    }

    #[test]
    fn import_checks_the_declared_type() {
        let dir = tempfile::tempdir().unwrap();
        let client = InMemoryClient::new().with_file_artifact(8, "BIOM", Some(1), table_file(dir.path()), "biom");
        let cfg = DispatchConfig::default();
        let bridge = ArtifactBridge::new(&client, &cfg);
        assert!(matches!(bridge.import(8, SemanticType::DistanceMatrix), Err(DispatchError::ArtifactType { id: 8, .. })));
        let ok = bridge.import(8, SemanticType::FeatureTable).unwrap();
        assert_eq!(ok.analysis, 1);
    }

    #[test]
    fn unreadable_files_are_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.biom");
        std::fs::write(&bad, "not json").unwrap();
        let client = InMemoryClient::new().with_file_artifact(3, "BIOM", Some(1), bad, "biom");
        let cfg = DispatchConfig::default();
        let err = ArtifactBridge::new(&client, &cfg).import(3, SemanticType::FeatureTable).unwrap_err();
        assert!(matches!(err, DispatchError::ArtifactLoad { .. }));
    }

    #[test]
    fn hdf5_tables_are_decoded_by_the_toolkit() {
        let dir = tempfile::tempdir().unwrap();
        let client = InMemoryClient::new().with_file_artifact(11, "BIOM", Some(1), hdf5_file(dir.path()), "biom");
        let cfg = DispatchConfig::default();
        let imported = ArtifactBridge::new(&client, &cfg).with_decoder(&Hdf5Reader)
                                                         .import(11, SemanticType::FeatureTable)
                                                         .unwrap();
        let table = FeatureTable::expect_from(&imported.artifact).unwrap();
        assert_eq!(table.shape(), (2, 1));
        assert_eq!(table.get("O1", "S1"), 4.0);
        assert_eq!(imported.analysis, 1);
    }

    #[test]
    fn hdf5_tables_without_a_decoder_are_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let client = InMemoryClient::new().with_file_artifact(11, "BIOM", Some(1), hdf5_file(dir.path()), "biom");
        let cfg = DispatchConfig::default();
        let err = ArtifactBridge::new(&client, &cfg).import(11, SemanticType::FeatureTable).unwrap_err();
        assert!(matches!(&err, DispatchError::ArtifactLoad { source: DomainError::Hdf5Table(_), .. }));
        assert!(err.to_string().contains("HDF5"), "{err}");
    }

    #[test]
    fn toolkits_without_hdf5_support_report_a_preflight_error() {
        struct Plain;
        impl Toolkit for Plain {
            fn signature(&self, plugin: &str, action: &str) -> Result<ActionSignature, ToolkitError> {
                Ok(ActionSignature::new(plugin, action))
            }

            fn invoke(&self, _: &str, _: &str, _: &ResolvedParams) -> Result<ActionOutputs, ToolkitError> {
                Ok(ActionOutputs::new())
            }
        }
        let dir = tempfile::tempdir().unwrap();
        let client = InMemoryClient::new().with_file_artifact(11, "BIOM", Some(1), hdf5_file(dir.path()), "biom");
        let cfg = DispatchConfig::default();
        let err = ArtifactBridge::new(&client, &cfg).with_decoder(&Plain)
                                                    .import(11, SemanticType::FeatureTable)
                                                    .unwrap_err();
        assert!(matches!(err, DispatchError::Toolkit(ref e) if e.to_string().contains("cannot decode")), "{err}");
    }

    #[test]
    fn export_layout_and_format_tags() {
        let dir = tempfile::tempdir().unwrap();
        let client = InMemoryClient::new();
        let cfg = DispatchConfig::default();
        let bridge = ArtifactBridge::new(&client, &cfg);
        let dm = DistanceMatrix::from_fn(vec!["A".into(), "B".into()], |_, _| 1.0).unwrap();
        let res = bridge.export(dir.path(), "beta", "distance_matrix", &dm.into()).unwrap();
        assert_eq!(res.files, vec![(dir.path().join("beta/distance_matrix/distance-matrix.tsv"), "plain_text".to_string())]);
        assert_eq!(res.artifact_type, "distance_matrix");

        let viz = Visualization::new(b"PK".to_vec());
        let res = bridge.export(dir.path(), "beta_correlation", "mantel_scatter_visualization", &viz.into()).unwrap();
        assert_eq!(res.files[0].0, dir.path().join("beta_correlation/mantel_scatter_visualization.qzv"));
        assert_eq!(res.files[0].1, "qzv");
        assert_eq!(res.artifact_type, "q2_visualization");
    }

    #[cfg(unix)]
    #[test]
    fn exported_files_are_group_writable() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let client = InMemoryClient::new();
        let cfg = DispatchConfig::default();
        let viz = Visualization::new(vec![1]);
        let res = ArtifactBridge::new(&client, &cfg).export(dir.path(), "plot", "visualization", &viz.into()).unwrap();
        let mode = std::fs::metadata(&res.files[0].0).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
        let dmode = std::fs::metadata(dir.path().join("plot")).unwrap().permissions().mode();
        assert_eq!(dmode & 0o777, 0o775);
    }
}
