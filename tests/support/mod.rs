//! Toolkit determinista y fixtures compartidos por las pruebas de
//! integración.
#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use qp_dispatch::qp_domain::feature_table::HDF5_SIGNATURE;
use qp_dispatch::qp_domain::{is_hdf5_file, AlphaVector, Axis, DistanceMatrix, FeatureTable, MetadataColumn, NativeArtifact,
                             OrdinationResults, SemanticType, ToolkitArtifact, Visualization};
use qp_dispatch::registry::Registry;
use qp_dispatch::{ActionOutputs, ActionSignature, InMemoryClient, ParamSpec, ParamType, ResolvedParams, ResolvedValue, Toolkit,
                  ToolkitError};
use serde_json::{json, Map};

pub const ANALYSIS: u64 = 1;

pub const RAREFY_DEPTH_ERROR: &str = "The rarefied table contains no samples or features. Verify your table is valid and that you \
                                      provided a shallow enough sampling depth.";
pub const UNIQUE_GROUPS_ERROR: &str = "All values in the grouping vector are unique. This method cannot operate on a grouping vector \
                                       with only unique values (e.g., there are no 'within' distances because each group of objects \
                                       contains only a single object).";
pub const STRATIFY_ERROR: &str = "You have chosen to predict a metadata column that contains one or more values that match only one \
                                  sample. For proper stratification you must have at least 2 samples for each class. Please either \
                                  remove these samples or set stratify=False.";

fn set<I, S>(items: I) -> BTreeSet<String>
    where I: IntoIterator<Item = S>,
          S: Into<String>
{
    items.into_iter().map(Into::into).collect()
}

fn ids(registry: Registry) -> BTreeSet<String> { set(registry.identifiers()) }

fn table() -> ParamType { ParamType::Artifact(SemanticType::FeatureTable) }

/// Toolkit de pruebas: firmas parecidas a las de los plugins reales y
/// cálculos triviales pero deterministas.
#[derive(Default)]
pub struct StubToolkit {
    /// Firmas a reemplazar (para simular plugins desalineados).
    pub overrides: BTreeMap<(String, String), ActionSignature>,
}

impl StubToolkit {
    pub fn with_signature(mut self, sig: ActionSignature) -> Self {
        self.overrides.insert((sig.plugin.clone(), sig.action.clone()), sig);
        self
    }
}

impl Toolkit for StubToolkit {
    fn signature(&self, plugin: &str, action: &str) -> Result<ActionSignature, ToolkitError> {
        if let Some(sig) = self.overrides.get(&(plugin.to_string(), action.to_string())) {
            return Ok(sig.clone());
        }
        let sig = ActionSignature::new(plugin, action);
        let sig = match (plugin, action) {
            ("feature-table", "rarefy") => sig.param(ParamSpec::required("table", table()))
                                              .param(ParamSpec::required("sampling_depth", ParamType::Int))
                                              .param(ParamSpec::with_default("with_replacement", ParamType::Bool, json!(false)))
                                              .output("rarefied_table", SemanticType::FeatureTable),
            ("feature-table", "filter_samples") => sig.param(ParamSpec::required("table", table()))
                                                      .param(ParamSpec::with_default("min_frequency", ParamType::Int, json!(0)))
                                                      .param(ParamSpec::optional("max_frequency", ParamType::Int))
                                                      .param(ParamSpec::with_default("min_features", ParamType::Int, json!(0)))
                                                      .output("filtered_table", SemanticType::FeatureTable),
            ("feature-table", "filter_features") => sig.param(ParamSpec::required("table", table()))
                                                       .param(ParamSpec::with_default("min_frequency", ParamType::Int, json!(0)))
                                                       .param(ParamSpec::with_default("min_samples", ParamType::Int, json!(0)))
                                                       .output("filtered_table", SemanticType::FeatureTable),
            ("diversity", "alpha") => sig.param(ParamSpec::required("table", table()))
                                         .param(ParamSpec::required("metric", ParamType::Choice(ids(Registry::AlphaMetrics))))
                                         .output("alpha_diversity", SemanticType::AlphaDiversity),
            ("diversity", "alpha_phylogenetic") => {
                sig.param(ParamSpec::required("table", table()))
                   .param(ParamSpec::required("phylogeny", ParamType::Artifact(SemanticType::Phylogeny)))
                   .param(ParamSpec::required("metric", ParamType::Choice(ids(Registry::AlphaPhylogeneticMetrics))))
                   .output("alpha_diversity", SemanticType::AlphaDiversity)
            }
            ("diversity", "beta") => sig.param(ParamSpec::required("table", table()))
                                        .param(ParamSpec::required("metric", ParamType::Choice(ids(Registry::BetaMetrics))))
                                        .param(ParamSpec::with_default("pseudocount", ParamType::Int, json!(1)))
                                        .param(ParamSpec::with_default("n_jobs", ParamType::Int, json!(1)))
                                        .output("distance_matrix", SemanticType::DistanceMatrix),
            ("diversity", "beta_phylogenetic") => {
                sig.param(ParamSpec::required("table", table()))
                   .param(ParamSpec::required("phylogeny", ParamType::Artifact(SemanticType::Phylogeny)))
                   .param(ParamSpec::required("metric", ParamType::Choice(ids(Registry::BetaPhylogeneticMetrics))))
                   .output("distance_matrix", SemanticType::DistanceMatrix)
            }
            ("diversity", "alpha_rarefaction") => {
                let metrics = ids(Registry::AlphaMetrics).into_iter()
                                                         .chain(ids(Registry::AlphaPhylogeneticMetrics))
                                                         .collect();
                sig.param(ParamSpec::required("table", table()))
                   .param(ParamSpec::required("max_depth", ParamType::Int))
                   .param(ParamSpec::optional("phylogeny", ParamType::Artifact(SemanticType::Phylogeny)))
                   .param(ParamSpec::optional("metrics", ParamType::ChoiceSet(metrics)))
                   .param(ParamSpec::optional("metadata", ParamType::Metadata))
                   .param(ParamSpec::with_default("min_depth", ParamType::Int, json!(1)))
                   .param(ParamSpec::with_default("steps", ParamType::Int, json!(10)))
                   .output("visualization", SemanticType::Visualization)
            }
            ("diversity", "alpha_correlation") => {
                sig.param(ParamSpec::required("alpha_diversity", ParamType::Artifact(SemanticType::AlphaDiversity)))
                   .param(ParamSpec::required("metadata", ParamType::Metadata))
                   .param(ParamSpec::with_default("method", ParamType::Choice(ids(Registry::CorrelationMethods)), json!("spearman")))
                   .param(ParamSpec::with_default("intersect_ids", ParamType::Bool, json!(false)))
                   .output("visualization", SemanticType::Visualization)
            }
            ("metadata", "distance_matrix") => sig.param(ParamSpec::required("metadata", ParamType::MetadataColumn))
                                                  .output("distance_matrix", SemanticType::DistanceMatrix),
            ("diversity", "mantel") => {
                sig.param(ParamSpec::required("dm1", ParamType::Artifact(SemanticType::DistanceMatrix)))
                   .param(ParamSpec::required("dm2", ParamType::Artifact(SemanticType::DistanceMatrix)))
                   .param(ParamSpec::with_default("method", ParamType::Choice(ids(Registry::CorrelationMethods)), json!("spearman")))
                   .param(ParamSpec::with_default("permutations", ParamType::Int, json!(999)))
                   .param(ParamSpec::with_default("intersect_ids", ParamType::Bool, json!(false)))
                   .param(ParamSpec::with_default("label1", ParamType::Str, json!("Distance Matrix 1")))
                   .param(ParamSpec::with_default("label2", ParamType::Str, json!("Distance Matrix 2")))
                   .output("visualization", SemanticType::Visualization)
            }
            ("diversity", "beta_correlation") => {
                sig.param(ParamSpec::required("metadata", ParamType::MetadataColumn))
                   .param(ParamSpec::required("distance_matrix", ParamType::Artifact(SemanticType::DistanceMatrix)))
                   .param(ParamSpec::with_default("method", ParamType::Choice(ids(Registry::CorrelationMethods)), json!("spearman")))
                   .output("metadata_distance_matrix", SemanticType::DistanceMatrix)
                   .output("mantel_scatter_visualization", SemanticType::Visualization)
            }
            ("diversity", "beta_group_significance") => {
                sig.param(ParamSpec::required("distance_matrix", ParamType::Artifact(SemanticType::DistanceMatrix)))
                   .param(ParamSpec::required("metadata", ParamType::MetadataColumn))
                   .param(ParamSpec::with_default("method",
                                                  ParamType::Choice(ids(Registry::GroupSignificanceMethods)),
                                                  json!("permanova")))
                   .param(ParamSpec::with_default("pairwise", ParamType::Bool, json!(false)))
                   .param(ParamSpec::with_default("permutations", ParamType::Int, json!(999)))
                   .output("visualization", SemanticType::Visualization)
            }
            ("diversity", "pcoa") => sig.param(ParamSpec::required("distance_matrix", ParamType::Artifact(SemanticType::DistanceMatrix)))
                                        .param(ParamSpec::optional("number_of_dimensions", ParamType::Int))
                                        .output("pcoa", SemanticType::PCoAResults),
            ("emperor", "plot") => sig.param(ParamSpec::required("pcoa", ParamType::Artifact(SemanticType::PCoAResults)))
                                      .param(ParamSpec::required("metadata", ParamType::Metadata))
                                      .param(ParamSpec::with_default("ignore_missing_samples", ParamType::Bool, json!(false)))
                                      .output("visualization", SemanticType::Visualization),
            ("taxa", "barplot") => sig.param(ParamSpec::required("table", table()))
                                      .param(ParamSpec::required("taxonomy", ParamType::Artifact(SemanticType::Taxonomy)))
                                      .param(ParamSpec::required("metadata", ParamType::Metadata))
                                      .output("visualization", SemanticType::Visualization),
            ("sample-classifier", "split_table") => {
                sig.param(ParamSpec::required("table", table()))
                   .param(ParamSpec::required("metadata", ParamType::MetadataColumn))
                   .param(ParamSpec::with_default("test_size", ParamType::Float, json!(0.2)))
                   .param(ParamSpec::optional("random_state", ParamType::Int))
                   .param(ParamSpec::with_default("stratify", ParamType::Bool, json!(true)))
                   .output("training_table", SemanticType::FeatureTable)
                   .output("test_table", SemanticType::FeatureTable)
            }
            _ => return Err(ToolkitError::preflight(format!("{plugin}.{action} is not available"))),
        };
        Ok(sig)
    }

    fn decode_hdf5_table(&self, path: &Path) -> Result<FeatureTable, ToolkitError> {
        match is_hdf5_file(path) {
            Ok(true) => Ok(sample_table()),
            _ => Err(ToolkitError::preflight(format!("{} is not an HDF5 file", path.display()))),
        }
    }

    fn invoke(&self, plugin: &str, action: &str, params: &ResolvedParams) -> Result<ActionOutputs, ToolkitError> {
        let mut out = ActionOutputs::new();
        match (plugin, action) {
            ("feature-table", "rarefy") => {
                let t = artifact::<FeatureTable>(params, "table")?;
                let depth = int(params, "sampling_depth")? as f64;
                let totals = t.totals(Axis::Sample);
                let keep: BTreeSet<String> = totals.iter().filter(|(_, s)| *s >= depth).map(|(id, _)| id.clone()).collect();
                let kept = t.filter(Axis::Sample, |id, _| keep.contains(id));
                if kept.is_empty() {
                    return Err(ToolkitError::execution(RAREFY_DEPTH_ERROR));
                }
                let sums: Vec<f64> = kept.totals(Axis::Sample).into_iter().map(|(_, s)| s).collect();
                let rarefied = kept.map_values(|_, c, v| (v * depth / sums[c]).floor()).without_metadata();
                out.insert("rarefied_table".into(), rarefied.into());
            }
            ("feature-table", "filter_samples") => {
                let t = artifact::<FeatureTable>(params, "table")?;
                let min = int(params, "min_frequency")? as f64;
                let keep: BTreeSet<String> = t.totals(Axis::Sample).into_iter().filter(|(_, s)| *s >= min).map(|(id, _)| id).collect();
                out.insert("filtered_table".into(), t.filter(Axis::Sample, |id, _| keep.contains(id)).without_metadata().into());
            }
            ("feature-table", "filter_features") => {
                let t = artifact::<FeatureTable>(params, "table")?;
                let min_samples = int(params, "min_samples")? as usize;
                let keep: BTreeSet<String> = t.nonzero_counts(Axis::Observation)
                                              .into_iter()
                                              .filter(|(_, n)| *n >= min_samples)
                                              .map(|(id, _)| id)
                                              .collect();
                out.insert("filtered_table".into(),
                           t.filter(Axis::Observation, |id, _| keep.contains(id)).without_metadata().into());
            }
            ("diversity", "alpha") | ("diversity", "alpha_phylogenetic") => {
                let t = artifact::<FeatureTable>(params, "table")?;
                let metric = text(params, "metric")?;
                out.insert("alpha_diversity".into(), alpha(t, &metric).into());
            }
            ("diversity", "beta") | ("diversity", "beta_phylogenetic") => {
                let t = artifact::<FeatureTable>(params, "table")?;
                out.insert("distance_matrix".into(), bray_curtis(t)?.into());
            }
            ("metadata", "distance_matrix") => {
                let column = column(params, "metadata")?;
                let values = column.numeric_values().map_err(|e| ToolkitError::execution(e.to_string()))?;
                let ids: Vec<String> = values.keys().cloned().collect();
                let nums: Vec<f64> = values.values().copied().collect();
                let dm = DistanceMatrix::from_fn(ids, |i, j| (nums[i] - nums[j]).abs()).map_err(|e| ToolkitError::execution(e.to_string()))?;
                out.insert("distance_matrix".into(), dm.into());
            }
            ("diversity", "beta_group_significance") => {
                let column = column(params, "metadata")?;
                let groups: BTreeSet<&String> = column.values.values().collect();
                if groups.len() == column.values.len() {
                    return Err(ToolkitError::execution(UNIQUE_GROUPS_ERROR));
                }
                out.insert("visualization".into(), report(plugin, action, params).into());
            }
            ("diversity", "pcoa") => {
                let dm = artifact::<DistanceMatrix>(params, "distance_matrix")?;
                let text = format!("Eigvals\t{n}\n{}\n\nProportion explained\t0\n\nSpecies\t0\t0\n\nSite\t{n}\t{n}\n",
                                   vec!["1.0"; dm.len()].join("\t"),
                                   n = dm.len());
                let ord = OrdinationResults::new(text).map_err(|e| ToolkitError::execution(e.to_string()))?;
                out.insert("pcoa".into(), ord.into());
            }
            ("sample-classifier", "split_table") => {
                let t = artifact::<FeatureTable>(params, "table")?;
                let column = column(params, "metadata")?;
                if matches!(params.get("stratify"), Some(ResolvedValue::Bool(true))) {
                    let mut counts: BTreeMap<&String, usize> = BTreeMap::new();
                    for v in column.values.values() {
                        *counts.entry(v).or_default() += 1;
                    }
                    if counts.values().any(|n| *n < 2) {
                        return Err(ToolkitError::execution(STRATIFY_ERROR));
                    }
                }
                let test: BTreeSet<&str> = t.sample_ids().iter().step_by(2).map(String::as_str).collect();
                out.insert("training_table".into(), t.filter(Axis::Sample, |id, _| !test.contains(id)).without_metadata().into());
                out.insert("test_table".into(), t.filter(Axis::Sample, |id, _| test.contains(id)).without_metadata().into());
            }
            ("diversity", "alpha_rarefaction")
            | ("diversity", "alpha_correlation")
            | ("diversity", "mantel")
            | ("emperor", "plot")
            | ("taxa", "barplot") => {
                out.insert("visualization".into(), report(plugin, action, params).into());
            }
            _ => return Err(ToolkitError::preflight(format!("{plugin}.{action} is not available"))),
        }
        Ok(out)
    }
}

fn artifact<'p, T: NativeArtifact>(params: &'p ResolvedParams, name: &str) -> Result<&'p T, ToolkitError> {
    let value = params.get(name).and_then(ResolvedValue::as_artifact).ok_or_else(|| missing(name))?;
    T::expect_from(value).map_err(|e| ToolkitError::preflight(e.to_string()))
}

fn int(params: &ResolvedParams, name: &str) -> Result<i64, ToolkitError> {
    match params.get(name) {
        Some(ResolvedValue::Int(i)) => Ok(*i),
        _ => Err(missing(name)),
    }
}

fn text(params: &ResolvedParams, name: &str) -> Result<String, ToolkitError> {
    match params.get(name) {
        Some(ResolvedValue::Str(s)) => Ok(s.clone()),
        _ => Err(missing(name)),
    }
}

fn column<'p>(params: &'p ResolvedParams, name: &str) -> Result<&'p MetadataColumn, ToolkitError> {
    match params.get(name) {
        Some(ResolvedValue::MetadataColumn(c)) => Ok(c),
        _ => Err(missing(name)),
    }
}

fn missing(name: &str) -> ToolkitError { ToolkitError::preflight(format!("missing argument '{name}'")) }

fn alpha(t: &FeatureTable, metric: &str) -> AlphaVector {
    let mut values = IndexMap::new();
    for sample in t.sample_ids() {
        let counts: Vec<f64> = t.observation_ids().iter().map(|o| t.get(o, sample)).filter(|v| *v > 0.0).collect();
        let total: f64 = counts.iter().sum();
        let v = match metric {
            "simpson" => 1.0 - counts.iter().map(|c| (c / total).powi(2)).sum::<f64>(),
            "shannon" => -counts.iter().map(|c| (c / total) * (c / total).log2()).sum::<f64>(),
            _ => counts.len() as f64,
        };
        values.insert(sample.clone(), v);
    }
    AlphaVector::new(metric, values)
}

fn bray_curtis(t: &FeatureTable) -> Result<DistanceMatrix, ToolkitError> {
    let samples = t.sample_ids().to_vec();
    let column = |s: &str| -> Vec<f64> { t.observation_ids().iter().map(|o| t.get(o, s)).collect() };
    let columns: Vec<Vec<f64>> = samples.iter().map(|s| column(s)).collect();
    DistanceMatrix::from_fn(samples, |i, j| {
        let (a, b) = (&columns[i], &columns[j]);
        let diff: f64 = a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum();
        let total: f64 = a.iter().zip(b).map(|(x, y)| x + y).sum();
        if total == 0.0 {
            0.0
        } else {
            diff / total
        }
    }).map_err(|e| ToolkitError::execution(e.to_string()))
}

/// Visualización fija: resumen JSON de la acción y sus parámetros.
fn report(plugin: &str, action: &str, params: &ResolvedParams) -> Visualization {
    let summary = qp_dispatch::params::summarize(params);
    Visualization::new(json!({ "action": format!("{plugin}.{action}"), "params": summary }).to_string().into_bytes())
}

/// Tabla de ejemplo: 4 features x 3 muestras, con taxonomía en la primera.
pub fn sample_table() -> FeatureTable {
    let mut t = FeatureTable::from_dense(vec!["F1".into(), "F2".into(), "F3".into(), "F4".into()],
                                         vec!["S1".into(), "S2".into(), "S3".into()],
                                         &[vec![10.0, 0.0, 4.0], vec![5.0, 7.0, 0.0], vec![0.0, 3.0, 6.0], vec![1.0, 0.0, 0.0]])
            .unwrap();
    let mut md = Map::new();
    md.insert("taxonomy".into(),
              json!(["k__Bacteria", "p__Firmicutes", "c__Bacilli", "o__Lactobacillales"]));
    t.set_metadata(Axis::Observation, "F1", md);
    t
}

pub fn write_table(dir: &Path) -> PathBuf {
    let path = dir.join("input-table.biom");
    sample_table().write(&path).unwrap();
    path
}

/// Archivo con la firma HDF5; el stub lo "decodifica" como `sample_table`.
pub fn write_hdf5_table(dir: &Path) -> PathBuf {
    let path = dir.join("input-table-hdf5.biom");
    let mut bytes = HDF5_SIGNATURE.to_vec();
    bytes.extend_from_slice(b"\0\0\0\0superblock");
    std::fs::write(&path, bytes).unwrap();
    path
}

pub fn write_distance_matrix(dir: &Path) -> PathBuf {
    let dm = DistanceMatrix::new(vec!["S1".into(), "S2".into(), "S3".into()],
                                 vec![vec![0.0, 0.4, 0.7], vec![0.4, 0.0, 0.2], vec![0.7, 0.2, 0.0]]).unwrap();
    let path = dir.join("input-dm.tsv");
    dm.write(&path).unwrap();
    path
}

pub fn write_alpha(dir: &Path) -> PathBuf {
    let av = AlphaVector::new("shannon", IndexMap::from([("S1".to_string(), 1.2), ("S2".to_string(), 0.8), ("S3".to_string(), 1.9)]));
    let path = dir.join("input-alpha.tsv");
    av.write(&path).unwrap();
    path
}

/// Cliente con: 8 = tabla del análisis 1, 5 = tabla sin análisis,
/// 9 = matriz de distancias, 10 = vector alfa, 11 = tabla HDF5 del análisis 1,
/// más la metadata del análisis.
pub fn client(dir: &Path) -> InMemoryClient {
    let table = write_table(dir);
    let metadata = BTreeMap::from([("S1".to_string(),
                                    BTreeMap::from([("ph".to_string(), "7.0".to_string()), ("body_site".to_string(), "gut".to_string())])),
                                   ("S2".to_string(),
                                    BTreeMap::from([("ph".to_string(), "6.5".to_string()), ("body_site".to_string(), "gut".to_string())])),
                                   ("S3".to_string(),
                                    BTreeMap::from([("ph".to_string(), "5.9".to_string()), ("body_site".to_string(), "skin".to_string())]))]);
    InMemoryClient::new().with_file_artifact(8, "BIOM", Some(ANALYSIS), table.clone(), "biom")
                         .with_file_artifact(5, "BIOM", None, table, "biom")
                         .with_file_artifact(9, "distance_matrix", Some(ANALYSIS), write_distance_matrix(dir), "plain_text")
                         .with_file_artifact(10, "alpha_vector", Some(ANALYSIS), write_alpha(dir), "plain_text")
                         .with_file_artifact(11, "BIOM", Some(ANALYSIS), write_hdf5_table(dir), "biom")
                         .with_analysis_metadata(ANALYSIS, metadata)
}

pub fn as_table(artifact: &ToolkitArtifact) -> &FeatureTable {
    match artifact {
        ToolkitArtifact::FeatureTable(t) => t,
        other => panic!("expected a feature table, got {}", other.semantic_type()),
    }
}

/// Arma un job a partir del mapa plano tal como lo envía el cliente.
pub fn job(command: &str, flat: serde_json::Value) -> qp_dispatch::JobRequest {
    let map = flat.as_object().cloned().expect("job parameters must be an object");
    qp_dispatch::JobRequest::new("job-1", command, qp_dispatch::JobParameters::from_flat(&map).unwrap())
}

/// Dispatcher con la configuración por defecto (sin leer el entorno).
pub fn dispatcher<'a>(client: &'a InMemoryClient, toolkit: &'a StubToolkit) -> qp_dispatch::Dispatcher<'a> {
    qp_dispatch::Dispatcher::new(client, toolkit).with_config(qp_dispatch::DispatchConfig::default())
}

pub fn rarefy_job(table: &str, depth: &str) -> qp_dispatch::JobRequest {
    job("Rarefy table",
        json!({
            "qp-hide-plugin": "feature-table",
            "qp-hide-method": "rarefy",
            "qp-hide-paramThe feature table to be rarefied.": "table",
            "The feature table to be rarefied.": table,
            "qp-hide-paramThe total frequency that each sample should be rarefied to.": "sampling_depth",
            "The total frequency that each sample should be rarefied to.": depth,
            "qp-hide-paramRarefy with replacement": "with_replacement",
            "Rarefy with replacement": false
        }))
}

pub fn beta_correlation_job(column: &str) -> qp_dispatch::JobRequest {
    job("Beta Correlation",
        json!({
            "qp-hide-plugin": "diversity",
            "qp-hide-method": "beta_correlation",
            "qp-hide-paramMatrix of distances between pairs of samples.": "distance_matrix",
            "Matrix of distances between pairs of samples.": "9",
            "qp-hide-paramMetadata column to use": "qp-hide-metadata-field",
            "Metadata column to use": column,
            "qp-hide-paramCorrelation test being applied in the Mantel test.": "method",
            "Correlation test being applied in the Mantel test.": "Pearson",
            "qp-hide-paramThe number of permutations to be run when computing p-values.": "permutations",
            "The number of permutations to be run when computing p-values.": "10",
            "qp-hide-paramDiscard IDs not found in both distance matrices.": "intersect_ids",
            "Discard IDs not found in both distance matrices.": true,
            "qp-hide-paramLabel for `distance_matrix` in the output visualization.": "label1",
            "Label for `distance_matrix` in the output visualization.": "Metadata",
            "qp-hide-paramLabel for `metadata_distance_matrix` in the output visualization.": "label2",
            "Label for `metadata_distance_matrix` in the output visualization.": "Distance Matrix"
        }))
}
