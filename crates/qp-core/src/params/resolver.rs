//! Resolución de parámetros: de etiquetas y strings a valores tipados según
//! la firma de cada acción del plan.
//!
//! Orden de trabajo:
//! 1. Campo de metadata en blanco -> error inmediato (antes de tocar el
//!    cliente o el toolkit).
//! 2. Artifacts de todas las etapas (fija el análisis dueño).
//! 3. Resto de parámetros en el orden de la firma: literales, metadata,
//!    columnas de metadata y taxonomía derivada.
//!
//! Las etiquetas que no alimentan ningún parámetro se ignoran.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use log::{debug, warn};
use once_cell::unsync::OnceCell;
use qp_domain::{SampleMetadata, SemanticType, Taxonomy, ToolkitArtifact};

use super::routing::{JobParameters, LiteralValue, ParamRoute};
use super::value::{ResolvedParams, ResolvedValue};
use crate::bridge::ArtifactBridge;
use crate::errors::DispatchError;
use crate::plan::{Plan, SourceRef};
use crate::registry;
use crate::signature::{ActionSignature, ParamDefault, ParamSpec, ParamType};

pub struct ParameterResolver<'a> {
    job: &'a JobParameters,
    bridge: &'a ArtifactBridge<'a>,
    analysis: Option<u64>,
    metadata: OnceCell<SampleMetadata>,
    consumed: BTreeSet<String>,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(job: &'a JobParameters, bridge: &'a ArtifactBridge<'a>) -> Self {
        Self { job,
               bridge,
               analysis: None,
               metadata: OnceCell::new(),
               consumed: BTreeSet::new() }
    }

    /// Análisis dueño de los artifacts importados (el primero visto).
    pub fn analysis(&self) -> Option<u64> { self.analysis }

    pub fn check_metadata_field(&self) -> Result<(), DispatchError> {
        if let Some(label) = self.job.routing.metadata_field_label() {
            if self.job.literals.get(label).map_or(true, LiteralValue::is_blank) {
                return Err(DispatchError::MissingMetadataField(label.to_string()));
            }
        }
        Ok(())
    }

    /// Resuelve todas las etapas del plan; `signatures[i]` es la firma de
    /// `plan.stages[i]`. Los parámetros alimentados por outputs de etapas
    /// previas quedan en `None` (reservan su posición) hasta que el
    /// dispatcher los completa.
    pub fn resolve_plan(&mut self, plan: &Plan, signatures: &[ActionSignature]) -> Result<Vec<ResolvedParams>, DispatchError> {
        if plan.stages.len() != signatures.len() {
            return Err(DispatchError::Internal(format!("{} stages but {} signatures", plan.stages.len(), signatures.len())));
        }
        self.check_metadata_field()?;

        let mut artifacts = Vec::with_capacity(plan.len());
        for (stage, sig) in plan.stages.iter().zip(signatures) {
            let mut found = BTreeMap::new();
            for spec in &sig.params {
                let ParamType::Artifact(st) = &spec.ty else { continue };
                let SourceRef::Job(formal) = stage.source_for(&spec.name) else { continue };
                if self.is_taxonomy(formal, *st) {
                    continue;
                }
                let value = self.resolve_artifact(spec, *st, formal)?;
                found.insert(spec.name.clone(), value);
            }
            artifacts.push(found);
        }

        let mut staged = Vec::with_capacity(plan.len());
        for ((stage, sig), found) in plan.stages.iter().zip(signatures).zip(artifacts) {
            let mut resolved = ResolvedParams::new();
            for spec in &sig.params {
                let formal = match stage.source_for(&spec.name) {
                    SourceRef::Output { .. } => {
                        resolved.insert(spec.name.clone(), ResolvedValue::None);
                        continue;
                    }
                    SourceRef::Job(formal) => formal,
                };
                let value = match &spec.ty {
                    ParamType::Artifact(st) if self.is_taxonomy(formal, *st) => self.resolve_taxonomy(spec, &found)?,
                    ParamType::Artifact(_) => match found.get(&spec.name) {
                        Some(v) => v.clone(),
                        None => self.absent(spec)?,
                    },
                    ParamType::Metadata => self.resolve_metadata(spec, formal)?,
                    ParamType::MetadataColumn => self.resolve_metadata_column(spec, formal)?,
                    _ => self.resolve_literal(sig, spec, formal)?,
                };
                debug!("{}: {} = {}", sig.key(), spec.name, value.summary());
                resolved.insert(spec.name.clone(), value);
            }
            staged.push(resolved);
        }
        self.report_unused();
        Ok(staged)
    }

    fn is_taxonomy(&self, formal: &str, st: SemanticType) -> bool {
        st == SemanticType::Taxonomy && self.job.routing.taxonomy_param.as_deref() == Some(formal)
    }

    fn resolve_artifact(&mut self, spec: &ParamSpec, st: SemanticType, formal: &str) -> Result<ResolvedValue, DispatchError> {
        let job = self.job;
        let Some((label, literal)) = job.literal_for(formal) else { return self.absent(spec) };
        self.consumed.insert(label.to_string());
        let raw = match literal {
            LiteralValue::Text(t) => t.trim(),
            LiteralValue::Flag(b) => return Err(DispatchError::translation(label, &b.to_string(), "expected an artifact id")),
        };
        if raw.is_empty() {
            return self.absent(spec);
        }
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            let id: u64 = raw.parse()
                             .map_err(|_| DispatchError::translation(label, raw, "artifact id is out of range"))?;
            let imported = self.bridge.import(id, st)?;
            self.note_analysis(imported.analysis);
            return Ok(ResolvedValue::Artifact(imported.artifact));
        }
        // Los árboles pueden venir como ruta a un Newick en disco.
        if st == SemanticType::Phylogeny {
            return Ok(ResolvedValue::Artifact(self.bridge.import_path(Path::new(raw), st)?));
        }
        Err(DispatchError::translation(label, raw, "expected an artifact id"))
    }

    fn resolve_taxonomy(&self, spec: &ParamSpec, found: &BTreeMap<String, ResolvedValue>) -> Result<ResolvedValue, DispatchError> {
        let table = found.values().find_map(|v| match v.as_artifact() {
                                      Some(ToolkitArtifact::FeatureTable(t)) => Some(t),
                                      _ => None,
                                  });
        let Some(table) = table else { return self.absent(spec) };
        let taxonomy = Taxonomy::from_feature_table(table).map_err(|source| DispatchError::ArtifactLoad { reference: spec.name.clone(),
                                                                                                         source })?;
        Ok(ResolvedValue::Artifact(taxonomy.into()))
    }

    fn resolve_metadata(&self, spec: &ParamSpec, formal: &str) -> Result<ResolvedValue, DispatchError> {
        if self.job.routing.metadata_param.as_deref() == Some(formal) {
            Ok(ResolvedValue::Metadata(self.metadata()?.clone()))
        } else {
            self.absent(spec)
        }
    }

    fn resolve_metadata_column(&mut self, spec: &ParamSpec, formal: &str) -> Result<ResolvedValue, DispatchError> {
        let job = self.job;
        let found = match job.routing.metadata_field_label() {
            Some(label) => job.literals.get(label).map(|v| (label, v)),
            None => job.literal_for(formal),
        };
        let Some((label, literal)) = found else { return self.absent(spec) };
        self.consumed.insert(label.to_string());
        let column = match literal {
            LiteralValue::Text(t) if !t.trim().is_empty() => t.trim(),
            LiteralValue::Text(_) => return Err(DispatchError::MissingMetadataField(label.to_string())),
            LiteralValue::Flag(b) => {
                return Err(DispatchError::translation(label, &b.to_string(), "expected a metadata column name"))
            }
        };
        let values = self.metadata()?
                         .column(column)
                         .map_err(|e| DispatchError::translation(label, column, e.to_string()))?;
        Ok(ResolvedValue::MetadataColumn(values))
    }

    fn resolve_literal(&mut self, sig: &ActionSignature, spec: &ParamSpec, formal: &str) -> Result<ResolvedValue, DispatchError> {
        let job = self.job;
        let Some((label, literal)) = job.literal_for(formal) else { return self.absent(spec) };
        self.consumed.insert(label.to_string());
        if literal.is_blank() {
            return self.absent(spec);
        }
        coerce(sig, spec, label, literal)
    }

    /// Valor para un parámetro sin literal: su default, None, o error si es
    /// obligatorio.
    fn absent(&self, spec: &ParamSpec) -> Result<ResolvedValue, DispatchError> {
        match &spec.default {
            ParamDefault::Required => Err(DispatchError::MissingParameter(spec.name.clone())),
            ParamDefault::NoneDefault => Ok(ResolvedValue::None),
            ParamDefault::Value(v) => Ok(ResolvedValue::from_default(&spec.ty, v)),
        }
    }

    fn metadata(&self) -> Result<&SampleMetadata, DispatchError> {
        self.metadata.get_or_try_init(|| {
                         let analysis = self.analysis.ok_or_else(|| {
                                                          DispatchError::Internal("sample metadata needs an input artifact from an analysis".to_string())
                                                      })?;
                         debug!("fetching sample metadata of analysis {analysis}");
                         self.bridge.analysis_metadata(analysis)
                     })
    }

    fn note_analysis(&mut self, analysis: u64) {
        match self.analysis {
            None => self.analysis = Some(analysis),
            Some(prev) if prev != analysis => {
                warn!("input artifacts belong to analyses {prev} and {analysis}; using {prev} for metadata")
            }
            Some(_) => {}
        }
    }

    fn report_unused(&self) {
        for (label, route) in &self.job.routing.params {
            if !self.consumed.contains(label) {
                match route {
                    ParamRoute::Formal(formal) => debug!("ignoring '{label}' -> '{formal}': no action parameter uses it"),
                    ParamRoute::MetadataField => debug!("ignoring metadata field '{label}': no action takes a metadata column"),
                }
            }
        }
    }
}

fn coerce(sig: &ActionSignature, spec: &ParamSpec, label: &str, literal: &LiteralValue) -> Result<ResolvedValue, DispatchError> {
    let text = match (&spec.ty, literal) {
        (ParamType::Bool, LiteralValue::Flag(b)) => return Ok(ResolvedValue::Bool(*b)),
        (ty, LiteralValue::Flag(b)) => {
            return Err(DispatchError::translation(label, &b.to_string(), format!("expected {}", describe(ty))))
        }
        (_, LiteralValue::Text(t)) => t.trim(),
    };
    match &spec.ty {
        ParamType::Bool => parse_bool(text).map(ResolvedValue::Bool)
                                           .ok_or_else(|| DispatchError::translation(label, text, "expected a boolean")),
        ParamType::Int => text.parse::<i64>()
                              .map(ResolvedValue::Int)
                              .map_err(|_| DispatchError::translation(label, text, "expected an integer")),
        ParamType::Float => text.parse::<f64>()
                                .map(ResolvedValue::Float)
                                .map_err(|_| DispatchError::translation(label, text, "expected a number")),
        ParamType::Str => Ok(ResolvedValue::Str(text.to_string())),
        ParamType::Choice(set) => choose(sig, spec, label, text, set).map(ResolvedValue::Str),
        ParamType::ChoiceSet(set) => {
            let picked = split_labels(label, text)?.iter()
                                                   .map(|l| choose(sig, spec, label, l, set))
                                                   .collect::<Result<BTreeSet<_>, _>>()?;
            Ok(ResolvedValue::StrSet(picked))
        }
        ParamType::Artifact(_) | ParamType::Metadata | ParamType::MetadataColumn => {
            Err(DispatchError::Internal(format!("'{}' is not a literal parameter", spec.name)))
        }
    }
}

/// Traduce la etiqueta por el registro que corresponda (si hay) y verifica
/// que el identificador esté en el choice-set vivo.
fn choose(sig: &ActionSignature, spec: &ParamSpec, label: &str, raw: &str, choices: &BTreeSet<String>) -> Result<String, DispatchError> {
    let id = match registry::translate_choice(&sig.plugin, &sig.action, &spec.name, raw) {
        None => raw.to_string(),
        Some(Some(id)) => id.to_string(),
        Some(None) => return Err(DispatchError::translation(label, raw, "not a recognized option")),
    };
    if !choices.contains(&id) {
        return Err(DispatchError::translation(label, raw, format!("'{id}' is not accepted by {}", sig.key())));
    }
    Ok(id)
}

fn split_labels(label: &str, raw: &str) -> Result<Vec<String>, DispatchError> {
    if raw.starts_with('[') {
        serde_json::from_str(raw).map_err(|e| DispatchError::translation(label, raw, e.to_string()))
    } else {
        Ok(vec![raw.to_string()])
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn describe(ty: &ParamType) -> &'static str {
    match ty {
        ParamType::Int => "an integer",
        ParamType::Float => "a number",
        ParamType::Bool => "a boolean",
        ParamType::Str => "text",
        ParamType::Choice(_) | ParamType::ChoiceSet(_) => "an option",
        ParamType::Artifact(_) => "an artifact id",
        ParamType::Metadata | ParamType::MetadataColumn => "a metadata reference",
    }
}
