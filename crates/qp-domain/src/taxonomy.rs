//! Asignación taxonómica por feature, derivada de la metadata de
//! observaciones de una `FeatureTable`.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::DomainError;
use crate::tsv;
use crate::feature_table::{Axis, FeatureTable};

pub const TAXONOMY_KEY: &str = "taxonomy";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    entries: IndexMap<String, String>,
}

impl Taxonomy {
    pub fn new(entries: IndexMap<String, String>) -> Self { Self { entries } }

    /// Lee la clave `taxonomy` de cada observación. Acepta lista de rangos
    /// (se unen con `; `) o string ya unido. Las observaciones sin
    /// taxonomía se omiten; si ninguna la tiene es un error.
    pub fn from_feature_table(table: &FeatureTable) -> Result<Self, DomainError> {
        let mut entries = IndexMap::new();
        for id in table.observation_ids() {
            let Some(value) = table.metadata(Axis::Observation, id).and_then(|m| m.get(TAXONOMY_KEY)) else {
                continue;
            };
            let taxon = match value {
                Value::Array(levels) => levels.iter().filter_map(Value::as_str).collect::<Vec<_>>().join("; "),
                Value::String(s) => s.clone(),
                other => return Err(DomainError::format("taxonomy", format!("unsupported taxonomy value {other} for '{id}'"))),
            };
            entries.insert(id.clone(), taxon);
        }
        if entries.is_empty() {
            return Err(DomainError::format("taxonomy", "the feature table carries no taxonomy metadata"));
        }
        Ok(Self { entries })
    }

    pub fn get(&self, feature: &str) -> Option<&str> { self.entries.get(feature).map(String::as_str) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn to_tsv(&self) -> Result<String, DomainError> {
        let header = vec!["Feature ID", "Taxon"];
        tsv::render(std::iter::once(header).chain(self.entries.iter().map(|(id, taxon)| vec![id.as_str(), taxon.as_str()])))
    }

    pub fn from_tsv(raw: &str) -> Result<Self, DomainError> {
        let rows = tsv::parse("taxonomy", raw)?;
        let Some((header, body)) = rows.split_first() else {
            return Err(DomainError::format("taxonomy", "empty file"));
        };
        if header.len() < 2 {
            return Err(DomainError::format("taxonomy", "header must name a feature id and a taxon column"));
        }
        let entries = body.iter().map(|r| (r[0].to_string(), r[1].to_string())).collect();
        Ok(Self { entries })
    }

    pub fn read(path: &Path) -> Result<Self, DomainError> { Self::from_tsv(&fs::read_to_string(path)?) }

    pub fn write(&self, path: &Path) -> Result<(), DomainError> {
        fs::write(path, self.to_tsv()?)?;
        Ok(())
    }
}
