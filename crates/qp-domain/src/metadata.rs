//! Metadata de muestras de un análisis y columnas individuales.
//!
//! El cliente la entrega como `{muestra: {columna: valor}}`; aquí se fija un
//! orden estable de columnas y se expone la serialización TSV que consume
//! el toolkit (`sample_name` como cabecera de ids).

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::errors::DomainError;
use crate::tsv;

pub const ID_HEADER: &str = "sample_name";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleMetadata {
    columns: Vec<String>,
    rows: BTreeMap<String, BTreeMap<String, String>>,
}

impl SampleMetadata {
    pub fn from_client(rows: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        let columns: BTreeSet<String> = rows.values().flat_map(|r| r.keys().cloned()).collect();
        Self { columns: columns.into_iter().collect(),
               rows }
    }

    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn sample_ids(&self) -> impl Iterator<Item = &str> { self.rows.keys().map(String::as_str) }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn value(&self, sample: &str, column: &str) -> Option<&str> {
        self.rows.get(sample)?.get(column).map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Result<MetadataColumn, DomainError> {
        if !self.columns.iter().any(|c| c == name) {
            return Err(DomainError::MissingColumn(name.to_string()));
        }
        let values = self.rows
                         .iter()
                         .filter_map(|(id, row)| row.get(name).map(|v| (id.clone(), v.clone())))
                         .collect();
        Ok(MetadataColumn { name: name.to_string(),
                            values })
    }

    pub fn to_tsv(&self) -> Result<String, DomainError> {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(std::iter::once(ID_HEADER).chain(self.columns.iter().map(String::as_str)).collect::<Vec<_>>());
        for (id, row) in &self.rows {
            let cells = self.columns.iter().map(|c| row.get(c).map(String::as_str).unwrap_or_default());
            rows.push(std::iter::once(id.as_str()).chain(cells).collect());
        }
        tsv::render(rows)
    }

    /// Inverso de `to_tsv`: las celdas vacías quedan fuera de la fila.
    pub fn from_tsv(raw: &str) -> Result<Self, DomainError> {
        let rows = tsv::parse("sample metadata", raw)?;
        let Some((header, body)) = rows.split_first() else {
            return Err(DomainError::format("sample metadata", "empty file"));
        };
        if header.get(0) != Some(ID_HEADER) {
            return Err(DomainError::format("sample metadata", format!("first column must be '{ID_HEADER}'")));
        }
        let columns: Vec<String> = header.iter().skip(1).map(str::to_string).collect();
        let mut parsed = BTreeMap::new();
        for record in body {
            let id = record.get(0).unwrap_or_default().to_string();
            let row = columns.iter()
                             .zip(record.iter().skip(1))
                             .filter(|(_, v)| !v.is_empty())
                             .map(|(c, v)| (c.clone(), v.to_string()))
                             .collect();
            if parsed.insert(id.clone(), row).is_some() {
                return Err(DomainError::format("sample metadata", format!("duplicate sample '{id}'")));
            }
        }
        Ok(Self { columns, rows: parsed })
    }

    pub fn read(path: &Path) -> Result<Self, DomainError> { Self::from_tsv(&fs::read_to_string(path)?) }

    pub fn write(&self, path: &Path) -> Result<(), DomainError> {
        fs::write(path, self.to_tsv()?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataColumn {
    pub name: String,
    pub values: BTreeMap<String, String>,
}

impl MetadataColumn {
    pub fn is_numeric(&self) -> bool { self.values.values().all(|v| v.trim().parse::<f64>().is_ok()) }

    pub fn numeric_values(&self) -> Result<BTreeMap<String, f64>, DomainError> {
        self.values
            .iter()
            .map(|(id, v)| {
                v.trim()
                 .parse::<f64>()
                 .map(|n| (id.clone(), n))
                 .map_err(|_| DomainError::NonNumericColumn(self.name.clone()))
            })
            .collect()
    }

    pub fn to_tsv(&self) -> Result<String, DomainError> {
        let header = vec![ID_HEADER, self.name.as_str()];
        tsv::render(std::iter::once(header).chain(self.values.iter().map(|(id, v)| vec![id.as_str(), v.as_str()])))
    }

    pub fn write(&self, path: &Path) -> Result<(), DomainError> {
        fs::write(path, self.to_tsv()?)?;
        Ok(())
    }
}
