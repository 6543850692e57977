//! Vector de diversidad alfa: un valor por muestra, TSV con cabecera `\t<métrica>`.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::errors::DomainError;
use crate::tsv;

#[derive(Debug, Clone, PartialEq)]
pub struct AlphaVector {
    pub metric: String,
    pub values: IndexMap<String, f64>,
}

impl AlphaVector {
    pub fn new(metric: impl Into<String>, values: IndexMap<String, f64>) -> Self {
        Self { metric: metric.into(),
               values }
    }

    pub fn get(&self, sample: &str) -> Option<f64> { self.values.get(sample).copied() }

    pub fn from_tsv(raw: &str) -> Result<Self, DomainError> {
        let rows = tsv::parse("alpha vector", raw)?;
        let Some((header, body)) = rows.split_first() else {
            return Err(DomainError::format("alpha vector", "empty file"));
        };
        if header.len() != 2 {
            return Err(DomainError::format("alpha vector", "header must be an id column and a metric column"));
        }
        let mut values = IndexMap::new();
        for record in body {
            let (id, v) = (&record[0], &record[1]);
            let v: f64 = v.trim()
                          .parse()
                          .map_err(|_| DomainError::format("alpha vector", format!("invalid value for '{id}'")))?;
            values.insert(id.to_string(), v);
        }
        Ok(Self { metric: header[1].to_string(),
                  values })
    }

    pub fn to_tsv(&self) -> Result<String, DomainError> {
        let header = vec![String::new(), self.metric.clone()];
        tsv::render(std::iter::once(header).chain(self.values.iter().map(|(id, v)| vec![id.clone(), v.to_string()])))
    }

    pub fn read(path: &Path) -> Result<Self, DomainError> { Self::from_tsv(&fs::read_to_string(path)?) }

    pub fn write(&self, path: &Path) -> Result<(), DomainError> {
        fs::write(path, self.to_tsv()?)?;
        Ok(())
    }
}
