//! Matriz de distancias cuadrada y hueca, en TSV con cabecera `\tS1\tS2...`.

use std::fs;
use std::path::Path;

use crate::errors::DomainError;
use crate::tsv;

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    ids: Vec<String>,
    data: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    pub fn new(ids: Vec<String>, data: Vec<Vec<f64>>) -> Result<Self, DomainError> {
        if data.len() != ids.len() || data.iter().any(|row| row.len() != ids.len()) {
            return Err(DomainError::format("distance matrix", "data is not square or does not match the ids"));
        }
        for (i, row) in data.iter().enumerate() {
            if row[i] != 0.0 {
                return Err(DomainError::format("distance matrix", format!("diagonal entry for '{}' is not zero", ids[i])));
            }
            if let Some((j, _)) = row.iter().enumerate().find(|(j, v)| (*v - data[*j][i]).abs() > 1e-9) {
                return Err(DomainError::format("distance matrix",
                                               format!("not symmetric between '{}' and '{}'", ids[i], ids[j])));
            }
        }
        Ok(Self { ids, data })
    }

    /// Construye la matriz aplicando `distance` a cada par `i < j`.
    pub fn from_fn<F>(ids: Vec<String>, mut distance: F) -> Result<Self, DomainError>
        where F: FnMut(usize, usize) -> f64
    {
        let n = ids.len();
        let mut data = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(i, j);
                data[i][j] = d;
                data[j][i] = d;
            }
        }
        Self::new(ids, data)
    }

    pub fn ids(&self) -> &[String] { &self.ids }

    pub fn len(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.ids.iter().position(|x| x == a)?;
        let j = self.ids.iter().position(|x| x == b)?;
        Some(self.data[i][j])
    }

    pub fn from_tsv(raw: &str) -> Result<Self, DomainError> {
        let rows = tsv::parse("distance matrix", raw)?;
        let Some((header, body)) = rows.split_first() else {
            return Err(DomainError::format("distance matrix", "empty file"));
        };
        let ids: Vec<String> = header.iter().skip(1).map(str::to_string).collect();
        if body.len() != ids.len() {
            return Err(DomainError::format("distance matrix", format!("{} row(s) for {} id(s)", body.len(), ids.len())));
        }
        let mut data = Vec::with_capacity(ids.len());
        for (record, id) in body.iter().zip(&ids) {
            let row_id = record.get(0).unwrap_or_default();
            if row_id != id {
                return Err(DomainError::format("distance matrix", format!("row '{row_id}' does not match the header order")));
            }
            let row = record.iter()
                            .skip(1)
                            .map(|f| {
                                f.trim()
                                 .parse::<f64>()
                                 .map_err(|_| DomainError::format("distance matrix", format!("invalid value '{f}'")))
                            })
                            .collect::<Result<Vec<_>, _>>()?;
            data.push(row);
        }
        Self::new(ids, data)
    }

    pub fn to_tsv(&self) -> Result<String, DomainError> {
        let mut rows = Vec::with_capacity(self.ids.len() + 1);
        rows.push(std::iter::once(String::new()).chain(self.ids.iter().cloned()).collect::<Vec<_>>());
        for (id, row) in self.ids.iter().zip(&self.data) {
            rows.push(std::iter::once(id.clone()).chain(row.iter().map(f64::to_string)).collect());
        }
        tsv::render(rows)
    }

    pub fn read(path: &Path) -> Result<Self, DomainError> { Self::from_tsv(&fs::read_to_string(path)?) }

    pub fn write(&self, path: &Path) -> Result<(), DomainError> {
        fs::write(path, self.to_tsv()?)?;
        Ok(())
    }
}
