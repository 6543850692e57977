//! Tabla de frecuencias (muestras × features) en formato BIOM 1.0 (JSON).
//!
//! La matriz se guarda dispersa: solo las celdas distintas de cero. Cada eje
//! lleva metadata opcional por id (p.ej. `taxonomy` en las observaciones),
//! que es lo que el post-procesado restaura tras filtrar o rarefaccionar.
//!
//! La escritura es determinista: mismo contenido, mismos bytes.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::DomainError;

pub type AxisMetadata = Map<String, Value>;

/// Firma de archivo HDF5 (BIOM 2.x escribe el superbloque en el offset 0).
pub const HDF5_SIGNATURE: &[u8; 8] = b"\x89HDF\r\n\x1a\n";

pub fn is_hdf5(bytes: &[u8]) -> bool { bytes.starts_with(HDF5_SIGNATURE) }

/// Mira solo los primeros bytes del archivo.
pub fn is_hdf5_file(path: &Path) -> Result<bool, DomainError> {
    let mut head = Vec::with_capacity(HDF5_SIGNATURE.len());
    fs::File::open(path)?.take(HDF5_SIGNATURE.len() as u64).read_to_end(&mut head)?;
    Ok(is_hdf5(&head))
}

const FORMAT_NAME: &str = "Biological Observation Matrix 1.0.0";
const FORMAT_URL: &str = "http://biom-format.org";
const GENERATED_BY: &str = "qp-dispatch";
const DEFAULT_TABLE_TYPE: &str = "OTU table";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Sample,
    Observation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    id: Option<String>,
    table_type: Option<String>,
    observation_ids: Vec<String>,
    sample_ids: Vec<String>,
    observation_metadata: Vec<Option<AxisMetadata>>,
    sample_metadata: Vec<Option<AxisMetadata>>,
    /// (fila de observación, columna de muestra) -> valor, sin ceros.
    entries: BTreeMap<(usize, usize), f64>,
}

impl FeatureTable {
    /// Construye una tabla a partir de tripletas dispersas `(obs, sample, value)`.
    pub fn new<I>(observation_ids: Vec<String>, sample_ids: Vec<String>, entries: I) -> Result<Self, DomainError>
        where I: IntoIterator<Item = (usize, usize, f64)>
    {
        check_unique("observation", &observation_ids)?;
        check_unique("sample", &sample_ids)?;
        let mut map = BTreeMap::new();
        for (r, c, v) in entries {
            if r >= observation_ids.len() || c >= sample_ids.len() {
                return Err(DomainError::format("BIOM", format!("entry ({r}, {c}) is outside the table shape")));
            }
            if !v.is_finite() {
                return Err(DomainError::format("BIOM", format!("entry ({r}, {c}) is not a finite number")));
            }
            if v != 0.0 {
                map.insert((r, c), v);
            }
        }
        let n_obs = observation_ids.len();
        let n_samples = sample_ids.len();
        Ok(Self { id: None,
                  table_type: Some(DEFAULT_TABLE_TYPE.to_string()),
                  observation_ids,
                  sample_ids,
                  observation_metadata: vec![None; n_obs],
                  sample_metadata: vec![None; n_samples],
                  entries: map })
    }

    /// Construye desde una matriz densa indexada `[observación][muestra]`.
    pub fn from_dense(observation_ids: Vec<String>, sample_ids: Vec<String>, rows: &[Vec<f64>]) -> Result<Self, DomainError> {
        if rows.len() != observation_ids.len() || rows.iter().any(|r| r.len() != sample_ids.len()) {
            return Err(DomainError::format("BIOM", "dense data does not match the declared shape"));
        }
        let entries = rows.iter()
                          .enumerate()
                          .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, v)| (r, c, *v)));
        Self::new(observation_ids, sample_ids, entries)
    }

    pub fn ids(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Sample => &self.sample_ids,
            Axis::Observation => &self.observation_ids,
        }
    }

    pub fn sample_ids(&self) -> &[String] { &self.sample_ids }

    pub fn observation_ids(&self) -> &[String] { &self.observation_ids }

    /// (observaciones, muestras)
    pub fn shape(&self) -> (usize, usize) { (self.observation_ids.len(), self.sample_ids.len()) }

    /// Una tabla está vacía cuando no le quedan muestras o no le quedan features.
    pub fn is_empty(&self) -> bool { self.observation_ids.is_empty() || self.sample_ids.is_empty() }

    pub fn nnz(&self) -> usize { self.entries.len() }

    pub fn get(&self, observation: &str, sample: &str) -> f64 {
        let r = self.observation_ids.iter().position(|id| id == observation);
        let c = self.sample_ids.iter().position(|id| id == sample);
        match (r, c) {
            (Some(r), Some(c)) => self.entries.get(&(r, c)).copied().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Celdas no nulas como `(obs, sample, value)` en orden de fila.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.entries.iter().map(|(&(r, c), &v)| (r, c, v))
    }

    /// Suma por id a lo largo del eje indicado.
    pub fn totals(&self, axis: Axis) -> Vec<(String, f64)> {
        let ids = self.ids(axis);
        let mut sums = vec![0.0; ids.len()];
        for (&(r, c), v) in &self.entries {
            let idx = match axis {
                Axis::Sample => c,
                Axis::Observation => r,
            };
            sums[idx] += v;
        }
        ids.iter().cloned().zip(sums).collect()
    }

    /// Número de celdas no nulas por id a lo largo del eje indicado.
    pub fn nonzero_counts(&self, axis: Axis) -> Vec<(String, usize)> {
        let ids = self.ids(axis);
        let mut counts = vec![0usize; ids.len()];
        for &(r, c) in self.entries.keys() {
            match axis {
                Axis::Sample => counts[c] += 1,
                Axis::Observation => counts[r] += 1,
            }
        }
        ids.iter().cloned().zip(counts).collect()
    }

    pub fn metadata(&self, axis: Axis, id: &str) -> Option<&AxisMetadata> {
        let pos = self.ids(axis).iter().position(|x| x == id)?;
        self.axis_metadata(axis)[pos].as_ref()
    }

    /// Asigna metadata a un id; devuelve `false` si el id no existe.
    pub fn set_metadata(&mut self, axis: Axis, id: &str, metadata: AxisMetadata) -> bool {
        match self.ids(axis).iter().position(|x| x == id) {
            Some(pos) => {
                self.axis_metadata_mut(axis)[pos] = Some(metadata);
                true
            }
            None => false,
        }
    }

    pub fn has_metadata(&self, axis: Axis) -> bool { self.axis_metadata(axis).iter().any(Option::is_some) }

    /// Copia la metadata de `source` en ambos ejes, emparejando por id.
    /// Las claves ya presentes en `self` se conservan. Devuelve cuántos ids
    /// recibieron alguna clave.
    pub fn restore_metadata_from(&mut self, source: &FeatureTable) -> usize {
        let mut touched = 0;
        for axis in [Axis::Observation, Axis::Sample] {
            let ids: Vec<String> = self.ids(axis).to_vec();
            for (pos, id) in ids.iter().enumerate() {
                let Some(src) = source.metadata(axis, id) else { continue };
                let slot = &mut self.axis_metadata_mut(axis)[pos];
                let target = slot.get_or_insert_with(Map::new);
                let before = target.len();
                for (k, v) in src {
                    target.entry(k.clone()).or_insert_with(|| v.clone());
                }
                if target.len() > before {
                    touched += 1;
                }
            }
        }
        touched
    }

    /// Nueva tabla con solo los ids del eje que cumplen `keep`. Los ids del
    /// otro eje que quedan sin ninguna celda no nula se eliminan también.
    pub fn filter<F>(&self, axis: Axis, mut keep: F) -> FeatureTable
        where F: FnMut(&str, usize) -> bool
    {
        let kept: BTreeSet<usize> = self.ids(axis)
                                        .iter()
                                        .enumerate()
                                        .filter(|(i, id)| keep(id.as_str(), *i))
                                        .map(|(i, _)| i)
                                        .collect();
        let (rows, cols): (BTreeSet<usize>, BTreeSet<usize>) = match axis {
            Axis::Sample => {
                let rows = self.entries.keys().filter(|(_, c)| kept.contains(c)).map(|(r, _)| *r).collect();
                (rows, kept)
            }
            Axis::Observation => {
                let cols = self.entries.keys().filter(|(r, _)| kept.contains(r)).map(|(_, c)| *c).collect();
                (kept, cols)
            }
        };
        self.subset(&rows, &cols)
    }

    /// Reemplaza valores celda a celda; los resultados cero desaparecen y
    /// los ids que quedan sin celdas se eliminan.
    pub fn map_values<F>(&self, mut f: F) -> FeatureTable
        where F: FnMut(usize, usize, f64) -> f64
    {
        let mut next = self.clone();
        next.entries = self.entries
                           .iter()
                           .map(|(&(r, c), &v)| ((r, c), f(r, c, v)))
                           .filter(|(_, v)| *v != 0.0 && v.is_finite())
                           .collect();
        let rows: BTreeSet<usize> = next.entries.keys().map(|(r, _)| *r).collect();
        let cols: BTreeSet<usize> = next.entries.keys().map(|(_, c)| *c).collect();
        next.subset(&rows, &cols)
    }

    /// Copia sin metadata (como la devuelven muchas acciones del toolkit).
    pub fn without_metadata(&self) -> FeatureTable {
        let mut next = self.clone();
        next.observation_metadata = vec![None; next.observation_ids.len()];
        next.sample_metadata = vec![None; next.sample_ids.len()];
        next
    }

    /// Lee BIOM 1.0 (JSON). Un BIOM 2.x (HDF5) se reporta como
    /// `DomainError::Hdf5Table` para que quien llama lo derive al toolkit.
    pub fn read(path: &Path) -> Result<Self, DomainError> {
        let raw = fs::read(path)?;
        if is_hdf5(&raw) {
            return Err(DomainError::Hdf5Table(path.display().to_string()));
        }
        let raw = String::from_utf8(raw).map_err(|e| DomainError::format("BIOM", e.to_string()))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        let doc: BiomDocument = serde_json::from_str(raw)?;
        doc.into_table()
    }

    pub fn to_json_string(&self) -> Result<String, DomainError> {
        let doc = BiomDocument::from_table(self)?;
        Ok(serde_json::to_string(&doc)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), DomainError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    fn axis_metadata(&self, axis: Axis) -> &[Option<AxisMetadata>] {
        match axis {
            Axis::Sample => &self.sample_metadata,
            Axis::Observation => &self.observation_metadata,
        }
    }

    fn axis_metadata_mut(&mut self, axis: Axis) -> &mut Vec<Option<AxisMetadata>> {
        match axis {
            Axis::Sample => &mut self.sample_metadata,
            Axis::Observation => &mut self.observation_metadata,
        }
    }

    fn subset(&self, rows: &BTreeSet<usize>, cols: &BTreeSet<usize>) -> FeatureTable {
        let row_map: BTreeMap<usize, usize> = rows.iter().enumerate().map(|(new, old)| (*old, new)).collect();
        let col_map: BTreeMap<usize, usize> = cols.iter().enumerate().map(|(new, old)| (*old, new)).collect();
        let entries = self.entries
                          .iter()
                          .filter_map(|(&(r, c), &v)| Some(((*row_map.get(&r)?, *col_map.get(&c)?), v)))
                          .collect();
        FeatureTable { id: self.id.clone(),
                       table_type: self.table_type.clone(),
                       observation_ids: rows.iter().map(|r| self.observation_ids[*r].clone()).collect(),
                       sample_ids: cols.iter().map(|c| self.sample_ids[*c].clone()).collect(),
                       observation_metadata: rows.iter().map(|r| self.observation_metadata[*r].clone()).collect(),
                       sample_metadata: cols.iter().map(|c| self.sample_metadata[*c].clone()).collect(),
                       entries }
    }
}

fn check_unique(axis: &str, ids: &[String]) -> Result<(), DomainError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(DomainError::format("BIOM", format!("duplicate {axis} id '{id}'")));
        }
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct BiomAxisEntry {
    id: String,
    #[serde(default)]
    metadata: Option<AxisMetadata>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BiomDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    format_url: Option<String>,
    #[serde(rename = "type", default)]
    table_type: Option<String>,
    #[serde(default)]
    generated_by: Option<String>,
    rows: Vec<BiomAxisEntry>,
    columns: Vec<BiomAxisEntry>,
    matrix_type: String,
    #[serde(default)]
    matrix_element_type: Option<String>,
    shape: [usize; 2],
    data: Vec<Vec<Value>>,
}

impl BiomDocument {
    fn into_table(self) -> Result<FeatureTable, DomainError> {
        if self.shape != [self.rows.len(), self.columns.len()] {
            return Err(DomainError::format("BIOM", "shape does not match rows/columns"));
        }
        let mut entries = Vec::new();
        match self.matrix_type.as_str() {
            "sparse" => {
                for cell in &self.data {
                    match cell.as_slice() {
                        [r, c, v] => entries.push((as_index(r)?, as_index(c)?, as_number(v)?)),
                        _ => return Err(DomainError::format("BIOM", "sparse entries must be [row, col, value]")),
                    }
                }
            }
            "dense" => {
                for (r, row) in self.data.iter().enumerate() {
                    for (c, v) in row.iter().enumerate() {
                        entries.push((r, c, as_number(v)?));
                    }
                }
            }
            other => return Err(DomainError::format("BIOM", format!("unknown matrix_type '{other}'"))),
        }
        let (observation_ids, observation_metadata): (Vec<_>, Vec<_>) =
            self.rows.into_iter().map(|e| (e.id, e.metadata)).unzip();
        let (sample_ids, sample_metadata): (Vec<_>, Vec<_>) =
            self.columns.into_iter().map(|e| (e.id, e.metadata)).unzip();
        let mut table = FeatureTable::new(observation_ids, sample_ids, entries)?;
        table.id = self.id;
        if self.table_type.is_some() {
            table.table_type = self.table_type;
        }
        table.observation_metadata = observation_metadata;
        table.sample_metadata = sample_metadata;
        Ok(table)
    }

    fn from_table(table: &FeatureTable) -> Result<Self, DomainError> {
        let integral = table.entries.values().all(|v| v.fract() == 0.0);
        let mut data = Vec::with_capacity(table.entries.len());
        for (&(r, c), &v) in &table.entries {
            let value = if integral {
                Value::from(v as i64)
            } else {
                Number::from_f64(v).map(Value::Number)
                                   .ok_or_else(|| DomainError::format("BIOM", "non-finite value"))?
            };
            data.push(vec![Value::from(r), Value::from(c), value]);
        }
        let axis = |ids: &[String], md: &[Option<AxisMetadata>]| -> Vec<BiomAxisEntry> {
            ids.iter()
               .zip(md)
               .map(|(id, m)| BiomAxisEntry { id: id.clone(),
                                              metadata: m.clone() })
               .collect()
        };
        Ok(Self { id: table.id.clone(),
                  format: Some(FORMAT_NAME.to_string()),
                  format_url: Some(FORMAT_URL.to_string()),
                  table_type: table.table_type.clone(),
                  generated_by: Some(GENERATED_BY.to_string()),
                  rows: axis(&table.observation_ids, &table.observation_metadata),
                  columns: axis(&table.sample_ids, &table.sample_metadata),
                  matrix_type: "sparse".to_string(),
                  matrix_element_type: Some(if integral { "int" } else { "float" }.to_string()),
                  shape: [table.observation_ids.len(), table.sample_ids.len()],
                  data })
    }
}

fn as_index(v: &Value) -> Result<usize, DomainError> {
    v.as_u64()
     .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
     .map(|u| u as usize)
     .ok_or_else(|| DomainError::format("BIOM", format!("invalid index {v}")))
}

fn as_number(v: &Value) -> Result<f64, DomainError> {
    v.as_f64().ok_or_else(|| DomainError::format("BIOM", format!("invalid value {v}")))
}
