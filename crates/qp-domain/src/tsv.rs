//! Lectura y escritura TSV compartida por los formatos de texto.
//!
//! Los campos con tabs, saltos de línea o comillas se citan al escribir;
//! al leer, toda fila debe tener tantas celdas como la cabecera.

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::errors::DomainError;

/// Filas de un TSV, cabecera incluida. Las líneas vacías se ignoran.
pub(crate) fn parse(format: &'static str, raw: &str) -> Result<Vec<StringRecord>, DomainError> {
    let mut reader = ReaderBuilder::new().delimiter(b'\t')
                                         .has_headers(false)
                                         .flexible(false)
                                         .from_reader(raw.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DomainError::format(format, tsv_reason(&e)))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        rows.push(record);
    }
    Ok(rows)
}

/// Serializa filas (cabecera primero) con citado cuando hace falta.
pub(crate) fn render<I, R, F>(rows: I) -> Result<String, DomainError>
    where I: IntoIterator<Item = R>,
          R: IntoIterator<Item = F>,
          F: AsRef<[u8]>
{
    let mut writer = WriterBuilder::new().delimiter(b'\t').flexible(false).from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| DomainError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| DomainError::format("tsv", e.to_string()))
}

fn tsv_reason(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::UnequalLengths { pos, expected_len, len } => {
            let line = pos.as_ref().map_or(0, |p| p.line());
            format!("line {line} has {len} field(s), expected {expected_len}")
        }
        _ => err.to_string(),
    }
}
