//! Protocolo JSON con el módulo Python.
//!
//! Petición: cada parámetro resuelto se vuelve un valor JSON; artifacts y
//! metadata se escriben antes a `<workdir>/inputs/` y viajan como rutas.
//! Respuesta: `{"ok": <payload>}` o `{"error": {"kind": ..., "message": ...}}`.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use qp_core::{ActionOutputs, ActionSignature, ResolvedParams, ResolvedValue, ToolkitError};
use qp_domain::{FeatureTable, SemanticType, ToolkitArtifact};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Reply<T> {
    Ok(T),
    Error(ToolkitError),
}

/// Output escrito por el módulo Python en su formato canónico.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputFile {
    pub name: String,
    pub semantic_type: SemanticType,
    pub path: PathBuf,
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, ToolkitError> {
    match serde_json::from_str::<Reply<T>>(raw) {
        Ok(Reply::Ok(payload)) => Ok(payload),
        Ok(Reply::Error(err)) => Err(err),
        Err(e) => Err(ToolkitError::preflight(format!("malformed reply from the qiime2 bridge: {e}"))),
    }
}

pub fn decode_signature(raw: &str) -> Result<ActionSignature, ToolkitError> { decode(raw) }

/// Tabla BIOM 2.x convertida por el módulo Python a BIOM JSON.
pub fn decode_table(raw: &str) -> Result<FeatureTable, ToolkitError> {
    let json: String = decode(raw)?;
    FeatureTable::from_json_str(&json).map_err(|e| ToolkitError::preflight(format!("could not read the decoded table: {e}")))
}

/// Decodifica la lista de outputs y carga cada archivo en memoria (el
/// directorio de trabajo no sobrevive a la invocación).
pub fn decode_outputs(raw: &str) -> Result<ActionOutputs, ToolkitError> {
    let files: Vec<OutputFile> = decode(raw)?;
    let mut outputs = ActionOutputs::new();
    for file in files {
        let artifact = ToolkitArtifact::load(file.semantic_type, &file.path).map_err(|e| {
                           ToolkitError::execution(format!("could not read output '{}' ({}): {e}", file.name, file.semantic_type))
                       })?;
        outputs.insert(file.name, artifact);
    }
    Ok(outputs)
}

/// Serializa los parámetros para `invoke`, escribiendo los archivos de
/// entrada bajo `workdir`.
pub fn encode_params(params: &ResolvedParams, workdir: &Path) -> Result<Value, ToolkitError> {
    let inputs = workdir.join("inputs");
    fs::create_dir_all(&inputs).map_err(|e| io_error(&inputs, e))?;
    let mut out = Map::new();
    for (name, value) in params {
        let encoded = match value {
            ResolvedValue::Int(i) => json!(i),
            ResolvedValue::Float(f) => json!(f),
            ResolvedValue::Bool(b) => json!(b),
            ResolvedValue::Str(s) => json!(s),
            ResolvedValue::StrSet(set) => json!(set),
            ResolvedValue::None => Value::Null,
            ResolvedValue::Artifact(artifact) => {
                let st = artifact.semantic_type();
                let dir = inputs.join(name);
                fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
                let path = dir.join(st.canonical_filename());
                artifact.write_to(&path)
                        .map_err(|e| ToolkitError::preflight(format!("could not stage input '{name}': {e}")))?;
                json!({ "artifact": { "type": st.toolkit_name(), "path": path } })
            }
            ResolvedValue::Metadata(md) => {
                let path = inputs.join(format!("{name}.tsv"));
                md.write(&path).map_err(|e| ToolkitError::preflight(format!("could not stage metadata '{name}': {e}")))?;
                json!({ "metadata": { "path": path } })
            }
            ResolvedValue::MetadataColumn(column) => {
                let path = inputs.join(format!("{name}.tsv"));
                column.write(&path)
                      .map_err(|e| ToolkitError::preflight(format!("could not stage metadata '{name}': {e}")))?;
                json!({ "metadata_column": { "path": path, "column": column.name } })
            }
        };
        out.insert(name.clone(), encoded);
    }
    debug!("staged {} parameter(s) under {}", out.len(), inputs.display());
    Ok(Value::Object(out))
}

fn io_error(path: &Path, err: std::io::Error) -> ToolkitError {
    ToolkitError::preflight(format!("could not write {}: {err}", path.display()))
}
