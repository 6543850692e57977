use std::collections::BTreeSet;

use indexmap::IndexMap;
use qp_domain::{MetadataColumn, SampleMetadata, ToolkitArtifact};
use serde_json::{json, Value};

use crate::signature::ParamType;

/// Valor tipado listo para la invocación.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    StrSet(BTreeSet<String>),
    None,
    Artifact(ToolkitArtifact),
    Metadata(SampleMetadata),
    MetadataColumn(MetadataColumn),
}

/// Parámetro formal -> valor, en el orden de la firma.
pub type ResolvedParams = IndexMap<String, ResolvedValue>;

impl ResolvedValue {
    /// Convierte un default declarado por el toolkit al tipo del parámetro.
    pub fn from_default(ty: &ParamType, value: &Value) -> Self {
        match value {
            Value::Null => ResolvedValue::None,
            Value::Bool(b) => ResolvedValue::Bool(*b),
            Value::Number(n) => match (ty, n.as_i64()) {
                (ParamType::Float, _) | (_, None) => ResolvedValue::Float(n.as_f64().unwrap_or_default()),
                (_, Some(i)) => ResolvedValue::Int(i),
            },
            Value::String(s) => ResolvedValue::Str(s.clone()),
            Value::Array(items) => {
                ResolvedValue::StrSet(items.iter()
                                           .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                                           .collect())
            }
            Value::Object(_) => ResolvedValue::Str(value.to_string()),
        }
    }

    pub fn as_artifact(&self) -> Option<&ToolkitArtifact> {
        match self {
            ResolvedValue::Artifact(a) => Some(a),
            _ => None,
        }
    }

    /// Resumen JSON estable (para logs y fingerprints). Los artifacts y la
    /// metadata se resumen por tipo y tamaño, no por contenido.
    pub fn summary(&self) -> Value {
        match self {
            ResolvedValue::Int(i) => json!(i),
            ResolvedValue::Float(f) => json!(f),
            ResolvedValue::Bool(b) => json!(b),
            ResolvedValue::Str(s) => json!(s),
            ResolvedValue::StrSet(set) => json!(set),
            ResolvedValue::None => Value::Null,
            ResolvedValue::Artifact(a) => json!({ "artifact": a.semantic_type().toolkit_name() }),
            ResolvedValue::Metadata(md) => json!({ "metadata": md.columns(), "samples": md.len() }),
            ResolvedValue::MetadataColumn(c) => json!({ "metadata_column": c.name, "samples": c.values.len() }),
        }
    }
}

pub fn summarize(params: &ResolvedParams) -> Value {
    Value::Object(params.iter().map(|(k, v)| (k.clone(), v.summary())).collect())
}
