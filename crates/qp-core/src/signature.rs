//! Firma declarada por el toolkit para una acción: parámetros formales con
//! su tipo y default, y outputs con su tipo semántico.
//!
//! Las firmas son de solo lectura; las produce el `Toolkit` (o el caché de
//! firmas) y el resolver las consulta.

use std::collections::BTreeSet;

use qp_domain::SemanticType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamType {
    Int,
    Float,
    Bool,
    Str,
    /// Un valor de un conjunto cerrado.
    Choice(BTreeSet<String>),
    /// Subconjunto de un conjunto cerrado.
    ChoiceSet(BTreeSet<String>),
    Artifact(SemanticType),
    /// Tabla completa de metadata de muestras.
    Metadata,
    /// Una columna de la metadata de muestras.
    MetadataColumn,
}

impl ParamType {
    pub fn choices(&self) -> Option<&BTreeSet<String>> {
        match self {
            ParamType::Choice(set) | ParamType::ChoiceSet(set) => Some(set),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamDefault {
    Required,
    /// Opcional sin valor (None).
    NoneDefault,
    /// Valor literal declarado por el toolkit.
    Value(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub ty: ParamType,
    pub default: ParamDefault,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>, ty: ParamType) -> Self {
        Self { name: name.into(),
               ty,
               default: ParamDefault::Required }
    }

    pub fn optional(name: impl Into<String>, ty: ParamType) -> Self {
        Self { name: name.into(),
               ty,
               default: ParamDefault::NoneDefault }
    }

    pub fn with_default(name: impl Into<String>, ty: ParamType, default: Value) -> Self {
        Self { name: name.into(),
               ty,
               default: ParamDefault::Value(default) }
    }

    pub fn is_required(&self) -> bool { matches!(self.default, ParamDefault::Required) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub name: String,
    pub semantic_type: SemanticType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSignature {
    pub plugin: String,
    pub action: String,
    pub params: Vec<ParamSpec>,
    pub outputs: Vec<OutputSpec>,
}

impl ActionSignature {
    pub fn new(plugin: impl Into<String>, action: impl Into<String>) -> Self {
        Self { plugin: plugin.into(),
               action: action.into(),
               params: Vec::new(),
               outputs: Vec::new() }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn output(mut self, name: impl Into<String>, semantic_type: SemanticType) -> Self {
        self.outputs.push(OutputSpec { name: name.into(),
                                       semantic_type });
        self
    }

    pub fn key(&self) -> String { format!("{}.{}", self.plugin, self.action) }

    pub fn spec(&self, name: &str) -> Option<&ParamSpec> { self.params.iter().find(|p| p.name == name) }

    /// Choice-set vivo de un parámetro, si es de tipo opción.
    pub fn choices(&self, name: &str) -> Option<&BTreeSet<String>> { self.spec(name)?.ty.choices() }

    pub fn output_type(&self, name: &str) -> Option<SemanticType> {
        self.outputs.iter().find(|o| o.name == name).map(|o| o.semantic_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signature_json_shape_is_stable() {
        let sig = ActionSignature::new("diversity", "beta")
            .param(ParamSpec::required("table", ParamType::Artifact(SemanticType::FeatureTable)))
            .param(ParamSpec::required("metric", ParamType::Choice(["braycurtis".to_string()].into())))
            .param(ParamSpec::with_default("n_jobs", ParamType::Int, json!(1)))
            .output("distance_matrix", SemanticType::DistanceMatrix);
        let v = serde_json::to_value(&sig).unwrap();
        assert_eq!(v["params"][0]["ty"], json!({"kind": "artifact", "value": "FeatureTable"}));
        assert_eq!(v["params"][1]["ty"], json!({"kind": "choice", "value": ["braycurtis"]}));
        assert_eq!(v["params"][2]["default"], json!({"kind": "value", "value": 1}));
        let back: ActionSignature = serde_json::from_value(v).unwrap();
        assert_eq!(back, sig);
        assert_eq!(back.output_type("distance_matrix"), Some(SemanticType::DistanceMatrix));
    }

    #[test]
    fn unit_variants_serialize_with_kind_only() {
        assert_eq!(serde_json::to_value(ParamType::Int).unwrap(), json!({"kind": "int"}));
        assert_eq!(serde_json::to_value(ParamDefault::Required).unwrap(), json!({"kind": "required"}));
        assert_eq!(serde_json::to_value(ParamDefault::NoneDefault).unwrap(), json!({"kind": "none_default"}));
    }
}
