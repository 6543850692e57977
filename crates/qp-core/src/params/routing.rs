//! Tablas de ruteo y de literales.
//!
//! El cliente manda un único mapa plano donde conviven valores y
//! directivas (claves con prefijo `qp-hide-`). `JobParameters::from_flat`
//! es el único punto que conoce esa convención: la parte en dos tablas
//! tipadas y a partir de ahí nadie vuelve a mirar prefijos.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::DispatchError;

const ROUTING_PREFIX: &str = "qp-hide-";
const PLUGIN_KEY: &str = "qp-hide-plugin";
const METHOD_KEY: &str = "qp-hide-method";
const PARAM_PREFIX: &str = "qp-hide-param";
const METADATA_KEY: &str = "qp-hide-metadata";
const TAXONOMY_KEY: &str = "qp-hide-taxonomy";
/// Nombre formal reservado: la etiqueta es un campo de la metadata.
const METADATA_FIELD: &str = "qp-hide-metadata-field";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Flag(bool),
    Text(String),
}

impl LiteralValue {
    /// El string vacío significa "sin valor".
    pub fn is_blank(&self) -> bool { matches!(self, LiteralValue::Text(t) if t.trim().is_empty()) }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LiteralValue::Text(t) => Some(t),
            LiteralValue::Flag(_) => None,
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Bool(b) => LiteralValue::Flag(*b),
            Value::String(s) => LiteralValue::Text(s.clone()),
            Value::Null => LiteralValue::Text(String::new()),
            other => LiteralValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self { LiteralValue::Text(value.to_string()) }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self { LiteralValue::Flag(value) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamRoute {
    /// La etiqueta alimenta el parámetro formal con ese nombre.
    Formal(String),
    /// La etiqueta nombra una columna de la metadata de muestras.
    MetadataField,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutingTable {
    pub plugin: String,
    pub method: String,
    /// etiqueta -> ruta
    pub params: BTreeMap<String, ParamRoute>,
    /// Parámetro formal que recibe la metadata completa del análisis.
    pub metadata_param: Option<String>,
    /// Parámetro formal que recibe la taxonomía derivada de la tabla.
    pub taxonomy_param: Option<String>,
}

impl RoutingTable {
    pub fn new(plugin: impl Into<String>, method: impl Into<String>) -> Self {
        Self { plugin: plugin.into(),
               method: method.into(),
               ..Self::default() }
    }

    pub fn route(mut self, label: impl Into<String>, formal: impl Into<String>) -> Self {
        self.params.insert(label.into(), ParamRoute::Formal(formal.into()));
        self
    }

    pub fn metadata_field(mut self, label: impl Into<String>) -> Self {
        self.params.insert(label.into(), ParamRoute::MetadataField);
        self
    }

    pub fn with_metadata(mut self, formal: impl Into<String>) -> Self {
        self.metadata_param = Some(formal.into());
        self
    }

    pub fn with_taxonomy(mut self, formal: impl Into<String>) -> Self {
        self.taxonomy_param = Some(formal.into());
        self
    }

    /// Etiqueta ruteada al parámetro formal `formal`.
    pub fn label_for(&self, formal: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(_, route)| matches!(route, ParamRoute::Formal(f) if f == formal))
            .map(|(label, _)| label.as_str())
    }

    pub fn metadata_field_label(&self) -> Option<&str> {
        self.params
            .iter()
            .find(|(_, route)| matches!(route, ParamRoute::MetadataField))
            .map(|(label, _)| label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LiteralTable(BTreeMap<String, LiteralValue>);

impl LiteralTable {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, label: impl Into<String>, value: impl Into<LiteralValue>) -> Self {
        self.insert(label, value);
        self
    }

    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<LiteralValue>) {
        self.0.insert(label.into(), value.into());
    }

    pub fn get(&self, label: &str) -> Option<&LiteralValue> { self.0.get(label) }

    pub fn labels(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobParameters {
    pub routing: RoutingTable,
    pub literals: LiteralTable,
}

impl JobParameters {
    pub fn new(routing: RoutingTable, literals: LiteralTable) -> Self { Self { routing, literals } }

    /// Separa el mapa plano del cliente en ruteo y literales.
    pub fn from_flat(flat: &Map<String, Value>) -> Result<Self, DispatchError> {
        let mut plugin = None;
        let mut method = None;
        let mut routing = RoutingTable::default();
        let mut literals = LiteralTable::new();
        for (key, value) in flat {
            let text = || match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if key == PLUGIN_KEY {
                plugin = Some(text());
            } else if key == METHOD_KEY {
                method = Some(text());
            } else if key == METADATA_KEY {
                routing.metadata_param = Some(text());
            } else if key == TAXONOMY_KEY {
                routing.taxonomy_param = Some(text());
            } else if let Some(label) = key.strip_prefix(PARAM_PREFIX) {
                let formal = text();
                let route = if formal == METADATA_FIELD {
                    ParamRoute::MetadataField
                } else {
                    ParamRoute::Formal(formal)
                };
                routing.params.insert(label.to_string(), route);
            } else if key.starts_with(ROUTING_PREFIX) {
                log::debug!("ignoring unknown routing directive '{key}'");
            } else {
                literals.insert(key.clone(), LiteralValue::from_json(value));
            }
        }
        routing.plugin = plugin.ok_or(DispatchError::MissingDirective(PLUGIN_KEY))?;
        routing.method = method.ok_or(DispatchError::MissingDirective(METHOD_KEY))?;
        Ok(Self { routing, literals })
    }

    /// Parsea el JSON de parámetros tal como lo guarda el cliente.
    pub fn from_json_str(raw: &str) -> Result<Self, DispatchError> {
        let flat: Map<String, Value> = serde_json::from_str(raw).map_err(|e| DispatchError::translation("parameters", "<json>", e.to_string()))?;
        Self::from_flat(&flat)
    }

    /// (etiqueta, valor) del literal que alimenta el parámetro formal.
    pub fn literal_for(&self, formal: &str) -> Option<(&str, &LiteralValue)> {
        let label = self.routing.label_for(formal)?;
        Some((label, self.literals.get(label)?))
    }
}
