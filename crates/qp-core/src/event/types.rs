//! Eventos emitidos por el `Dispatcher`.
//!
//! Un despacho siempre abre con `ParametersResolved` (o falla antes, con
//! `DispatchFailed` como único evento) y cierra con `DispatchCompleted` o
//! `DispatchFailed`. Tras un `StepFailed` no hay más pasos.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DispatchEventKind {
    /// Parámetros traducidos y artifacts importados; fija el plan.
    ParametersResolved { command: String, stage_count: usize, params_hash: String },
    StepStarted { step_index: usize, action: String },
    /// Paso completado con hashes de los archivos exportados y fingerprint.
    StepFinished {
        step_index: usize,
        action: String,
        outputs: Vec<String>,
        fingerprint: String,
    },
    StepFailed { step_index: usize, action: String, message: String },
    /// Cierre exitoso; fingerprint agregado de los pasos.
    DispatchCompleted { dispatch_fingerprint: String },
    DispatchFailed { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchEvent {
    pub seq: u64,
    pub run_id: Uuid,
    pub kind: DispatchEventKind,
    pub ts: DateTime<Utc>, // no entra en fingerprints
}
