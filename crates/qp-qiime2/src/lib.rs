//! qp-qiime2: toolkit QIIME2 para el dispatcher.
//!
//! El protocolo y la configuración no dependen de Python; el toolkit real
//! (`Qiime2Toolkit`) se compila con la feature `python`.
use thiserror::Error;

pub mod env;
pub mod protocol;

#[cfg(feature = "python")]
pub mod bridge;

pub use env::Qiime2Settings;

#[cfg(feature = "python")]
pub use bridge::Qiime2Toolkit;

/// Código del módulo Python embebido.
pub const GLUE_SOURCE: &str = include_str!("../python/q2_bridge.py");

#[derive(Debug, Error)]
pub enum Qiime2Error {
    #[error("Error inicializando Python/QIIME2: {0}")]
    Init(String),
}
