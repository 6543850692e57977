//! Configuración del toolkit QIIME2 desde variables de entorno.
use std::env;
use std::path::PathBuf;

use once_cell::sync::Lazy;

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    dotenvy::dotenv().ok();
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qiime2Settings {
    /// Directorio bajo el que se crean los directorios de trabajo de cada
    /// invocación.
    pub workdir: PathBuf,
}

impl Default for Qiime2Settings {
    fn default() -> Self { Self { workdir: env::temp_dir() } }
}

impl Qiime2Settings {
    /// `QP_QIIME2_WORKDIR` o el directorio temporal del sistema.
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        match env::var("QP_QIIME2_WORKDIR") {
            Ok(dir) if !dir.trim().is_empty() => Self { workdir: PathBuf::from(dir.trim()) },
            _ => Self::default(),
        }
    }
}
