//! Configuración del dispatcher desde variables de entorno (con `.env`).
use once_cell::sync::Lazy;
use std::env;

use crate::constants::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    dotenvy::dotenv().ok();
});

/// Configuración global leída una sola vez por proceso.
pub static CONFIG: Lazy<DispatchConfig> = Lazy::new(DispatchConfig::from_env);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Modo de los archivos exportados.
    pub file_mode: u32,
    /// Modo de los directorios creados bajo el directorio de salida.
    pub dir_mode: u32,
    /// Verificar registros de opciones contra el toolkit antes del primer job.
    pub verify_registries: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { file_mode: DEFAULT_FILE_MODE,
               dir_mode: DEFAULT_DIR_MODE,
               verify_registries: false }
    }
}

impl DispatchConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        let file_mode = octal_var("QP_OUTPUT_FILE_MODE").unwrap_or(defaults.file_mode);
        let dir_mode = octal_var("QP_OUTPUT_DIR_MODE").unwrap_or(defaults.dir_mode);
        let verify_registries = env::var("QP_VERIFY_REGISTRIES").map(|v| parse_flag(&v))
                                                               .unwrap_or(defaults.verify_registries);
        Self { file_mode,
               dir_mode,
               verify_registries }
    }
}

fn octal_var(name: &str) -> Option<u32> {
    let raw = env::var(name).ok()?;
    match u32::from_str_radix(raw.trim().trim_start_matches("0o"), 8) {
        Ok(mode) => Some(mode),
        Err(_) => {
            log::warn!("{name}='{raw}' is not an octal mode, using the default");
            None
        }
    }
}

fn parse_flag(raw: &str) -> bool { matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on") }
