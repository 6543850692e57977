//! Constantes globales del dispatcher.

/// Versión del motor; entra en los fingerprints de cada paso.
pub const ENGINE_VERSION: &str = "qp-dispatch-0.1";

/// Permisos por defecto de archivos y directorios exportados (octal).
pub const DEFAULT_FILE_MODE: u32 = 0o664;
pub const DEFAULT_DIR_MODE: u32 = 0o775;
