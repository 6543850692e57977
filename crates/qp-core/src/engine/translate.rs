//! Traducción pura de `DispatchError` a mensaje para el usuario.

use crate::errors::{DispatchError, ToolkitErrorKind};

/// Fallas del toolkit durante la ejecución -> "Error running: <texto>";
/// fallas previas a la ejecución y campo de metadata vacío -> "Error: ...";
/// el resto se reporta con su descripción directa.
pub fn translate(err: &DispatchError) -> String {
    match err {
        DispatchError::Toolkit(e) => match e.kind {
            ToolkitErrorKind::Execution => format!("Error running: {}", e.message),
            ToolkitErrorKind::Preflight => format!("Error: {}", e.message),
        },
        DispatchError::MissingMetadataField(_) => format!("Error: {err}"),
        other => other.to_string(),
    }
}
