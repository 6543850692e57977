//! Costura con el toolkit: introspección de firmas e invocación de acciones.
//!
//! Las implementaciones devuelven errores tipados (`ToolkitError` con su
//! `kind`), nunca pánicos ni strings sueltos.
pub mod cache;

use std::path::Path;

use indexmap::IndexMap;
use qp_domain::{FeatureTable, ToolkitArtifact};

use crate::errors::ToolkitError;
use crate::params::ResolvedParams;
use crate::signature::ActionSignature;

pub use cache::SignatureCache;

/// Outputs de una acción por nombre de slot, en el orden declarado.
pub type ActionOutputs = IndexMap<String, ToolkitArtifact>;

pub trait Toolkit {
    /// Firma de `plugin.action`. Una acción inexistente es un error
    /// `Preflight`.
    fn signature(&self, plugin: &str, action: &str) -> Result<ActionSignature, ToolkitError>;

    fn invoke(&self, plugin: &str, action: &str, params: &ResolvedParams) -> Result<ActionOutputs, ToolkitError>;

    /// Decodifica una tabla BIOM 2.x (HDF5). Solo los toolkits con acceso a
    /// una librería HDF5 la implementan.
    fn decode_hdf5_table(&self, path: &Path) -> Result<FeatureTable, ToolkitError> {
        Err(ToolkitError::preflight(format!("{} is an HDF5 BIOM table and this toolkit cannot decode it", path.display())))
    }
}

impl<T: Toolkit + ?Sized> Toolkit for &T {
    fn signature(&self, plugin: &str, action: &str) -> Result<ActionSignature, ToolkitError> {
        (**self).signature(plugin, action)
    }

    fn invoke(&self, plugin: &str, action: &str, params: &ResolvedParams) -> Result<ActionOutputs, ToolkitError> {
        (**self).invoke(plugin, action, params)
    }

    fn decode_hdf5_table(&self, path: &Path) -> Result<FeatureTable, ToolkitError> { (**self).decode_hdf5_table(path) }
}
