//! Caché de firmas: cada firma se pide al toolkit una sola vez por proceso
//! y luego se sirve de memoria sin mutarla.

use std::path::Path;

use dashmap::DashMap;
use qp_domain::FeatureTable;

use super::{ActionOutputs, Toolkit};
use crate::errors::ToolkitError;
use crate::params::ResolvedParams;
use crate::signature::ActionSignature;

pub struct SignatureCache<T: Toolkit> {
    inner: T,
    signatures: DashMap<(String, String), ActionSignature>,
}

impl<T: Toolkit> SignatureCache<T> {
    pub fn new(inner: T) -> Self {
        Self { inner,
               signatures: DashMap::new() }
    }

    pub fn inner(&self) -> &T { &self.inner }

    pub fn cached(&self) -> usize { self.signatures.len() }
}

impl<T: Toolkit> Toolkit for SignatureCache<T> {
    fn signature(&self, plugin: &str, action: &str) -> Result<ActionSignature, ToolkitError> {
        let key = (plugin.to_string(), action.to_string());
        if let Some(sig) = self.signatures.get(&key) {
            return Ok(sig.clone());
        }
        let sig = self.inner.signature(plugin, action)?;
        self.signatures.insert(key, sig.clone());
        Ok(sig)
    }

    fn invoke(&self, plugin: &str, action: &str, params: &ResolvedParams) -> Result<ActionOutputs, ToolkitError> {
        self.inner.invoke(plugin, action, params)
    }

    fn decode_hdf5_table(&self, path: &Path) -> Result<FeatureTable, ToolkitError> { self.inner.decode_hdf5_table(path) }
}
