//! `Qiime2Toolkit`: implementación de `Toolkit` sobre el intérprete de
//! Python embebido.

use std::ffi::CString;
use std::path::Path;
use std::sync::OnceLock;

use log::debug;
use pyo3::ffi::c_str;
use pyo3::prelude::*;
use pyo3::types::{PyModule, PyTuple};
use qp_core::{ActionOutputs, ActionSignature, ResolvedParams, Toolkit, ToolkitError};
use qp_domain::FeatureTable;

use crate::env::Qiime2Settings;
use crate::protocol;
use crate::{Qiime2Error, GLUE_SOURCE};

static GLUE_MODULE: OnceLock<Py<PyModule>> = OnceLock::new();

fn init_python() -> PyResult<()> {
    if GLUE_MODULE.get().is_some() {
        return Ok(());
    }
    Python::attach(|py| {
        let code = CString::new(GLUE_SOURCE)?;
        let module = PyModule::from_code(py, code.as_c_str(), c_str!("q2_bridge.py"), c_str!("q2_bridge"))?;
        GLUE_MODULE.set(module.unbind()).ok();
        Ok(())
    })
}

/// Llama `q2_bridge.<function>(*args)`; todas las funciones del módulo
/// reciben strings y devuelven el sobre JSON como string.
fn call(function: &str, args: &[&str]) -> PyResult<String> {
    Python::attach(|py| {
        let module = GLUE_MODULE.get()
                                .map(|m| m.clone_ref(py))
                                .ok_or_else(|| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>("q2_bridge is not loaded"))?;
        let args = PyTuple::new(py, args.iter().copied())?;
        module.bind(py).getattr(function)?.call1(args)?.extract::<String>()
    })
}

pub struct Qiime2Toolkit {
    settings: Qiime2Settings,
}

impl Qiime2Toolkit {
    /// Carga el módulo puente (una vez por proceso).
    pub fn init(settings: Qiime2Settings) -> Result<Self, Qiime2Error> {
        init_python().map_err(|e| Qiime2Error::Init(e.to_string()))?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &Qiime2Settings { &self.settings }
}

impl Toolkit for Qiime2Toolkit {
    fn signature(&self, plugin: &str, action: &str) -> Result<ActionSignature, ToolkitError> {
        let raw = call("signature", &[plugin, action]).map_err(|e| ToolkitError::preflight(e.to_string()))?;
        protocol::decode_signature(&raw)
    }

    fn invoke(&self, plugin: &str, action: &str, params: &ResolvedParams) -> Result<ActionOutputs, ToolkitError> {
        let workdir = tempfile::Builder::new().prefix("qp-qiime2-")
                                              .tempdir_in(&self.settings.workdir)
                                              .map_err(|e| ToolkitError::preflight(format!("could not create a work directory: {e}")))?;
        let request = protocol::encode_params(params, workdir.path())?.to_string();
        let dir = workdir.path().to_string_lossy().into_owned();
        debug!("{plugin}.{action}: invoking in {dir}");
        let raw = call("invoke", &[plugin, action, &request, &dir]).map_err(|e| ToolkitError::execution(e.to_string()))?;
        protocol::decode_outputs(&raw)
    }

    fn decode_hdf5_table(&self, path: &Path) -> Result<FeatureTable, ToolkitError> {
        let path = path.to_string_lossy().into_owned();
        debug!("decoding HDF5 table {path}");
        let raw = call("decode_table", &[path.as_str()]).map_err(|e| ToolkitError::preflight(e.to_string()))?;
        protocol::decode_table(&raw)
    }
}
