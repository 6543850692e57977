//! qp-dispatch
//!
//! Adaptador de despacho de jobs entre el cliente de workflows y el toolkit:
//! - `dispatch_job` es el punto de entrada que llama el runner externo.
//! - `register_outputs` da de alta en el cliente los artifacts producidos.
//!
//! Los tipos y módulos de `qp-core` se re-exportan tal cual; `qp_domain`
//! queda accesible para construir artifacts y fixtures.

use std::path::Path;

pub use qp_core::{bridge, client, config, engine, errors, event, hashing, model, params, plan, postprocess, registry, signature,
                  toolkit};
pub use qp_core::{ActionOutputs, ActionSignature, ArtifactRecord, ArtifactResult, Client, ClientError, Command, DispatchConfig,
                  DispatchError, DispatchEvent, DispatchEventKind, DispatchOutcome, Dispatcher, InMemoryClient, InMemoryJournal,
                  JobParameters, JobRequest, Journal, LiteralTable, LiteralValue, NewArtifact, ParamDefault, ParamSpec, ParamType,
                  ResolvedParams, ResolvedValue, RoutingTable, SignatureCache, Toolkit, ToolkitError, ToolkitErrorKind};
pub use qp_domain;
pub use qp_qiime2;

/// Despacha un job con la configuración del entorno. Nunca falla: los
/// errores vuelven como `DispatchOutcome` con `success == false`.
pub fn dispatch_job(client: &dyn Client, toolkit: &dyn Toolkit, job: &JobRequest, out_dir: &Path) -> DispatchOutcome {
    Dispatcher::new(client, toolkit).dispatch(job, out_dir)
}

/// Da de alta en el cliente, en orden, los artifacts de un despacho
/// exitoso y devuelve sus ids. Un despacho fallido no registra nada.
pub fn register_outputs(client: &dyn Client,
                        outcome: &DispatchOutcome,
                        analysis: u64,
                        data_type: &str)
                        -> Result<Vec<u64>, ClientError> {
    let Some(artifacts) = outcome.artifacts.as_deref() else { return Ok(Vec::new()) };
    artifacts.iter()
             .map(|result| client.create_artifact(NewArtifact::from_result(result, analysis, data_type)))
             .collect()
}
