//! `Dispatcher`: ejecuta un job de punta a punta.
//!
//! Flujo: ruteo -> comando -> plan -> firmas -> resolución -> por cada
//! etapa (completar bindings de outputs previos, invocar, post-procesar,
//! exportar) -> resultados en orden de export. Cualquier falla aborta el
//! despacho sin devolver resultados parciales.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde_json::{json, Value};
use uuid::Uuid;

use super::outcome::DispatchOutcome;
use super::translate::translate;
use crate::bridge::ArtifactBridge;
use crate::client::Client;
use crate::config::{DispatchConfig, CONFIG};
use crate::constants::ENGINE_VERSION;
use crate::errors::{DispatchError, ToolkitError};
use crate::event::{DispatchEvent, DispatchEventKind, InMemoryJournal, Journal};
use crate::hashing::{hash_bytes, hash_value};
use crate::model::{ArtifactResult, JobRequest};
use crate::params::{summarize, ParameterResolver, ResolvedParams, ResolvedValue};
use crate::plan::{Command, DispatchState, Source, Stage};
use crate::postprocess;
use crate::registry;
use crate::toolkit::{ActionOutputs, Toolkit};

pub struct Dispatcher<'a, J = InMemoryJournal>
    where J: Journal
{
    client: &'a dyn Client,
    toolkit: &'a dyn Toolkit,
    config: DispatchConfig,
    journal: J,
    registries_checked: bool,
    last_run_id: Option<Uuid>,
}

impl<'a> Dispatcher<'a, InMemoryJournal> {
    /// Dispatcher con la configuración del entorno y journal en memoria.
    pub fn new(client: &'a dyn Client, toolkit: &'a dyn Toolkit) -> Self {
        Self { client,
               toolkit,
               config: CONFIG.clone(),
               journal: InMemoryJournal::default(),
               registries_checked: false,
               last_run_id: None }
    }
}

impl<'a, J> Dispatcher<'a, J>
    where J: Journal
{
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_journal<K: Journal>(self, journal: K) -> Dispatcher<'a, K> {
        Dispatcher { client: self.client,
                     toolkit: self.toolkit,
                     config: self.config,
                     journal,
                     registries_checked: self.registries_checked,
                     last_run_id: self.last_run_id }
    }

    pub fn config(&self) -> &DispatchConfig { &self.config }

    pub fn journal(&self) -> &J { &self.journal }

    pub fn last_run_id(&self) -> Option<Uuid> { self.last_run_id }

    /// Eventos del último despacho (vacío si no hubo ninguno).
    pub fn last_events(&self) -> Vec<DispatchEvent> {
        self.last_run_id.map(|id| self.journal.list(id)).unwrap_or_default()
    }

    /// Despacha un job y devuelve el resultado uniforme; nunca falla.
    pub fn dispatch(&mut self, job: &JobRequest, out_dir: &Path) -> DispatchOutcome {
        DispatchOutcome::from(self.try_dispatch(job, out_dir))
    }

    pub fn try_dispatch(&mut self, job: &JobRequest, out_dir: &Path) -> Result<Vec<ArtifactResult>, DispatchError> {
        let run_id = Uuid::new_v4();
        self.last_run_id = Some(run_id);
        info!("job {} ({}): dispatch {run_id} started", job.job_id, job.command);
        match self.run(run_id, job, out_dir) {
            Ok((results, dispatch_fingerprint)) => {
                info!("job {}: {} artifact(s), fingerprint {dispatch_fingerprint}", job.job_id, results.len());
                self.journal
                    .append_kind(run_id, DispatchEventKind::DispatchCompleted { dispatch_fingerprint });
                Ok(results)
            }
            Err(err) => {
                let message = translate(&err);
                warn!("job {} failed: {message}", job.job_id);
                self.journal.append_kind(run_id, DispatchEventKind::DispatchFailed { message });
                Err(err)
            }
        }
    }

    fn run(&mut self, run_id: Uuid, job: &JobRequest, out_dir: &Path) -> Result<(Vec<ArtifactResult>, String), DispatchError> {
        let routing = &job.parameters.routing;
        let command = Command::from_route(&routing.plugin, &routing.method)?;
        self.ensure_registries()?;

        let plan = command.plan();
        let signatures = plan.stages
                             .iter()
                             .map(|s| self.toolkit.signature(s.plugin, s.action))
                             .collect::<Result<Vec<_>, _>>()?;

        let bridge = ArtifactBridge::new(self.client, &self.config).with_decoder(self.toolkit);
        let staged = ParameterResolver::new(&job.parameters, &bridge).resolve_plan(&plan, &signatures)?;

        let mut state = DispatchState::Pending;
        advance(&mut state, DispatchState::ParametersResolved, plan.len())?;
        let params_summary = Value::Array(staged.iter().map(summarize).collect());
        self.journal.append_kind(run_id,
                                 DispatchEventKind::ParametersResolved { command: command.to_string(),
                                                                         stage_count: plan.len(),
                                                                         params_hash: hash_value(&params_summary) });

        let step = command.step_name();
        let mut produced: Vec<ActionOutputs> = Vec::with_capacity(plan.len());
        let mut results = Vec::new();
        let mut fingerprints = Vec::with_capacity(plan.len());
        for (index, (stage, mut params)) in plan.stages.iter().zip(staged).enumerate() {
            advance(&mut state, DispatchState::Executing(index), plan.len())?;
            let action = stage.key();
            self.journal.append_kind(run_id,
                                     DispatchEventKind::StepStarted { step_index: index,
                                                                      action: action.clone() });

            let outcome = fill_bindings(stage, &produced, &mut params).and_then(|()| {
                                                                             run_stage(self.toolkit, &bridge, stage, &params, out_dir, step)
                                                                         });
            let (outputs, exported) = match outcome {
                Ok(done) => done,
                Err(err) => {
                    self.journal.append_kind(run_id,
                                             DispatchEventKind::StepFailed { step_index: index,
                                                                             action,
                                                                             message: translate(&err) });
                    return Err(err);
                }
            };

            let output_hashes = exported.iter()
                                        .map(file_hashes)
                                        .collect::<Result<Vec<_>, _>>()?
                                        .concat();
            let fingerprint = hash_value(&json!({
                "engine_version": ENGINE_VERSION,
                "command": command.to_string(),
                "step_index": index,
                "params": summarize(&params),
                "output_hashes": output_hashes,
            }));
            debug!("{action}: fingerprint {fingerprint}");
            self.journal.append_kind(run_id,
                                     DispatchEventKind::StepFinished { step_index: index,
                                                                       action,
                                                                       outputs: output_hashes,
                                                                       fingerprint: fingerprint.clone() });
            advance(&mut state, DispatchState::StepComplete(index), plan.len())?;

            fingerprints.push(fingerprint);
            produced.push(outputs);
            results.extend(exported);
        }
        advance(&mut state, DispatchState::Complete, plan.len())?;

        let dispatch_fingerprint = hash_value(&json!({
            "engine_version": ENGINE_VERSION,
            "command": command.to_string(),
            "steps": fingerprints,
        }));
        Ok((results, dispatch_fingerprint))
    }

    /// Verifica (una vez por dispatcher) que los registros de opciones
    /// coincidan con el toolkit, si la configuración lo pide.
    fn ensure_registries(&mut self) -> Result<(), DispatchError> {
        if !self.config.verify_registries || self.registries_checked {
            return Ok(());
        }
        registry::verify_registries(self.toolkit).map_err(|mismatches| {
                                                      let detail: Vec<String> = mismatches.iter().map(ToString::to_string).collect();
                                                      DispatchError::RegistryMismatch(detail.join("; "))
                                                  })?;
        self.registries_checked = true;
        Ok(())
    }
}

fn advance(state: &mut DispatchState, next: DispatchState, stages: usize) -> Result<(), DispatchError> {
    if !state.can_transition_to(next, stages) {
        return Err(DispatchError::Internal(format!("invalid transition {state:?} -> {next:?}")));
    }
    *state = next;
    Ok(())
}

/// Completa los parámetros que vienen de outputs de etapas previas.
fn fill_bindings(stage: &Stage, produced: &[ActionOutputs], params: &mut ResolvedParams) -> Result<(), DispatchError> {
    for binding in &stage.bindings {
        let Source::Output { stage: from, output } = binding.source else { continue };
        let artifact = produced.get(from)
                               .and_then(|outputs| outputs.get(output))
                               .cloned()
                               .ok_or_else(|| {
                                   DispatchError::Internal(format!("{} needs output '{output}' of stage {from}, which was not produced", stage.key()))
                               })?;
        params.insert(binding.param.to_string(), ResolvedValue::Artifact(artifact));
    }
    Ok(())
}

fn run_stage(toolkit: &dyn Toolkit,
             bridge: &ArtifactBridge<'_>,
             stage: &Stage,
             params: &ResolvedParams,
             out_dir: &Path,
             step: &str)
             -> Result<(ActionOutputs, Vec<ArtifactResult>), DispatchError> {
    debug!("invoking {} with {}", stage.key(), summarize(params));
    let outputs = toolkit.invoke(stage.plugin, stage.action, params)?;
    let mut exported = Vec::with_capacity(stage.exports.len());
    for export in &stage.exports {
        let artifact = outputs.get(export.output).cloned().ok_or_else(|| {
                                                             ToolkitError::execution(format!("{} did not produce output '{}'", stage.key(), export.output))
                                                         })?;
        let artifact = postprocess::apply(export, artifact, params)?;
        exported.push(bridge.export(out_dir, step, export.slot, &artifact)?);
    }
    Ok((outputs, exported))
}

fn file_hashes(result: &ArtifactResult) -> Result<Vec<String>, DispatchError> {
    result.files
          .iter()
          .map(|(path, _)| {
              fs::read(path).map(|bytes| hash_bytes(&bytes))
                            .map_err(|e| DispatchError::Export { slot: result.output_name.clone(),
                                                                 source: e.into() })
          })
          .collect()
}
