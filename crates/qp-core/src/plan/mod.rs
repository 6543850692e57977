//! Planes de ejecución: cada `Command` se expande a una lista ordenada de
//! etapas (una acción del toolkit cada una) con sus bindings y exports.
//!
//! Un parámetro de etapa sin binding explícito toma el parámetro del job
//! con el mismo nombre. `Source::Output` conecta un output de una etapa
//! previa; esos parámetros los completa el dispatcher antes de invocar.
pub mod command;
pub mod status;

pub use command::Command;
pub use status::DispatchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Parámetro formal del job (ruteado desde una etiqueta).
    Job(&'static str),
    /// Output `output` de la etapa `stage` (índice previo).
    Output { stage: usize, output: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub param: &'static str,
    pub source: Source,
}

/// Post-proceso aplicado a un output antes de exportarlo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostProcess {
    /// Parámetro de la etapa con la tabla original de la que restaurar metadata.
    pub restore_metadata_from: Option<&'static str>,
    /// Rechazar tablas vacías.
    pub reject_empty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Export {
    pub output: &'static str,
    pub slot: &'static str,
    pub post: PostProcess,
}

impl Export {
    pub fn new(output: &'static str) -> Self {
        Self { output,
               slot: output,
               post: PostProcess::default() }
    }

    pub fn as_slot(mut self, slot: &'static str) -> Self {
        self.slot = slot;
        self
    }

    pub fn restoring_metadata(mut self, from: &'static str) -> Self {
        self.post.restore_metadata_from = Some(from);
        self
    }

    pub fn rejecting_empty(mut self) -> Self {
        self.post.reject_empty = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub plugin: &'static str,
    pub action: &'static str,
    pub bindings: Vec<Binding>,
    pub exports: Vec<Export>,
}

impl Stage {
    pub fn new(plugin: &'static str, action: &'static str) -> Self {
        Self { plugin,
               action,
               bindings: Vec::new(),
               exports: Vec::new() }
    }

    pub fn bind(mut self, param: &'static str, source: Source) -> Self {
        self.bindings.push(Binding { param, source });
        self
    }

    pub fn export(mut self, export: Export) -> Self {
        self.exports.push(export);
        self
    }

    /// De dónde sale el valor del parámetro `param` de esta etapa.
    pub fn source_for<'p>(&self, param: &'p str) -> SourceRef<'p> {
        match self.bindings.iter().find(|b| b.param == param) {
            Some(Binding { source: Source::Job(name), .. }) => SourceRef::Job(*name),
            Some(Binding { source: Source::Output { stage, output }, .. }) => SourceRef::Output { stage: *stage,
                                                                                                  output: *output },
            None => SourceRef::Job(param),
        }
    }

    pub fn key(&self) -> String { format!("{}.{}", self.plugin, self.action) }
}

/// `Source` resuelto para un parámetro concreto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRef<'p> {
    Job(&'p str),
    Output { stage: usize, output: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub stages: Vec<Stage>,
}

impl Plan {
    pub fn single(stage: Stage) -> Self { Self { stages: vec![stage] } }

    pub fn len(&self) -> usize { self.stages.len() }

    pub fn is_empty(&self) -> bool { self.stages.is_empty() }
}
