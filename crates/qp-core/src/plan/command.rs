//! Comandos soportados. Cada variante fija su paso (nombre del directorio
//! de salida) y su plan de etapas; el `match` exhaustivo garantiza que
//! ningún comando quede sin plan.

use std::fmt;

use super::{Export, Plan, Source, Stage};
use crate::errors::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Rarefy,
    FilterSamples,
    FilterFeatures,
    Alpha,
    AlphaPhylogenetic,
    Beta,
    BetaPhylogenetic,
    AlphaRarefaction,
    AlphaCorrelation,
    BetaCorrelation,
    BetaGroupSignificance,
    Pcoa,
    EmperorPlot,
    TaxaBarplot,
    SplitTable,
}

impl Command {
    pub const ALL: [Command; 15] = [Command::Rarefy,
                                    Command::FilterSamples,
                                    Command::FilterFeatures,
                                    Command::Alpha,
                                    Command::AlphaPhylogenetic,
                                    Command::Beta,
                                    Command::BetaPhylogenetic,
                                    Command::AlphaRarefaction,
                                    Command::AlphaCorrelation,
                                    Command::BetaCorrelation,
                                    Command::BetaGroupSignificance,
                                    Command::Pcoa,
                                    Command::EmperorPlot,
                                    Command::TaxaBarplot,
                                    Command::SplitTable];

    /// (plugin, método) tal como llegan en el ruteo del job.
    pub fn route(self) -> (&'static str, &'static str) {
        match self {
            Command::Rarefy => ("feature-table", "rarefy"),
            Command::FilterSamples => ("feature-table", "filter_samples"),
            Command::FilterFeatures => ("feature-table", "filter_features"),
            Command::Alpha => ("diversity", "alpha"),
            Command::AlphaPhylogenetic => ("diversity", "alpha_phylogenetic"),
            Command::Beta => ("diversity", "beta"),
            Command::BetaPhylogenetic => ("diversity", "beta_phylogenetic"),
            Command::AlphaRarefaction => ("diversity", "alpha_rarefaction"),
            Command::AlphaCorrelation => ("diversity", "alpha_correlation"),
            Command::BetaCorrelation => ("diversity", "beta_correlation"),
            Command::BetaGroupSignificance => ("diversity", "beta_group_significance"),
            Command::Pcoa => ("diversity", "pcoa"),
            Command::EmperorPlot => ("emperor", "plot"),
            Command::TaxaBarplot => ("taxa", "barplot"),
            Command::SplitTable => ("sample-classifier", "split_table"),
        }
    }

    pub fn from_route(plugin: &str, method: &str) -> Result<Self, DispatchError> {
        Self::ALL.into_iter()
                 .find(|c| c.route() == (plugin, method))
                 .ok_or_else(|| DispatchError::UnknownCommand { plugin: plugin.to_string(),
                                                                method: method.to_string() })
    }

    /// Nombre del paso: directorio bajo el que se exportan los outputs.
    pub fn step_name(self) -> &'static str { self.route().1 }

    pub fn plan(self) -> Plan {
        let (plugin, action) = self.route();
        let single = |export: Export| Plan::single(Stage::new(plugin, action).export(export));
        match self {
            Command::Rarefy => single(Export::new("rarefied_table").restoring_metadata("table")),
            Command::FilterSamples | Command::FilterFeatures => {
                single(Export::new("filtered_table").restoring_metadata("table").rejecting_empty())
            }
            Command::Alpha | Command::AlphaPhylogenetic => single(Export::new("alpha_diversity")),
            Command::Beta | Command::BetaPhylogenetic => single(Export::new("distance_matrix")),
            Command::AlphaRarefaction
            | Command::AlphaCorrelation
            | Command::BetaGroupSignificance
            | Command::EmperorPlot
            | Command::TaxaBarplot => single(Export::new("visualization")),
            Command::Pcoa => single(Export::new("pcoa")),
            Command::SplitTable => Plan::single(Stage::new(plugin, action)
                .export(Export::new("training_table").restoring_metadata("table"))
                .export(Export::new("test_table").restoring_metadata("table"))),
            // Distancias desde la columna de metadata, luego Mantel contra la
            // matriz del job.
            Command::BetaCorrelation => {
                let distances = Stage::new("metadata", "distance_matrix")
                    .export(Export::new("distance_matrix").as_slot("metadata_distance_matrix"));
                let mantel = Stage::new("diversity", "mantel")
                    .bind("dm1", Source::Job("distance_matrix"))
                    .bind("dm2", Source::Output { stage: 0, output: "distance_matrix" })
                    .export(Export::new("visualization").as_slot("mantel_scatter_visualization"));
                Plan { stages: vec![distances, mantel] }
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (plugin, method) = self.route();
        write!(f, "{plugin}.{method}")
    }
}
