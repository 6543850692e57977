//! Tipos semánticos soportados por el puente de artifacts.
//!
//! Un `SemanticType` fija tres cosas a la vez: el nombre que usa el toolkit,
//! la etiqueta de tipo con la que el cliente registra el artifact y el
//! archivo canónico que se escribe al exportar.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SemanticType {
    FeatureTable,
    Phylogeny,
    DistanceMatrix,
    AlphaDiversity,
    PCoAResults,
    Taxonomy,
    Visualization,
}

impl SemanticType {
    pub const ALL: [SemanticType; 7] = [SemanticType::FeatureTable,
                                        SemanticType::Phylogeny,
                                        SemanticType::DistanceMatrix,
                                        SemanticType::AlphaDiversity,
                                        SemanticType::PCoAResults,
                                        SemanticType::Taxonomy,
                                        SemanticType::Visualization];

    /// Nombre del tipo en el sistema de tipos del toolkit.
    pub fn toolkit_name(&self) -> &'static str {
        match self {
            SemanticType::FeatureTable => "FeatureTable[Frequency]",
            SemanticType::Phylogeny => "Phylogeny[Rooted]",
            SemanticType::DistanceMatrix => "DistanceMatrix",
            SemanticType::AlphaDiversity => "SampleData[AlphaDiversity]",
            SemanticType::PCoAResults => "PCoAResults",
            SemanticType::Taxonomy => "FeatureData[Taxonomy]",
            SemanticType::Visualization => "Visualization",
        }
    }

    /// Etiqueta con la que el cliente almacena artifacts de este tipo.
    /// `None` para tipos que nunca se registran en el cliente.
    pub fn client_type(&self) -> Option<&'static str> {
        match self {
            SemanticType::FeatureTable => Some("BIOM"),
            SemanticType::DistanceMatrix => Some("distance_matrix"),
            SemanticType::AlphaDiversity => Some("alpha_vector"),
            SemanticType::PCoAResults => Some("ordination_results"),
            SemanticType::Visualization => Some("q2_visualization"),
            SemanticType::Phylogeny | SemanticType::Taxonomy => None,
        }
    }

    pub fn from_client_type(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.client_type() == Some(tag))
    }

    /// Etiqueta de formato del archivo exportado.
    pub fn format_tag(&self) -> &'static str {
        match self {
            SemanticType::FeatureTable => "biom",
            SemanticType::Visualization => "qzv",
            _ => "plain_text",
        }
    }

    pub fn canonical_filename(&self) -> &'static str {
        match self {
            SemanticType::FeatureTable => "feature-table.biom",
            SemanticType::Phylogeny => "tree.nwk",
            SemanticType::DistanceMatrix => "distance-matrix.tsv",
            SemanticType::AlphaDiversity => "alpha-diversity.tsv",
            SemanticType::PCoAResults => "ordination.txt",
            SemanticType::Taxonomy => "taxonomy.tsv",
            SemanticType::Visualization => "visualization.qzv",
        }
    }

    pub fn is_visualization(&self) -> bool { matches!(self, SemanticType::Visualization) }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.toolkit_name()) }
}
