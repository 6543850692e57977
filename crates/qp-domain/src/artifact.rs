//! `ToolkitArtifact`: unión etiquetada de los formatos nativos.
//!
//! El trait `NativeArtifact` permite pasar de la unión al tipo concreto (y
//! viceversa) verificando el tipo semántico en runtime.

use std::path::Path;

use crate::alpha_vector::AlphaVector;
use crate::distance_matrix::DistanceMatrix;
use crate::errors::DomainError;
use crate::feature_table::FeatureTable;
use crate::ordination::OrdinationResults;
use crate::phylogeny::Phylogeny;
use crate::semantic::SemanticType;
use crate::taxonomy::Taxonomy;
use crate::visualization::Visualization;

#[derive(Debug, Clone, PartialEq)]
pub enum ToolkitArtifact {
    FeatureTable(FeatureTable),
    Phylogeny(Phylogeny),
    DistanceMatrix(DistanceMatrix),
    AlphaDiversity(AlphaVector),
    PCoAResults(OrdinationResults),
    Taxonomy(Taxonomy),
    Visualization(Visualization),
}

impl ToolkitArtifact {
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            ToolkitArtifact::FeatureTable(_) => SemanticType::FeatureTable,
            ToolkitArtifact::Phylogeny(_) => SemanticType::Phylogeny,
            ToolkitArtifact::DistanceMatrix(_) => SemanticType::DistanceMatrix,
            ToolkitArtifact::AlphaDiversity(_) => SemanticType::AlphaDiversity,
            ToolkitArtifact::PCoAResults(_) => SemanticType::PCoAResults,
            ToolkitArtifact::Taxonomy(_) => SemanticType::Taxonomy,
            ToolkitArtifact::Visualization(_) => SemanticType::Visualization,
        }
    }

    /// Lee un archivo en el formato canónico del tipo indicado.
    pub fn load(semantic_type: SemanticType, path: &Path) -> Result<Self, DomainError> {
        Ok(match semantic_type {
            SemanticType::FeatureTable => ToolkitArtifact::FeatureTable(FeatureTable::read(path)?),
            SemanticType::Phylogeny => ToolkitArtifact::Phylogeny(Phylogeny::read(path)?),
            SemanticType::DistanceMatrix => ToolkitArtifact::DistanceMatrix(DistanceMatrix::read(path)?),
            SemanticType::AlphaDiversity => ToolkitArtifact::AlphaDiversity(AlphaVector::read(path)?),
            SemanticType::PCoAResults => ToolkitArtifact::PCoAResults(OrdinationResults::read(path)?),
            SemanticType::Taxonomy => ToolkitArtifact::Taxonomy(Taxonomy::read(path)?),
            SemanticType::Visualization => ToolkitArtifact::Visualization(Visualization::read(path)?),
        })
    }

    pub fn write_to(&self, path: &Path) -> Result<(), DomainError> {
        match self {
            ToolkitArtifact::FeatureTable(a) => a.write(path),
            ToolkitArtifact::Phylogeny(a) => a.write(path),
            ToolkitArtifact::DistanceMatrix(a) => a.write(path),
            ToolkitArtifact::AlphaDiversity(a) => a.write(path),
            ToolkitArtifact::PCoAResults(a) => a.write(path),
            ToolkitArtifact::Taxonomy(a) => a.write(path),
            ToolkitArtifact::Visualization(a) => a.write(path),
        }
    }
}

/// Tipo nativo asociado a un `SemanticType` concreto.
pub trait NativeArtifact: Sized {
    const SEMANTIC_TYPE: SemanticType;

    fn into_artifact(self) -> ToolkitArtifact;

    fn from_artifact_ref(artifact: &ToolkitArtifact) -> Option<&Self>;

    /// Referencia tipada o `KindMismatch`.
    fn expect_from(artifact: &ToolkitArtifact) -> Result<&Self, DomainError> {
        Self::from_artifact_ref(artifact).ok_or(DomainError::KindMismatch { expected: Self::SEMANTIC_TYPE,
                                                                            found: artifact.semantic_type() })
    }
}

macro_rules! native_artifact {
    ($ty:ty, $variant:ident) => {
        impl NativeArtifact for $ty {
            const SEMANTIC_TYPE: SemanticType = SemanticType::$variant;

            fn into_artifact(self) -> ToolkitArtifact { ToolkitArtifact::$variant(self) }

            fn from_artifact_ref(artifact: &ToolkitArtifact) -> Option<&Self> {
                match artifact {
                    ToolkitArtifact::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for ToolkitArtifact {
            fn from(value: $ty) -> Self { ToolkitArtifact::$variant(value) }
        }
    };
}

native_artifact!(FeatureTable, FeatureTable);
native_artifact!(Phylogeny, Phylogeny);
native_artifact!(DistanceMatrix, DistanceMatrix);
native_artifact!(AlphaVector, AlphaDiversity);
native_artifact!(OrdinationResults, PCoAResults);
native_artifact!(Taxonomy, Taxonomy);
native_artifact!(Visualization, Visualization);
