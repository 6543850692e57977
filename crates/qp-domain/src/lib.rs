//! qp-domain: formatos nativos de los artifacts que cruzan el puente entre
//! el cliente de workflows y el toolkit.
//!
//! Cada tipo sabe leerse y escribirse en su formato canónico en disco; la
//! selección de tipo se hace vía `SemanticType`.
pub mod alpha_vector;
pub mod artifact;
pub mod distance_matrix;
pub mod errors;
pub mod feature_table;
pub mod metadata;
pub mod ordination;
pub mod phylogeny;
pub mod semantic;
pub mod taxonomy;
mod tsv;
pub mod visualization;

pub use alpha_vector::AlphaVector;
pub use artifact::{NativeArtifact, ToolkitArtifact};
pub use distance_matrix::DistanceMatrix;
pub use errors::DomainError;
pub use feature_table::{is_hdf5_file, Axis, FeatureTable};
pub use metadata::{MetadataColumn, SampleMetadata};
pub use ordination::OrdinationResults;
pub use phylogeny::Phylogeny;
pub use semantic::SemanticType;
pub use taxonomy::Taxonomy;
pub use visualization::Visualization;
