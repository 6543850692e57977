//! Registros intercambiados con el cliente y la petición de job.
pub mod artifact;
pub mod job;

pub use artifact::{ArtifactFile, ArtifactRecord, ArtifactResult, NewArtifact};
pub use job::JobRequest;
