//! qp-core: capa de despacho entre el cliente de workflows y el toolkit.
pub mod bridge;
pub mod client;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod params;
pub mod plan;
pub mod postprocess;
pub mod registry;
pub mod signature;
pub mod toolkit;

pub use bridge::{ArtifactBridge, ImportedArtifact};
pub use client::{Client, InMemoryClient, RawSampleMetadata};
pub use config::{DispatchConfig, CONFIG};
pub use engine::{translate, DispatchOutcome, Dispatcher};
pub use errors::{ClientError, DispatchError, ToolkitError, ToolkitErrorKind};
pub use event::{DispatchEvent, DispatchEventKind, InMemoryJournal, Journal};
pub use model::{ArtifactFile, ArtifactRecord, ArtifactResult, JobRequest, NewArtifact};
pub use params::{JobParameters, LiteralTable, LiteralValue, ParamRoute, ResolvedParams, ResolvedValue, RoutingTable};
pub use plan::{Command, DispatchState, Plan};
pub use registry::Registry;
pub use signature::{ActionSignature, OutputSpec, ParamDefault, ParamSpec, ParamType};
pub use toolkit::{ActionOutputs, SignatureCache, Toolkit};
