//! Post-proceso de outputs antes del export: restauración de metadata de
//! la tabla original y rechazo de tablas vacías.

use log::debug;
use qp_domain::{FeatureTable, NativeArtifact, ToolkitArtifact};

use crate::errors::DispatchError;
use crate::params::ResolvedParams;
use crate::plan::Export;

pub fn apply(export: &Export, artifact: ToolkitArtifact, params: &ResolvedParams) -> Result<ToolkitArtifact, DispatchError> {
    let mut table = match artifact {
        ToolkitArtifact::FeatureTable(table) => table,
        other => return Ok(other),
    };

    if export.post.reject_empty && table.is_empty() {
        return Err(DispatchError::EmptyTable);
    }
    if let Some(param) = export.post.restore_metadata_from {
        let source = params.get(param)
                           .and_then(|v| v.as_artifact())
                           .and_then(FeatureTable::from_artifact_ref);
        match source {
            Some(source) => {
                let touched = table.restore_metadata_from(source);
                debug!("restored metadata on {touched} ids of '{}' from '{param}'", export.slot);
            }
            None => debug!("'{param}' is not a feature table; '{}' keeps its own metadata", export.slot),
        }
    }
    Ok(ToolkitArtifact::FeatureTable(table))
}
