use serde::{Deserialize, Serialize};

use crate::params::JobParameters;

/// Petición de job, inmutable una vez que empieza el despacho.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    pub job_id: String,
    pub command: String,
    pub parameters: JobParameters,
}

impl JobRequest {
    pub fn new(job_id: impl Into<String>, command: impl Into<String>, parameters: JobParameters) -> Self {
        Self { job_id: job_id.into(),
               command: command.into(),
               parameters }
    }
}
