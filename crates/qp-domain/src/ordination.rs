//! Resultados de ordenación (PCoA). El contenido se trata como texto opaco
//! en el formato de ordenación del toolkit; solo se valida la cabecera.

use std::fs;
use std::path::Path;

use crate::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinationResults {
    text: String,
}

impl OrdinationResults {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if !text.trim_start().starts_with("Eigvals") {
            return Err(DomainError::format("ordination", "missing 'Eigvals' section"));
        }
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str { &self.text }

    pub fn read(path: &Path) -> Result<Self, DomainError> { Self::new(fs::read_to_string(path)?) }

    pub fn write(&self, path: &Path) -> Result<(), DomainError> {
        fs::write(path, &self.text)?;
        Ok(())
    }
}
