//! Resultado visual empaquetado (.qzv). Se transporta como bytes opacos.

use std::fs;
use std::path::Path;

use crate::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visualization {
    bytes: Vec<u8>,
}

impl Visualization {
    pub fn new(bytes: Vec<u8>) -> Self { Self { bytes } }

    pub fn bytes(&self) -> &[u8] { &self.bytes }

    pub fn read(path: &Path) -> Result<Self, DomainError> { Ok(Self::new(fs::read(path)?)) }

    pub fn write(&self, path: &Path) -> Result<(), DomainError> {
        fs::write(path, &self.bytes)?;
        Ok(())
    }
}
