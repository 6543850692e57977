//! Árbol filogenético enraizado en Newick.

use std::fs;
use std::path::Path;

use crate::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phylogeny {
    newick: String,
}

impl Phylogeny {
    pub fn new(newick: impl Into<String>) -> Result<Self, DomainError> {
        let newick = newick.into().trim().to_string();
        if !newick.ends_with(';') {
            return Err(DomainError::format("newick", "tree must end with ';'"));
        }
        let mut depth: i64 = 0;
        for ch in newick.chars() {
            match ch {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return Err(DomainError::format("newick", "unbalanced parentheses"));
            }
        }
        if depth != 0 {
            return Err(DomainError::format("newick", "unbalanced parentheses"));
        }
        Ok(Self { newick })
    }

    pub fn as_str(&self) -> &str { &self.newick }

    pub fn read(path: &Path) -> Result<Self, DomainError> { Self::new(fs::read_to_string(path)?) }

    pub fn write(&self, path: &Path) -> Result<(), DomainError> {
        fs::write(path, format!("{}\n", self.newick))?;
        Ok(())
    }
}
