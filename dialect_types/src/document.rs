//! Document and language identity

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Identity of an open document (its path as the host reports it)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a document ID from a path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Language identifier the host assigns to a document (`yaml`, `plaintext`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageId(String);

impl LanguageId {
    /// Creates a language ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The language of the state-machine dialect unless configured otherwise
    pub fn yaml() -> Self {
        Self::new("yaml")
    }

    /// Fallback for documents without a recognised extension
    pub fn plaintext() -> Self {
        Self::new("plaintext")
    }

    /// Derives a language from a path's extension
    pub fn from_path(path: &str) -> Self {
        match path.rsplit_once('.').map(|(_, ext)| ext) {
            Some("yaml") | Some("yml") => Self::yaml(),
            _ => Self::plaintext(),
        }
    }

    /// Returns the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
