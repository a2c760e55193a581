use std::fmt;

/// Errors surfaced by the orrery core.
///
/// An empty selection is not an error: lookups and hit tests return `None`.
#[derive(Debug)]
pub enum OrreryError {
    /// Catalog or config JSON failed to parse.
    Catalog(serde_json::Error),
    /// Catalog parsed but breaks a data-model invariant.
    InvalidCatalog(String),
    /// Host-supplied config is out of range.
    InvalidConfig(String),
    /// No system with this name in the registry.
    UnknownSystem(String),
    /// The host environment could not provide something the loop needs
    /// (drawing context, frame scheduling).
    Host(String),
}

impl fmt::Display for OrreryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrreryError::Catalog(e) => write!(f, "catalog parse error: {e}"),
            OrreryError::InvalidCatalog(msg) => write!(f, "invalid catalog: {msg}"),
            OrreryError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            OrreryError::UnknownSystem(name) => write!(f, "unknown system '{name}'"),
            OrreryError::Host(msg) => write!(f, "host precondition failed: {msg}"),
        }
    }
}

impl std::error::Error for OrreryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrreryError::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for OrreryError {
    fn from(e: serde_json::Error) -> Self {
        OrreryError::Catalog(e)
    }
}

pub type Result<T> = std::result::Result<T, OrreryError>;
