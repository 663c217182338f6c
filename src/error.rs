//! Error types for planet mesh generation

use std::fmt;

/// Errors that can occur while assembling planet parameters
///
/// Mesh generation itself is total; only configuration can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanetError {
    /// Configuration validation failed
    InvalidConfig(String),
}

impl fmt::Display for PlanetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanetError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for PlanetError {}

/// Result type alias for planet operations
pub type Result<T> = std::result::Result<T, PlanetError>;
