//! Error types surfaced by the simulation core.
//!
//! Numeric state is clamped rather than rejected, so the only failures are
//! lookups by name, configuration problems and snapshot IO.

use thiserror::Error;

/// Failure to resolve a genome category, trait or hormone by name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenomeError {
    /// No category with this name exists.
    #[error("category '{0}' not found in genome")]
    UnknownCategory(String),
    /// No trait with this name exists.
    #[error("trait '{0}' not found in genome")]
    UnknownTrait(String),
    /// No hormone with this name exists.
    #[error("hormone '{0}' not found in genome")]
    UnknownHormone(String),
    /// The trait exists but belongs to another category.
    #[error("trait '{trait_name}' does not belong to category '{category}'")]
    TraitNotInCategory {
        /// Requested category.
        category: String,
        /// Requested trait.
        trait_name: String,
    },
}

/// Invalid or unreadable simulation parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for [`super::params::Params`].
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A parameter is out of its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Failure while saving or restoring a population snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed.
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    /// The snapshot is not valid JSON.
    #[error("snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The parameters stored in the snapshot are invalid.
    #[error("snapshot parameters rejected: {0}")]
    Config(#[from] ConfigError),
    /// A stored controller does not have the fixed 8-16-2 shape.
    #[error("snapshot brain for entity {id} has shape {actual:?}, expected {expected:?}")]
    BrainShape {
        /// Entity the brain belongs to.
        id: usize,
        /// Shape found in the file.
        actual: Vec<usize>,
        /// Shape required by the controller.
        expected: Vec<usize>,
    },
}
