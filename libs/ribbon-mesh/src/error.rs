//! # Mesh Errors
//!
//! Error types for ribbon construction, merging, and upload.
//!
//! Guard conditions (inactive strand, sample below the movement threshold,
//! empty meshes during a merge scan) are not errors; they surface as
//! [`crate::ribbon::SkipReason`] or simply as zero merges.

use crate::mesh_set::MeshHandle;
use config::constants::ConfigError;
use thiserror::Error;

/// Errors that can occur while building, merging, or uploading meshes.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    /// Configuration rejected at construction
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Mesh has fewer than two cross-sections and cannot be uploaded
    #[error("Insufficient geometry: {vertices} vertices, {indices} indices (need at least 4 and 6)")]
    InsufficientGeometry { vertices: usize, indices: usize },

    /// Handle does not name a live mesh
    #[error("Unknown mesh handle: {0}")]
    UnknownHandle(MeshHandle),

    /// Too many vertices for u32 indexing
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },
}

impl MeshError {
    /// Creates an insufficient geometry error from buffer sizes.
    pub fn insufficient(vertices: usize, indices: usize) -> Self {
        Self::InsufficientGeometry { vertices, indices }
    }
}
