//! # Mesh Merging
//!
//! Greedy proximity merge over a [`MeshSet`].
//!
//! ## Algorithm Overview
//!
//! 1. Walk meshes from newest to oldest
//! 2. For each source, scan older meshes oldest-first for the first one
//!    with a vertex strictly within tolerance
//! 3. Fold the source into that target (target's local frame), reorder
//!    vertices by first use, drop the source
//! 4. At most one target per source per pass; compact the set at the end
//!
//! Worst case is O(n² · v²) over n meshes of v vertices. Meshes are few and
//! the pass runs as maintenance, not per frame; large vertex products switch
//! to a hash grid (see [`vertices_within`]).

mod proximity;
mod vertex_grid;

#[cfg(test)]
mod tests;

pub use proximity::{should_merge, vertices_within};
pub use vertex_grid::VertexGrid;

use config::constants::{ConfigError, RibbonConfig};
use tracing::{debug, warn};

use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::mesh_set::{MeshHandle, MeshSet, RibbonMesh};

/// One absorption performed by a merge pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRecord {
    /// Mesh removed from the set.
    pub absorbed: MeshHandle,
    /// Mesh that now holds the union.
    pub target: MeshHandle,
}

/// Summary of a merge pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub merges: Vec<MergeRecord>,
}

impl MergeReport {
    /// Number of absorptions performed.
    pub fn merge_count(&self) -> usize {
        self.merges.len()
    }

    /// True if the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        self.merges.is_empty()
    }
}

/// Combines `source` into `target`'s local frame.
///
/// Target vertices come first so existing target indices stay valid.
pub fn combine(target: &RibbonMesh, source: &RibbonMesh) -> Result<Mesh, MeshError> {
    let source_to_target = target.transform().inverse() * source.transform();

    let mut merged = target.mesh().clone();
    merged.append(&source.mesh().transformed(&source_to_target))?;
    merged.optimize();
    Ok(merged)
}

/// Proximity-based merger for ribbon meshes.
///
/// # Example
///
/// ```rust
/// use glam::{DMat4, DVec3};
/// use ribbon_mesh::merge::MeshMerger;
/// use ribbon_mesh::ribbon::append_segment_quad;
/// use ribbon_mesh::{Mesh, MeshSet};
///
/// let mut a = Mesh::new();
/// append_segment_quad(&mut a, DVec3::ZERO, DVec3::X, 0.1);
/// let mut b = Mesh::new();
/// append_segment_quad(&mut b, DVec3::X, DVec3::new(2.0, 0.0, 0.0), 0.1);
///
/// let mut set = MeshSet::new();
/// set.insert_sealed(a, DMat4::IDENTITY);
/// set.insert_sealed(b, DMat4::IDENTITY);
///
/// let merger = MeshMerger::new(0.01).unwrap();
/// let report = merger.merge_pass(&mut set);
/// assert_eq!(report.merge_count(), 1);
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MeshMerger {
    tolerance: f64,
}

impl MeshMerger {
    /// Creates a merger with the given proximity tolerance.
    pub fn new(tolerance: f64) -> Result<Self, MeshError> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConfigError::InvalidMergeDistance(tolerance).into());
        }
        Ok(Self { tolerance })
    }

    /// Creates a merger using `edge_merge_distance` from the configuration.
    pub fn from_config(config: &RibbonConfig) -> Result<Self, MeshError> {
        Self::new(config.edge_merge_distance)
    }

    /// Returns the proximity tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Symmetric proximity test using this merger's tolerance.
    pub fn should_merge(&self, a: &RibbonMesh, b: &RibbonMesh) -> bool {
        should_merge(a, b, self.tolerance)
    }

    fn eligible(mesh: &RibbonMesh) -> bool {
        mesh.is_sealed() && !mesh.mesh().is_empty()
    }

    /// Runs one greedy merge pass over `set`.
    ///
    /// Empty meshes and meshes still being drawn are neither sources nor
    /// targets.
    pub fn merge_pass(&self, set: &mut MeshSet) -> MergeReport {
        let mut report = MergeReport::default();
        let len = set.slots().len();

        for i in (0..len).rev() {
            let mut found = None;
            {
                let slots = set.slots();
                let Some(source) = slots[i].as_ref().filter(|m| Self::eligible(m)) else {
                    continue;
                };

                for (j, slot) in slots[..i].iter().enumerate() {
                    let Some(target) = slot.as_ref().filter(|m| Self::eligible(m)) else {
                        continue;
                    };
                    if !self.should_merge(source, target) {
                        continue;
                    }
                    match combine(target, source) {
                        Ok(merged) => {
                            found = Some((j, merged));
                            break;
                        }
                        Err(err) => {
                            warn!(
                                source = %source.handle(),
                                target = %target.handle(),
                                %err,
                                "Skipping merge"
                            );
                        }
                    }
                }
            }

            let Some((j, merged)) = found else {
                continue;
            };
            let slots = set.slots_mut();
            let (Some(absorbed), Some(target)) = (slots[i].take(), slots[j].as_mut()) else {
                continue;
            };
            debug!(
                absorbed = %absorbed.handle(),
                target = %target.handle(),
                vertices = merged.vertex_count(),
                "Merged ribbon meshes"
            );
            target.set_mesh(merged);
            report.merges.push(MergeRecord {
                absorbed: absorbed.handle(),
                target: target.handle(),
            });
        }

        set.compact();
        debug!(merges = report.merge_count(), remaining = set.len(), "Merge pass finished");
        report
    }
}
