//! # Mesh Set
//!
//! Creation-ordered collection of live ribbon meshes, addressed by handles.
//! The set owns geometry only; drawables and colliders belong to whoever
//! consumes the handles.

use std::fmt;

use glam::DMat4;
use serde::{Deserialize, Serialize};

use crate::error::MeshError;
use crate::mesh::Mesh;

/// Opaque identifier for a mesh in a [`MeshSet`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(u64);

impl MeshHandle {
    /// Raw numeric id, for keying external resources.
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MeshHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

/// One ribbon (or merged group of ribbons) and its world transform.
#[derive(Debug, Clone, PartialEq)]
pub struct RibbonMesh {
    handle: MeshHandle,
    mesh: Mesh,
    transform: DMat4,
    sealed: bool,
}

impl RibbonMesh {
    /// Handle of this mesh.
    pub fn handle(&self) -> MeshHandle {
        self.handle
    }

    /// Geometry in local space.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Local-to-world transform.
    pub fn transform(&self) -> DMat4 {
        self.transform
    }

    /// True once the owning strand has ended; only sealed meshes merge.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Geometry transformed into world space.
    pub fn world_mesh(&self) -> Mesh {
        self.mesh.transformed(&self.transform)
    }

    pub(crate) fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub(crate) fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
    }

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }
}

/// All live meshes in creation order.
///
/// # Example
///
/// ```rust
/// use glam::DMat4;
/// use ribbon_mesh::{Mesh, MeshSet};
///
/// let mut set = MeshSet::new();
/// let a = set.insert(Mesh::new(), DMat4::IDENTITY);
/// let b = set.insert(Mesh::new(), DMat4::IDENTITY);
/// assert!(a < b);
/// set.remove(a).unwrap();
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MeshSet {
    /// Slots in creation order; `None` marks a mesh removed mid-pass.
    slots: Vec<Option<RibbonMesh>>,
    next_id: u64,
}

impl MeshSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a growing (unsealed) mesh and returns its handle.
    pub fn insert(&mut self, mesh: Mesh, transform: DMat4) -> MeshHandle {
        let handle = MeshHandle(self.next_id);
        self.next_id += 1;
        self.slots.push(Some(RibbonMesh {
            handle,
            mesh,
            transform,
            sealed: false,
        }));
        handle
    }

    /// Adds a finished mesh that is immediately eligible for merging.
    pub fn insert_sealed(&mut self, mesh: Mesh, transform: DMat4) -> MeshHandle {
        let handle = self.insert(mesh, transform);
        if let Some(entry) = self.get_mut(handle) {
            entry.seal();
        }
        handle
    }

    /// Number of live meshes.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// True if no mesh is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a mesh.
    pub fn get(&self, handle: MeshHandle) -> Option<&RibbonMesh> {
        self.slots.iter().flatten().find(|m| m.handle == handle)
    }

    pub(crate) fn get_mut(&mut self, handle: MeshHandle) -> Option<&mut RibbonMesh> {
        self.slots.iter_mut().flatten().find(|m| m.handle == handle)
    }

    /// Live meshes from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &RibbonMesh> {
        self.slots.iter().flatten()
    }

    /// Handles from oldest to newest.
    pub fn handles(&self) -> Vec<MeshHandle> {
        self.iter().map(RibbonMesh::handle).collect()
    }

    /// Marks a mesh immutable and eligible for merging.
    pub fn seal(&mut self, handle: MeshHandle) -> Result<(), MeshError> {
        self.get_mut(handle)
            .map(RibbonMesh::seal)
            .ok_or(MeshError::UnknownHandle(handle))
    }

    /// Removes and returns a mesh.
    pub fn remove(&mut self, handle: MeshHandle) -> Result<RibbonMesh, MeshError> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|m| m.handle == handle))
            .ok_or(MeshError::UnknownHandle(handle))?;
        self.slots
            .remove(index)
            .ok_or(MeshError::UnknownHandle(handle))
    }

    /// Removes every mesh. Handles are not reissued.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub(crate) fn slots(&self) -> &[Option<RibbonMesh>] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Option<RibbonMesh>] {
        &mut self.slots
    }

    /// Drops slots emptied during a merge pass.
    pub(crate) fn compact(&mut self) {
        self.slots.retain(Option::is_some);
    }
}
