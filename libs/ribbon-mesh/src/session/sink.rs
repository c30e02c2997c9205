//! # Render Sink
//!
//! The seam between the core and whatever owns drawables and colliders.

use crate::mesh_set::MeshHandle;
use crate::upload::UploadBuffers;

/// Receives geometry changes for meshes identified by handle.
///
/// The core decides what changed; the sink owns the actual GPU buffers,
/// derived attributes, and physics shapes.
pub trait RenderSink {
    /// New vertex/index buffers for `handle`, replacing any previous ones.
    fn upload(&mut self, handle: MeshHandle, buffers: &UploadBuffers);

    /// Normals and bounds for `handle` are stale.
    fn recompute_derived(&mut self, handle: MeshHandle);

    /// The collision shape for `handle` must be rebuilt.
    fn refresh_collider(&mut self, handle: MeshHandle);

    /// `handle` was absorbed or removed; release its resources.
    fn destroy(&mut self, handle: MeshHandle);
}

/// Sink that discards every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn upload(&mut self, _handle: MeshHandle, _buffers: &UploadBuffers) {}
    fn recompute_derived(&mut self, _handle: MeshHandle) {}
    fn refresh_collider(&mut self, _handle: MeshHandle) {}
    fn destroy(&mut self, _handle: MeshHandle) {}
}
