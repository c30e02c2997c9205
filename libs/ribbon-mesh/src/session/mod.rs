//! # Ribbon Session
//!
//! Per-tick driver that owns both hand strands, the mesh set, and the
//! render sink.
//!
//! ## Tick Flow
//!
//! ```text
//! TrackingFrame ──► per hand ──► sample? ──no──► finish strand ──► seal / drop
//!                                  │                                  │
//!                                 yes                          OnStrandEnd?
//!                                  ▼                                  ▼
//!                        begin strand if idle                    merge pass
//!                                  ▼
//!                           submit sample
//!                                  ▼
//!                   triangles? ──► upload + derived + collider
//! ```

mod sink;

#[cfg(test)]
mod tests;

pub use sink::{NullSink, RenderSink};

use config::constants::RibbonConfig;
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::MeshError;
use crate::merge::{MergeReport, MeshMerger};
use crate::mesh::Mesh;
use crate::mesh_set::{MeshHandle, MeshSet, RibbonMesh};
use crate::ribbon::{GeometryDelta, RibbonBuilder, SampleOutcome, Strand};
use crate::tracking::{Hand, RibbonSample, TrackingFrame, WidthMode};
use crate::upload::UploadBuffers;

/// When the session runs a merge pass on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergePolicy {
    /// Only when [`RibbonSession::merge_pass`] is called.
    #[default]
    Manual,
    /// After every strand that leaves a sealed mesh behind.
    OnStrandEnd,
}

/// Session behaviour that is not part of the ribbon geometry config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub merge_policy: MergePolicy,
    pub width_mode: WidthMode,
    /// End the strand while the index tip is outside the camera view.
    pub require_in_view: bool,
}

/// What one tick did for each hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Sample outcome per hand, `None` when the hand was not drawing.
    pub outcomes: [Option<SampleOutcome>; 2],
    /// Handles whose strands ended this tick and were kept.
    pub sealed: Vec<MeshHandle>,
    /// Merge pass run because of [`MergePolicy::OnStrandEnd`].
    pub merge: Option<MergeReport>,
}

impl TickReport {
    /// Outcome for `hand`.
    pub fn outcome(&self, hand: Hand) -> Option<&SampleOutcome> {
        self.outcomes[hand.index()].as_ref()
    }
}

#[derive(Debug, Default)]
struct StrandSlot {
    strand: Strand,
    handle: Option<MeshHandle>,
}

/// Two-hand ribbon drawing session.
///
/// # Example
///
/// ```rust
/// use config::constants::RibbonConfig;
/// use glam::DVec3;
/// use ribbon_mesh::session::{NullSink, RibbonSession, SessionOptions};
/// use ribbon_mesh::tracking::{Camera, HandPose, TrackingFrame};
///
/// let camera = Camera::look_at(DVec3::new(0.0, 0.0, 1.0), DVec3::ZERO, 1.0, 800.0, 600.0);
/// let mut session =
///     RibbonSession::new(RibbonConfig::default(), SessionOptions::default(), NullSink).unwrap();
///
/// for i in 0..3 {
///     let tip = DVec3::new(i as f64 * 0.01, 0.0, 0.0);
///     session.tick(&TrackingFrame {
///         camera,
///         left: HandPose::tracked(tip, tip + DVec3::new(0.0, 0.02, 0.0)),
///         right: HandPose::lost(),
///     });
/// }
/// assert_eq!(session.meshes().len(), 1);
/// assert_eq!(session.meshes().iter().next().unwrap().mesh().index_count(), 12);
/// ```
pub struct RibbonSession<S: RenderSink> {
    builder: RibbonBuilder,
    merger: MeshMerger,
    meshes: MeshSet,
    strands: [StrandSlot; 2],
    options: SessionOptions,
    sink: S,
}

impl<S: RenderSink> RibbonSession<S> {
    /// Creates a session, rejecting invalid configuration.
    pub fn new(config: RibbonConfig, options: SessionOptions, sink: S) -> Result<Self, MeshError> {
        Ok(Self {
            builder: RibbonBuilder::new(config)?,
            merger: MeshMerger::from_config(&config)?,
            meshes: MeshSet::new(),
            strands: Default::default(),
            options,
            sink,
        })
    }

    /// Meshes currently alive, oldest first.
    pub fn meshes(&self) -> &MeshSet {
        &self.meshes
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Strand state for `hand`.
    pub fn strand(&self, hand: Hand) -> &Strand {
        &self.strands[hand.index()].strand
    }

    /// Mesh the hand is currently drawing into.
    pub fn active_handle(&self, hand: Hand) -> Option<MeshHandle> {
        self.strands[hand.index()].handle
    }

    /// Processes one frame of tracking input for both hands.
    pub fn tick(&mut self, frame: &TrackingFrame) -> TickReport {
        let mut report = TickReport::default();

        for hand in Hand::ALL {
            match self.drawing_sample(frame, hand) {
                Some(sample) => {
                    report.outcomes[hand.index()] =
                        Some(self.extend(hand, sample, frame.camera.position));
                }
                None => {
                    if let Some(handle) = self.finish_strand(hand) {
                        report.sealed.push(handle);
                    }
                }
            }
        }

        if !report.sealed.is_empty() && self.options.merge_policy == MergePolicy::OnStrandEnd {
            report.merge = Some(self.merge_pass());
        }
        report
    }

    /// Runs one merge pass and reports the result to the sink.
    ///
    /// Absorbed meshes are destroyed; every target is re-uploaded.
    pub fn merge_pass(&mut self) -> MergeReport {
        let report = self.merger.merge_pass(&mut self.meshes);

        for record in &report.merges {
            self.sink.destroy(record.absorbed);
        }
        let mut targets: Vec<MeshHandle> = report.merges.iter().map(|r| r.target).collect();
        targets.sort_unstable();
        targets.dedup();
        for handle in targets {
            self.publish(handle);
        }
        report
    }

    /// Removes a mesh, ending any strand still drawing into it.
    pub fn remove(&mut self, handle: MeshHandle) -> Result<RibbonMesh, MeshError> {
        for slot in &mut self.strands {
            if slot.handle == Some(handle) {
                self.builder.end_strand(&mut slot.strand);
                slot.handle = None;
            }
        }
        let removed = self.meshes.remove(handle)?;
        self.sink.destroy(handle);
        Ok(removed)
    }

    /// Ends both strands and destroys every mesh.
    pub fn reset(&mut self) {
        for slot in &mut self.strands {
            self.builder.end_strand(&mut slot.strand);
            slot.handle = None;
        }
        for handle in self.meshes.handles() {
            self.sink.destroy(handle);
        }
        self.meshes.clear();
        debug!("Session reset");
    }

    fn drawing_sample(&self, frame: &TrackingFrame, hand: Hand) -> Option<RibbonSample> {
        let sample = frame
            .pose(hand)
            .sample(&frame.camera, self.options.width_mode)?;
        if sample.pinch_width < self.builder.config().min_finger_distance {
            return None;
        }
        if self.options.require_in_view && !frame.camera.is_point_in_view(sample.position) {
            return None;
        }
        Some(sample)
    }

    fn extend(&mut self, hand: Hand, sample: RibbonSample, camera: DVec3) -> SampleOutcome {
        let slot = &mut self.strands[hand.index()];
        if !slot.strand.is_active() || slot.handle.is_none() {
            self.builder.begin_strand(&mut slot.strand, sample.width);
            let handle = self.meshes.insert(Mesh::new(), DMat4::IDENTITY);
            slot.handle = Some(handle);
            debug!(?hand, %handle, "Started ribbon mesh");
        }

        let outcome =
            self.builder
                .submit_sample(&mut slot.strand, sample.position, sample.width, camera);

        let (Some(handle), SampleOutcome::Emitted(delta)) = (slot.handle, &outcome) else {
            return outcome;
        };
        match self.meshes.get_mut(handle) {
            Some(target) => apply_delta(target.mesh_mut(), delta),
            None => {
                warn!(%handle, "Ribbon mesh vanished while drawing");
                return outcome;
            }
        }
        if delta.triangles.is_some() {
            self.publish(handle);
        }
        outcome
    }

    /// Ends the hand's strand. Returns the handle if a mesh was kept.
    fn finish_strand(&mut self, hand: Hand) -> Option<MeshHandle> {
        let slot = &mut self.strands[hand.index()];
        self.builder.end_strand(&mut slot.strand);
        let handle = slot.handle.take()?;

        let keep = self
            .meshes
            .get(handle)
            .is_some_and(|m| m.mesh().triangle_count() > 0);
        if !keep {
            // Never uploaded, so the sink has nothing to release.
            if self.meshes.remove(handle).is_ok() {
                debug!(?hand, %handle, "Dropped ribbon without triangles");
            }
            return None;
        }

        match self.meshes.seal(handle) {
            Ok(()) => Some(handle),
            Err(err) => {
                warn!(%handle, %err, "Failed to seal ribbon mesh");
                None
            }
        }
    }

    fn publish(&mut self, handle: MeshHandle) {
        let Some(entry) = self.meshes.get(handle) else {
            return;
        };
        let Ok(buffers) = UploadBuffers::prepare(entry.mesh()) else {
            return;
        };
        self.sink.upload(handle, &buffers);
        self.sink.recompute_derived(handle);
        self.sink.refresh_collider(handle);
    }
}

fn apply_delta(mesh: &mut Mesh, delta: &GeometryDelta) {
    for v in delta.vertices {
        mesh.add_vertex(v);
    }
    for [a, b, c] in delta.triangles.into_iter().flatten() {
        mesh.add_triangle(a, b, c);
    }
}
