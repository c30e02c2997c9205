//! # Ribbon Mesh
//!
//! Incremental ribbon geometry from tracked fingertips, with greedy
//! proximity merging of finished ribbons.
//!
//! ## Architecture
//!
//! ```text
//! tracking (HandPose, Camera) → ribbon (RibbonBuilder, Strand) → MeshSet
//!                                                                  │
//!                                          merge (MeshMerger) ◄────┤
//!                                                                  ▼
//!                                        session → RenderSink (upload, collider)
//! ```
//!
//! ## Modules
//!
//! - **ribbon**: per-sample quad strip growth with view-facing width axis
//! - **merge**: proximity test and union of meshes into one frame
//! - **tracking**: fingertip poses, camera projection, width measurement
//! - **session**: two-hand tick driver and the render sink seam
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::RibbonConfig;
//! use glam::DVec3;
//! use ribbon_mesh::ribbon::{RibbonBuilder, Strand};
//!
//! let builder = RibbonBuilder::new(RibbonConfig::default()).unwrap();
//! let mut strand = Strand::new();
//! builder.begin_strand(&mut strand, 0.02);
//! for x in [0.0, 0.01, 0.02] {
//!     builder.submit_sample(&mut strand, DVec3::new(x, 0.0, 0.0), 0.02, DVec3::new(0.0, 0.0, -1.0));
//! }
//! assert_eq!(strand.mesh().vertex_count(), 6);
//! assert_eq!(strand.mesh().index_count(), 12);
//! ```

pub mod error;
pub mod merge;
pub mod mesh;
pub mod mesh_set;
pub mod ribbon;
pub mod session;
pub mod tracking;
pub mod upload;

pub use error::MeshError;
pub use merge::{MergeReport, MeshMerger};
pub use mesh::Mesh;
pub use mesh_set::{MeshHandle, MeshSet, RibbonMesh};
pub use ribbon::{RibbonBuilder, SampleOutcome, Strand};
pub use session::{MergePolicy, RenderSink, RibbonSession, SessionOptions};
pub use upload::UploadBuffers;
