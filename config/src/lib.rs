//! # Config Crate
//!
//! Centralized configuration for the ribbon mesh pipeline. Every tunable
//! threshold used while building ribbons from tracked fingertips, and while
//! merging finished ribbons, is defined here so the geometry crate never
//! carries magic numbers.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{RibbonConfig, DEFAULT_MIN_MOVE_DISTANCE};
//!
//! let cfg = RibbonConfig::default();
//! assert_eq!(cfg.min_move_distance, DEFAULT_MIN_MOVE_DISTANCE);
//!
//! let tight = RibbonConfig::new(0.002, 0.01, 0.1, 0.005).unwrap();
//! assert!(tight.edge_merge_distance < cfg.edge_merge_distance);
//! ```
//!
//! ## Units
//!
//! All distances are in meters, matching the tracking runtime. Ratios are
//! fractions in `[0, 1]`.

pub mod constants;
