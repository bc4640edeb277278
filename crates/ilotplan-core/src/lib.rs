//! Îlot placement and corridor network synthesis.
//!
//! This crate is the pure optimization core: it takes floor geometry
//! and a layout request as plain data and returns a placed island
//! layout with a synthesized circulation network. There is no CAD
//! parsing, no rendering, and no I/O here, which keeps every stage
//! unit-testable and deterministic under a fixed seed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Island size categories and target-area catalog expansion |
//! | [`config`] | Per-request engine configuration, profiles, validation |
//! | [`corridor`] | Row detection, corridor bands, spanning-tree links |
//! | [`engine`] | Parallel strategy race and best-layout selection |
//! | [`error`] | Strategy failure reasons |
//! | [`geom`] | Boolean-ops helpers, capsules, rectangle distances |
//! | [`layout`] | Island/layout types and the shared placement rule |
//! | [`plan`] | End-to-end pipeline and the serializable output plan |
//! | [`prepare`] | Usable-area derivation from raw floor geometry |
//! | [`score`] | Coverage, accessibility, distribution, fitness metrics |
//! | [`strategies`] | The six placement strategies |
//! | [`validate`] | Non-fatal compliance checks on finished plans |

pub mod catalog;
pub mod config;
pub mod corridor;
pub mod engine;
pub mod error;
pub mod geom;
pub mod layout;
pub mod plan;
pub mod prepare;
pub mod score;
pub mod strategies;
pub mod validate;

pub use config::{CoverageProfile, EngineConfig};
pub use plan::{generate_layout, LayoutPlan, LayoutRequest};
pub use prepare::FloorGeometry;
pub use strategies::Strategy;
