//! Error types for the placement core.
//!
//! The pipeline itself never fails: empty usable areas and exhausted
//! strategies degrade to an explicit empty plan. `StrategyError` exists
//! so that individual strategy outcomes can be aggregated and reported
//! instead of swallowed.

use thiserror::Error;

/// Why a single placement strategy produced no usable layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("usable area is empty")]
    EmptyUsableArea,

    #[error("no island specifications to place")]
    NoSpecs,

    #[error("strategy placed no islands")]
    NoIslandsPlaced,
}
