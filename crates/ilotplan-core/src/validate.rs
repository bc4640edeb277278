//! Post-synthesis compliance checks.
//!
//! None of these abort a plan. They surface conditions a human planner
//! would want to review before accepting the output.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::config::EngineConfig;
use crate::corridor::CorridorNetwork;
use crate::geom;
use crate::layout::Island;
use crate::score;

/// Non-fatal finding about a finished plan.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ComplianceWarning {
    #[error("corridor {index} is narrower than its configured width ({min_dimension:.2} < {width:.2} m)")]
    CorridorTooNarrow {
        index: usize,
        width: f64,
        min_dimension: f64,
    },

    #[error("islands {a} and {b} overlap by {area:.2} m²")]
    IslandOverlap { a: u32, b: u32, area: f64 },

    #[error("island {id} has a degenerate footprint")]
    MalformedIsland { id: u32 },

    #[error("circulation network does not reach every island")]
    CirculationDisconnected,
}

/// Check a placed layout and its corridor network, returning every
/// finding.
pub fn check_compliance(
    islands: &[Island],
    network: &CorridorNetwork,
    cfg: &EngineConfig,
) -> Vec<ComplianceWarning> {
    let mut warnings = Vec::new();

    for island in islands {
        if !island.is_well_formed() {
            warnings.push(ComplianceWarning::MalformedIsland { id: island.id });
        }
    }

    for (i, a) in islands.iter().enumerate() {
        for b in &islands[i + 1..] {
            let area = score::rect_overlap_area(a, b);
            if area > cfg.overlap_tolerance {
                warnings.push(ComplianceWarning::IslandOverlap {
                    a: a.id,
                    b: b.id,
                    area,
                });
            }
        }
    }

    for (index, corridor) in network.corridors.iter().enumerate() {
        let min_dimension = geom::min_dimension(&corridor.geometry);
        if min_dimension + 1e-6 < corridor.width {
            warnings.push(ComplianceWarning::CorridorTooNarrow {
                index,
                width: corridor.width,
                min_dimension,
            });
        }
    }

    if !network.fully_connected && !islands.is_empty() {
        warnings.push(ComplianceWarning::CirculationDisconnected);
    }

    for warning in &warnings {
        warn!(%warning, "compliance finding");
    }
    warnings
}
