//! Island size catalog.
//!
//! Converts requested (width, height) pairs into categorized
//! specifications and expands them into a placement list sized for a
//! target coverage area. The category thresholds are fixed so every
//! strategy categorizes identically.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Size class of an island, by footprint area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl SizeCategory {
    /// Fixed, monotonic, non-overlapping area thresholds in m².
    pub fn for_area(area: f64) -> Self {
        if area <= 6.0 {
            SizeCategory::Small
        } else if area <= 15.0 {
            SizeCategory::Medium
        } else if area <= 30.0 {
            SizeCategory::Large
        } else {
            SizeCategory::ExtraLarge
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeCategory::Small => "small",
            SizeCategory::Medium => "medium",
            SizeCategory::Large => "large",
            SizeCategory::ExtraLarge => "extra_large",
        }
    }
}

/// Immutable island specification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IslandSpec {
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub category: SizeCategory,
}

impl IslandSpec {
    pub fn new(width: f64, height: f64) -> Self {
        let area = width * height;
        Self {
            width,
            height,
            area,
            category: SizeCategory::for_area(area),
        }
    }
}

/// Fallback dimension set when the caller provides none.
pub const DEFAULT_DIMENSIONS: [(f64, f64); 4] = [(3.0, 2.0), (4.0, 3.0), (5.0, 4.0), (2.0, 2.0)];

/// Hard cap on the placement list length.
pub const MAX_ISLANDS: usize = 100;

/// Fraction of overage allowed past the target area when expanding.
const OVERAGE: f64 = 1.1;

/// Normalize requested dimensions into specs, dropping degenerate pairs.
/// An empty request falls back to [`DEFAULT_DIMENSIONS`].
pub fn build_catalog(dimensions: &[(f64, f64)]) -> Vec<IslandSpec> {
    let mut specs: Vec<IslandSpec> = dimensions
        .iter()
        .filter(|(w, h)| w.is_finite() && h.is_finite() && *w > 0.0 && *h > 0.0)
        .map(|&(w, h)| IslandSpec::new(w, h))
        .collect();
    if specs.is_empty() {
        specs = DEFAULT_DIMENSIONS
            .iter()
            .map(|&(w, h)| IslandSpec::new(w, h))
            .collect();
    }
    specs
}

/// Expand a catalog into a placement list whose total area approaches
/// `target_area`.
///
/// Specs are taken largest-area-first (stable sort, ties keep request
/// order) and repeated in rounds until the target is met, the 10%
/// overage would be exceeded for every spec, or [`MAX_ISLANDS`] is hit.
pub fn expand_to_target(catalog: &[IslandSpec], target_area: f64) -> Vec<IslandSpec> {
    if catalog.is_empty() || !target_area.is_finite() || target_area <= 0.0 {
        return Vec::new();
    }

    let mut sorted = catalog.to_vec();
    sorted.sort_by(|a, b| b.area.partial_cmp(&a.area).unwrap_or(std::cmp::Ordering::Equal));

    let mut placement = Vec::new();
    let mut current_area = 0.0;
    while current_area < target_area && placement.len() < MAX_ISLANDS {
        let mut placed_any = false;
        for spec in &sorted {
            if placement.len() >= MAX_ISLANDS {
                break;
            }
            if current_area + spec.area <= target_area * OVERAGE {
                placement.push(*spec);
                current_area += spec.area;
                placed_any = true;
            }
            if current_area >= target_area {
                break;
            }
        }
        if !placed_any {
            break;
        }
    }

    debug!(
        islands = placement.len(),
        total_area = current_area,
        target_area,
        "expanded catalog into placement list"
    );
    placement
}
