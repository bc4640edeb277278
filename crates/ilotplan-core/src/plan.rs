//! End-to-end plan generation.
//!
//! `generate_layout` is the one entry point: derive the usable area,
//! expand the island catalog, race the strategies, synthesize
//! corridors, and package everything into a serializable plan. The
//! pipeline never fails; degenerate inputs produce an explicit empty
//! plan.

use geo::CoordsIter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{self, SizeCategory};
use crate::config::{CoverageProfile, EngineConfig};
use crate::corridor::{self, Connection};
use crate::engine;
use crate::layout::Island;
use crate::prepare::{self, FloorGeometry};
use crate::strategies::{PlacementContext, Strategy};
use crate::validate::{self, ComplianceWarning};

/// What the caller asks for, independent of the floor geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// Requested island footprints as (width, height) pairs.
    pub island_dimensions: Vec<(f64, f64)>,
    pub coverage: CoverageProfile,
    /// Desired corridor width; clamped into the supported range.
    pub corridor_width: f64,
}

impl Default for LayoutRequest {
    fn default() -> Self {
        Self {
            island_dimensions: Vec::new(),
            coverage: CoverageProfile::Medium,
            corridor_width: 1.2,
        }
    }
}

/// One placed island in the output plan.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IslandFeature {
    pub id: u32,
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub category: SizeCategory,
}

impl From<&Island> for IslandFeature {
    fn from(island: &Island) -> Self {
        Self {
            id: island.id,
            min_x: island.rect.min().x,
            min_y: island.rect.min().y,
            width: island.width(),
            height: island.height(),
            area: island.area(),
            category: island.category,
        }
    }
}

/// One corridor in the output plan; geometry as exterior rings.
#[derive(Debug, Clone, Serialize)]
pub struct CorridorFeature {
    pub polygons: Vec<Vec<[f64; 2]>>,
    pub width: f64,
    pub area: f64,
    pub connects: Connection,
}

/// Aggregate numbers for the whole plan.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Statistics {
    pub total_usable_area: f64,
    pub total_island_area: f64,
    pub total_corridor_area: f64,
    pub islands_placed: usize,
    pub corridors_created: usize,
    pub achieved_coverage: f64,
    pub accessibility_score: f64,
}

/// Complete result of one optimization request.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutPlan {
    /// Winning strategy, absent when nothing could be placed.
    pub strategy: Option<Strategy>,
    pub islands: Vec<IslandFeature>,
    pub corridors: Vec<CorridorFeature>,
    pub fully_connected: bool,
    pub statistics: Statistics,
    pub warnings: Vec<ComplianceWarning>,
}

impl LayoutPlan {
    fn empty(total_usable_area: f64) -> Self {
        Self {
            strategy: None,
            islands: Vec::new(),
            corridors: Vec::new(),
            fully_connected: true,
            statistics: Statistics {
                total_usable_area,
                ..Statistics::default()
            },
            warnings: Vec::new(),
        }
    }
}

/// Run the full pipeline for one floor and request.
pub fn generate_layout(
    floor: &FloorGeometry,
    request: &LayoutRequest,
    cfg: &EngineConfig,
) -> LayoutPlan {
    let cfg = cfg.clone().with_corridor_width(request.corridor_width);

    let usable = prepare::derive_usable_area(floor, &cfg);
    if usable.0.is_empty() {
        info!("usable area is empty, returning empty plan");
        return LayoutPlan::empty(0.0);
    }

    let target_coverage = request.coverage.fraction();
    let specs = catalog::build_catalog(&request.island_dimensions);
    let ctx = match PlacementContext::new(
        &usable,
        &floor.entrances,
        &floor.restricted,
        &specs,
        0.0,
        &cfg,
    ) {
        Some(ctx) => ctx,
        None => return LayoutPlan::empty(0.0),
    };
    let target_area = target_coverage * ctx.usable_area;
    let expanded = catalog::expand_to_target(&specs, target_area);
    if expanded.is_empty() {
        info!("catalog expansion produced nothing, returning empty plan");
        return LayoutPlan::empty(ctx.usable_area);
    }
    let ctx = PlacementContext {
        specs: &expanded,
        target_area,
        ..ctx
    };

    debug!(
        usable_area = ctx.usable_area,
        target_area,
        specs = ctx.specs.len(),
        "starting strategy race"
    );
    let outcomes = engine::run_strategies(&ctx);
    let best = match engine::select_best(outcomes, target_coverage) {
        Some(best) => best,
        None => {
            info!("no strategy placed any islands, returning empty plan");
            return LayoutPlan::empty(ctx.usable_area);
        }
    };
    info!(
        strategy = best.strategy.name(),
        islands = best.layout.len(),
        coverage = best.coverage,
        "selected layout"
    );

    let network = corridor::synthesize(&best.layout.islands, &usable, &cfg);
    let warnings = validate::check_compliance(&best.layout.islands, &network, &cfg);

    let statistics = Statistics {
        total_usable_area: ctx.usable_area,
        total_island_area: best.layout.total_area(),
        total_corridor_area: network.total_area(),
        islands_placed: best.layout.len(),
        corridors_created: network.corridors.len(),
        achieved_coverage: best.coverage,
        accessibility_score: best.accessibility,
    };

    LayoutPlan {
        strategy: Some(best.strategy),
        islands: best.layout.islands.iter().map(IslandFeature::from).collect(),
        corridors: network
            .corridors
            .iter()
            .map(|c| CorridorFeature {
                polygons: c
                    .geometry
                    .0
                    .iter()
                    .map(|p| p.exterior_coords_iter().map(|pt| [pt.x, pt.y]).collect())
                    .collect(),
                width: c.width,
                area: c.area,
                connects: c.connects,
            })
            .collect(),
        fully_connected: network.fully_connected,
        statistics,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetProfile;

    fn fast_cfg() -> EngineConfig {
        let mut cfg = EngineConfig::default();
        cfg.budget = BudgetProfile::fast();
        cfg
    }

    #[test]
    fn open_floor_produces_a_populated_plan() {
        let floor = FloorGeometry::rectangular(30.0, 30.0);
        let request = LayoutRequest::default();
        let plan = generate_layout(&floor, &request, &fast_cfg());
        assert!(plan.strategy.is_some());
        assert!(!plan.islands.is_empty());
        assert!(plan.statistics.total_usable_area > 899.0);
        assert!(plan.statistics.achieved_coverage > 0.0);
        assert_eq!(plan.statistics.islands_placed, plan.islands.len());
    }

    #[test]
    fn empty_floor_degrades_to_empty_plan() {
        let plan = generate_layout(
            &FloorGeometry::default(),
            &LayoutRequest::default(),
            &fast_cfg(),
        );
        assert!(plan.strategy.is_none());
        assert!(plan.islands.is_empty());
        assert!(plan.corridors.is_empty());
        assert_eq!(plan.statistics.islands_placed, 0);
    }

    #[test]
    fn corridor_width_request_is_clamped() {
        let floor = FloorGeometry::rectangular(30.0, 30.0);
        let mut request = LayoutRequest::default();
        request.corridor_width = 99.0;
        let plan = generate_layout(&floor, &request, &fast_cfg());
        for corridor in &plan.corridors {
            assert!((corridor.width - crate::config::CORRIDOR_WIDTH_MAX).abs() < 1e-12);
        }
    }

    #[test]
    fn plan_serializes_to_json() {
        let floor = FloorGeometry::rectangular(20.0, 20.0);
        let plan = generate_layout(&floor, &LayoutRequest::default(), &fast_cfg());
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("statistics").is_some());
        assert!(json.get("islands").is_some());
    }
}
