//! Placement strategies.
//!
//! Six independent strategies generate candidate layouts from the same
//! [`PlacementContext`]. Each receives its own seeded random source so
//! running them in parallel stays deterministic.

use geo::{Area, Centroid, MultiPolygon, Point, Polygon, Rect};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::catalog::IslandSpec;
use crate::config::EngineConfig;
use crate::error::StrategyError;
use crate::geom;
use crate::layout::{Island, Layout};

mod edge;
mod evolve;
mod grid;
mod random;
mod relax;
mod zones;

/// Everything a strategy needs to place islands. Built once per request
/// and shared read-only across strategies.
pub struct PlacementContext<'a> {
    pub usable: &'a MultiPolygon<f64>,
    pub usable_area: f64,
    pub bounds: Rect<f64>,
    pub centroid: Point<f64>,
    pub entrances: &'a [Point<f64>],
    pub restricted: &'a [Polygon<f64>],
    pub specs: &'a [IslandSpec],
    pub target_area: f64,
    pub cfg: &'a EngineConfig,
}

impl<'a> PlacementContext<'a> {
    pub fn new(
        usable: &'a MultiPolygon<f64>,
        entrances: &'a [Point<f64>],
        restricted: &'a [Polygon<f64>],
        specs: &'a [IslandSpec],
        target_area: f64,
        cfg: &'a EngineConfig,
    ) -> Option<Self> {
        let bounds = geo::BoundingRect::bounding_rect(usable)?;
        let centroid = usable.centroid()?;
        Some(Self {
            usable,
            usable_area: usable.unsigned_area(),
            bounds,
            centroid,
            entrances,
            restricted,
            specs,
            target_area,
            cfg,
        })
    }

    /// Mean island dimension over the spec list, used as a pitch hint.
    pub fn mean_dimension(&self) -> f64 {
        if self.specs.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.specs.iter().map(|s| (s.width + s.height) / 2.0).sum();
        sum / self.specs.len() as f64
    }
}

/// One of the six placement strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Grid,
    Randomized,
    EdgeFollowing,
    AccessibilityZones,
    Evolutionary,
    ForceRelaxation,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Grid,
        Strategy::Randomized,
        Strategy::EdgeFollowing,
        Strategy::AccessibilityZones,
        Strategy::Evolutionary,
        Strategy::ForceRelaxation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Grid => "grid",
            Strategy::Randomized => "randomized",
            Strategy::EdgeFollowing => "edge_following",
            Strategy::AccessibilityZones => "accessibility_zones",
            Strategy::Evolutionary => "evolutionary",
            Strategy::ForceRelaxation => "force_relaxation",
        }
    }

    fn index(self) -> u64 {
        Strategy::ALL.iter().position(|s| *s == self).unwrap_or(0) as u64
    }

    /// Run this strategy over the context. Each strategy derives its
    /// random source from the request seed and its own index, so the
    /// set of outcomes does not depend on execution order.
    pub fn run(self, ctx: &PlacementContext<'_>) -> Result<Layout, StrategyError> {
        if ctx.usable.0.is_empty() || ctx.usable_area <= 0.0 {
            return Err(StrategyError::EmptyUsableArea);
        }
        if ctx.specs.is_empty() {
            return Err(StrategyError::NoSpecs);
        }
        let mut rng = StdRng::seed_from_u64(ctx.cfg.seed.wrapping_add(self.index()));
        let islands = match self {
            Strategy::Grid => grid::place(ctx),
            Strategy::Randomized => random::place(ctx, &mut rng),
            Strategy::EdgeFollowing => edge::place(ctx),
            Strategy::AccessibilityZones => zones::place(ctx),
            Strategy::Evolutionary => evolve::place(ctx, &mut rng),
            Strategy::ForceRelaxation => relax::place(ctx, &mut rng),
        };
        if islands.is_empty() {
            return Err(StrategyError::NoIslandsPlaced);
        }
        Ok(Layout::new(islands))
    }
}

/// Position preference shared by the deterministic strategies; higher
/// is better.
///
/// Rewards standoff from the usable-area centroid, spread relative to
/// already placed islands, and boundary proximity under 1 m.
pub(crate) fn position_score(
    center: Point<f64>,
    placed: &[Island],
    ctx: &PlacementContext<'_>,
) -> f64 {
    let dx = center.x() - ctx.centroid.x();
    let dy = center.y() - ctx.centroid.y();
    let mut score = 0.1 * (dx * dx + dy * dy).sqrt();

    if !placed.is_empty() {
        let nearest = placed
            .iter()
            .map(|island| {
                let c = island.center();
                let dx = center.x() - c.x();
                let dy = center.y() - c.y();
                (dx * dx + dy * dy).sqrt()
            })
            .fold(f64::INFINITY, f64::min);
        score += 0.2 * nearest;
    }

    let bd = geom::boundary_distance(center, ctx.usable);
    if bd < 1.0 {
        score += 0.3 * (1.0 - bd);
    }

    score
}
