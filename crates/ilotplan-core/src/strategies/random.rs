//! Randomized placement.
//!
//! Same validity and position-preference rules as the grid strategy,
//! but candidates come from uniform sampling: every spec spends its
//! full attempt budget and keeps the best-scoring valid sample.

use geo::{Point, Rect};
use rand::rngs::StdRng;
use rand::Rng;

use crate::geom;
use crate::layout::{placement_valid, Island};

use super::{position_score, PlacementContext};

pub(super) fn place(ctx: &PlacementContext<'_>, rng: &mut StdRng) -> Vec<Island> {
    let mut placed: Vec<Island> = Vec::new();
    let mut next_id = 0u32;

    for spec in ctx.specs {
        if placed.iter().map(Island::area).sum::<f64>() >= ctx.target_area {
            break;
        }
        let mut best: Option<(Rect<f64>, f64)> = None;
        for _ in 0..ctx.cfg.budget.random_attempts {
            let cx = rng.gen_range(ctx.bounds.min().x..=ctx.bounds.max().x);
            let cy = rng.gen_range(ctx.bounds.min().y..=ctx.bounds.max().y);
            let rect = geom::rect_from_center(cx, cy, spec.width, spec.height);
            if !placement_valid(&rect, ctx.usable, &placed, ctx.entrances, ctx.cfg) {
                continue;
            }
            let score = position_score(Point::new(cx, cy), &placed, ctx);
            let better = match best {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if better {
                best = Some((rect, score));
            }
        }
        if let Some((rect, _)) = best {
            placed.push(Island::new(next_id, rect, spec.category));
            next_id += 1;
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_catalog, expand_to_target};
    use crate::config::{BudgetProfile, EngineConfig};
    use crate::geom::{rect, to_multi};
    use rand::SeedableRng;

    #[test]
    fn random_places_within_usable_area() {
        let mut cfg = EngineConfig::default();
        cfg.budget = BudgetProfile::fast();
        let usable = to_multi(rect(0.0, 0.0, 25.0, 25.0).to_polygon());
        let specs = expand_to_target(&build_catalog(&[(3.0, 2.0)]), 60.0);
        let ctx = PlacementContext::new(&usable, &[], &[], &specs, 60.0, &cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let islands = place(&ctx, &mut rng);
        assert!(!islands.is_empty());
        for island in &islands {
            assert!(geom::contains_rect(&usable, &island.rect));
        }
    }

    #[test]
    fn random_keeps_best_scoring_sample() {
        let mut cfg = EngineConfig::default();
        cfg.budget = BudgetProfile::fast();
        let usable = to_multi(rect(0.0, 0.0, 30.0, 30.0).to_polygon());
        // One small spec: the whole budget scores candidates for it.
        let specs = build_catalog(&[(2.0, 2.0)]);
        let ctx = PlacementContext::new(&usable, &[], &[], &specs, 4.0, &cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let islands = place(&ctx, &mut rng);
        assert_eq!(islands.len(), 1);
        // The position preference rewards centroid standoff, so the
        // best of 200 uniform samples lands well away from the middle.
        let c = islands[0].center();
        let dx = c.x() - ctx.centroid.x();
        let dy = c.y() - ctx.centroid.y();
        assert!(
            (dx * dx + dy * dy).sqrt() > 5.0,
            "picked a near-centroid sample: {c:?}"
        );
    }

    #[test]
    fn random_gives_up_when_nothing_fits() {
        let mut cfg = EngineConfig::default();
        cfg.budget = BudgetProfile::fast();
        // Usable area smaller than the only spec.
        let usable = to_multi(rect(0.0, 0.0, 1.0, 1.0).to_polygon());
        let specs = build_catalog(&[(3.0, 2.0)]);
        let ctx = PlacementContext::new(&usable, &[], &[], &specs, 6.0, &cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(place(&ctx, &mut rng).is_empty());
    }
}
