//! Force-directed relaxation.
//!
//! Seeds a random layout, then iteratively nudges islands apart with an
//! inverse-square repulsion plus a weak pull toward the usable-area
//! centroid. Every nudge is validity-gated, so the layout can only move
//! between valid states.

use rand::rngs::StdRng;
use rand::Rng;

use crate::geom;
use crate::layout::{placement_valid, Island};

use super::PlacementContext;

/// Step fraction applied to the accumulated force each iteration.
const LEARNING_RATE: f64 = 0.1;

/// Weight of the centering pull.
const CENTERING: f64 = 0.01;

/// Uniform position attempts per island when seeding.
const SEED_ATTEMPTS: u32 = 100;

fn seed_layout(ctx: &PlacementContext<'_>, rng: &mut StdRng) -> Vec<Island> {
    let mut placed: Vec<Island> = Vec::new();
    let mut next_id = 0u32;
    for spec in ctx.specs {
        if placed.iter().map(Island::area).sum::<f64>() >= ctx.target_area {
            break;
        }
        for _ in 0..SEED_ATTEMPTS {
            let cx = rng.gen_range(ctx.bounds.min().x..=ctx.bounds.max().x);
            let cy = rng.gen_range(ctx.bounds.min().y..=ctx.bounds.max().y);
            let rect = geom::rect_from_center(cx, cy, spec.width, spec.height);
            if placement_valid(&rect, ctx.usable, &placed, ctx.entrances, ctx.cfg) {
                placed.push(Island::new(next_id, rect, spec.category));
                next_id += 1;
                break;
            }
        }
    }
    placed
}

pub(super) fn place(ctx: &PlacementContext<'_>, rng: &mut StdRng) -> Vec<Island> {
    let mut islands = seed_layout(ctx, rng);
    if islands.len() < 2 {
        return islands;
    }

    // Repulsion falls off past twice the spacing buffer.
    let scale = 2.0 * ctx.cfg.min_island_spacing;
    for _ in 0..ctx.cfg.budget.relax_iterations {
        for i in 0..islands.len() {
            let center = islands[i].center();
            let mut fx = 0.0;
            let mut fy = 0.0;
            for (j, other) in islands.iter().enumerate() {
                if j == i {
                    continue;
                }
                let oc = other.center();
                let dx = center.x() - oc.x();
                let dy = center.y() - oc.y();
                let dist_sq = (dx * dx + dy * dy).max(1e-6);
                let dist = dist_sq.sqrt();
                let magnitude = scale * scale / dist_sq;
                fx += dx / dist * magnitude;
                fy += dy / dist * magnitude;
            }
            fx += CENTERING * (ctx.centroid.x() - center.x());
            fy += CENTERING * (ctx.centroid.y() - center.y());

            let old = islands[i];
            let moved = geom::rect_from_center(
                center.x() + LEARNING_RATE * fx,
                center.y() + LEARNING_RATE * fy,
                old.width(),
                old.height(),
            );
            let others: Vec<Island> = islands
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, island)| *island)
                .collect();
            if placement_valid(&moved, ctx.usable, &others, ctx.entrances, ctx.cfg) {
                islands[i] = Island::new(old.id, moved, old.category);
            }
        }
    }

    islands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_catalog, expand_to_target};
    use crate::config::{BudgetProfile, EngineConfig};
    use crate::geom::{rect, to_multi};
    use rand::SeedableRng;

    #[test]
    fn relaxation_keeps_layout_valid() {
        let mut cfg = EngineConfig::default();
        cfg.budget = BudgetProfile::fast();
        let usable = to_multi(rect(0.0, 0.0, 25.0, 25.0).to_polygon());
        let specs = expand_to_target(&build_catalog(&[(2.0, 2.0)]), 50.0);
        let ctx = PlacementContext::new(&usable, &[], &[], &specs, 50.0, &cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let islands = place(&ctx, &mut rng);
        assert!(!islands.is_empty());
        for (i, a) in islands.iter().enumerate() {
            assert!(geom::contains_rect(&usable, &a.rect));
            for b in &islands[i + 1..] {
                assert!(geom::rect_distance(&a.rect, &b.rect) >= 2.0 * cfg.min_island_spacing);
            }
        }
    }

    #[test]
    fn relaxation_moves_islands_from_their_seed_positions() {
        let mut cfg = EngineConfig::default();
        cfg.budget = BudgetProfile::fast();
        let usable = to_multi(rect(0.0, 0.0, 30.0, 30.0).to_polygon());
        let specs = expand_to_target(&build_catalog(&[(2.0, 2.0)]), 30.0);
        let ctx = PlacementContext::new(&usable, &[], &[], &specs, 30.0, &cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let seeded = seed_layout(&ctx, &mut rng);

        let mut rng = StdRng::seed_from_u64(9);
        let relaxed = place(&ctx, &mut rng);
        assert_eq!(seeded.len(), relaxed.len());
        let moved = seeded
            .iter()
            .zip(&relaxed)
            .any(|(a, b)| geom::rect_distance(&a.rect, &b.rect) > 0.0 || a.rect != b.rect);
        assert!(moved, "relaxation left every island in place");
    }
}
