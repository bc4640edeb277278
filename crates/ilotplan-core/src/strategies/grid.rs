//! Regular-grid placement.
//!
//! Candidate centers sit on a square lattice whose pitch is the mean
//! island dimension plus the spacing buffer. Each spec takes the
//! highest-preference free lattice point, trying both orientations, so
//! the fill grows from the perimeter inward with even spacing.

use geo::Point;

use crate::geom;
use crate::layout::{placement_valid, Island};

use super::{position_score, PlacementContext};

pub(super) fn place(ctx: &PlacementContext<'_>) -> Vec<Island> {
    let pitch = (ctx.mean_dimension() + 2.0 * ctx.cfg.min_island_spacing).max(1.0);
    let mut candidates: Vec<Point<f64>> = Vec::new();
    let mut y = ctx.bounds.min().y + pitch / 2.0;
    while y < ctx.bounds.max().y {
        let mut x = ctx.bounds.min().x + pitch / 2.0;
        while x < ctx.bounds.max().x {
            candidates.push(Point::new(x, y));
            x += pitch;
        }
        y += pitch;
    }

    let mut placed: Vec<Island> = Vec::new();
    let mut used = vec![false; candidates.len()];
    let mut next_id = 0u32;

    for spec in ctx.specs {
        if placed.iter().map(Island::area).sum::<f64>() >= ctx.target_area {
            break;
        }
        let mut best: Option<(usize, f64, f64, f64)> = None;
        for (i, &center) in candidates.iter().enumerate() {
            if used[i] {
                continue;
            }
            for (w, h) in [(spec.width, spec.height), (spec.height, spec.width)] {
                let rect = geom::rect_from_center(center.x(), center.y(), w, h);
                if !placement_valid(&rect, ctx.usable, &placed, ctx.entrances, ctx.cfg) {
                    continue;
                }
                let score = position_score(center, &placed, ctx);
                let better = match best {
                    Some((_, _, _, best_score)) => score > best_score,
                    None => true,
                };
                if better {
                    best = Some((i, w, h, score));
                }
            }
        }
        if let Some((i, w, h, _)) = best {
            let center = candidates[i];
            placed.push(Island::new(
                next_id,
                geom::rect_from_center(center.x(), center.y(), w, h),
                spec.category,
            ));
            used[i] = true;
            next_id += 1;
        }
    }

    placed
}
