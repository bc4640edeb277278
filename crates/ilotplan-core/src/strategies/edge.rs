//! Edge-following placement.
//!
//! Walks the boundary of the usable area at a regular arc-length step
//! and drops islands a short way inward from each sampled point,
//! leaving the middle of the floor open for circulation.

use geo::Point;

use crate::geom;
use crate::layout::{placement_valid, Island};

use super::PlacementContext;

/// Inward offsets tried from each boundary anchor, in meters.
const INWARD_OFFSETS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Points sampled every `step` meters along each exterior ring.
fn boundary_anchors(ctx: &PlacementContext<'_>, step: f64) -> Vec<Point<f64>> {
    let mut anchors = Vec::new();
    for part in &ctx.usable.0 {
        let mut next_at = 0.0;
        let mut walked = 0.0;
        for line in part.exterior().lines() {
            let dx = line.end.x - line.start.x;
            let dy = line.end.y - line.start.y;
            let len = (dx * dx + dy * dy).sqrt();
            if len < 1e-9 {
                continue;
            }
            while next_at <= walked + len {
                let t = (next_at - walked) / len;
                anchors.push(Point::new(line.start.x + t * dx, line.start.y + t * dy));
                next_at += step;
            }
            walked += len;
        }
    }
    anchors
}

pub(super) fn place(ctx: &PlacementContext<'_>) -> Vec<Island> {
    let step = (ctx.mean_dimension() + 2.0 * ctx.cfg.min_island_spacing).max(1.0);
    let anchors = boundary_anchors(ctx, step);

    let mut placed: Vec<Island> = Vec::new();
    let mut next_id = 0u32;
    let mut spec_cursor = 0usize;

    'anchors: for anchor in anchors {
        if spec_cursor >= ctx.specs.len() {
            break;
        }
        if placed.iter().map(Island::area).sum::<f64>() >= ctx.target_area {
            break;
        }
        let dx = ctx.centroid.x() - anchor.x();
        let dy = ctx.centroid.y() - anchor.y();
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1e-9 {
            continue;
        }
        let spec = &ctx.specs[spec_cursor];
        for offset in INWARD_OFFSETS {
            // Offset past the island half-diagonal so the footprint
            // clears the boundary.
            let reach = offset + spec.width.max(spec.height) / 2.0;
            let cx = anchor.x() + dx / len * reach;
            let cy = anchor.y() + dy / len * reach;
            for (w, h) in [(spec.width, spec.height), (spec.height, spec.width)] {
                let rect = geom::rect_from_center(cx, cy, w, h);
                if placement_valid(&rect, ctx.usable, &placed, ctx.entrances, ctx.cfg) {
                    placed.push(Island::new(next_id, rect, spec.category));
                    next_id += 1;
                    spec_cursor += 1;
                    continue 'anchors;
                }
            }
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_catalog, expand_to_target};
    use crate::config::EngineConfig;
    use crate::geom::{rect, to_multi};

    #[test]
    fn edge_islands_hug_the_boundary() {
        let cfg = EngineConfig::default();
        let usable = to_multi(rect(0.0, 0.0, 30.0, 30.0).to_polygon());
        let specs = expand_to_target(&build_catalog(&[(2.0, 2.0)]), 40.0);
        let ctx = PlacementContext::new(&usable, &[], &[], &specs, 40.0, &cfg).unwrap();
        let islands = place(&ctx);
        assert!(islands.len() >= 2);
        for island in &islands {
            let bd = geom::boundary_distance(island.center(), &usable);
            assert!(bd < 5.0, "island drifted off the edge: {island:?}");
        }
    }

    #[test]
    fn edge_placement_is_deterministic() {
        let cfg = EngineConfig::default();
        let usable = to_multi(rect(0.0, 0.0, 30.0, 30.0).to_polygon());
        let specs = expand_to_target(&build_catalog(&[(3.0, 2.0)]), 50.0);
        let ctx = PlacementContext::new(&usable, &[], &[], &specs, 50.0, &cfg).unwrap();
        let a = place(&ctx);
        let b = place(&ctx);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.rect, y.rect);
        }
    }
}
