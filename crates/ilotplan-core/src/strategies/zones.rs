//! Accessibility-zone placement.
//!
//! Divides the floor into coarse square zones, scores each zone by how
//! well it is served (entrance proximity, travel distance, restricted
//! neighbors), then fills zones best-first with a local grid. Poorly
//! served zones only get islands once the good ones are full.

use geo::{Area, BooleanOps, EuclideanDistance, Point};

use crate::geom;
use crate::layout::{placement_valid, Island};

use super::PlacementContext;

/// Zone edge length in meters.
const ZONE_SIZE: f64 = 10.0;

/// Minimum usable fraction for a zone to be considered at all.
const MIN_ZONE_COVERAGE: f64 = 0.5;

struct Zone {
    bounds: geo::Rect<f64>,
    score: f64,
}

fn score_zones(ctx: &PlacementContext<'_>) -> Vec<Zone> {
    let mut zones = Vec::new();
    let mut y = ctx.bounds.min().y;
    while y < ctx.bounds.max().y {
        let mut x = ctx.bounds.min().x;
        while x < ctx.bounds.max().x {
            let bounds = geom::rect(x, y, x + ZONE_SIZE, y + ZONE_SIZE);
            x += ZONE_SIZE;

            let cell = geom::to_multi(bounds.to_polygon());
            let covered = ctx.usable.intersection(&cell).unsigned_area();
            if covered < MIN_ZONE_COVERAGE * ZONE_SIZE * ZONE_SIZE {
                continue;
            }

            let center = geom::rect_center(&bounds);
            let mut score = 1.0;
            if !ctx.entrances.is_empty() {
                let nearest = ctx
                    .entrances
                    .iter()
                    .map(|&e| {
                        let dx = e.x() - center.x();
                        let dy = e.y() - center.y();
                        (dx * dx + dy * dy).sqrt()
                    })
                    .fold(f64::INFINITY, f64::min);
                // An entrance inside the zone consumes it for circulation.
                if nearest < ZONE_SIZE / 2.0 {
                    score -= 0.5;
                }
                if nearest > ctx.cfg.max_travel_distance {
                    score -= 0.3;
                }
            }
            let zone_poly = bounds.to_polygon();
            if ctx
                .restricted
                .iter()
                .any(|r| r.euclidean_distance(&zone_poly) < ctx.cfg.min_clearance)
            {
                score -= 0.4;
            }
            zones.push(Zone { bounds, score });
        }
        y += ZONE_SIZE;
    }
    // Stable sort: equal-score zones keep scan order.
    zones.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    zones
}

pub(super) fn place(ctx: &PlacementContext<'_>) -> Vec<Island> {
    let zones = score_zones(ctx);
    let pitch = (ctx.mean_dimension() + 2.0 * ctx.cfg.min_island_spacing).max(1.0);

    let mut placed: Vec<Island> = Vec::new();
    let mut next_id = 0u32;
    let mut spec_cursor = 0usize;

    'zones: for zone in &zones {
        let mut cy = zone.bounds.min().y + pitch / 2.0;
        while cy < zone.bounds.max().y {
            let mut cx = zone.bounds.min().x + pitch / 2.0;
            while cx < zone.bounds.max().x {
                if spec_cursor >= ctx.specs.len()
                    || placed.iter().map(Island::area).sum::<f64>() >= ctx.target_area
                {
                    break 'zones;
                }
                let spec = &ctx.specs[spec_cursor];
                let candidate = Point::new(cx, cy);
                cx += pitch;
                for (w, h) in [(spec.width, spec.height), (spec.height, spec.width)] {
                    let rect = geom::rect_from_center(candidate.x(), candidate.y(), w, h);
                    if placement_valid(&rect, ctx.usable, &placed, ctx.entrances, ctx.cfg) {
                        placed.push(Island::new(next_id, rect, spec.category));
                        next_id += 1;
                        spec_cursor += 1;
                        break;
                    }
                }
            }
            cy += pitch;
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
    fn zones_prefer_entrance_served_regions() {
        let ctx_cfg = EngineConfig::default();
        let usable = to_multi(rect(0.0, 0.0, 40.0, 10.0).to_polygon());
        let specs = build_catalog(&[(2.0, 2.0)]);
        let entrances = [Point::new(2.0, 5.0)];
        let ctx =
            PlacementContext::new(&usable, &entrances, &[], &specs, 20.0, &ctx_cfg).unwrap();
        let zones = score_zones(&ctx);
        assert_eq!(zones.len(), 4);
        // The far-right zone is beyond the 30 m travel distance and the
        // entrance zone is consumed, so the best zone sits in between.
        let center = geom::rect_center(&zones[0].bounds);
        assert!(center.x() > 10.0 && center.x() < 30.0, "best zone at {center:?}");
    }

    #[test]
    fn restricted_zones_scored_down() {
        let cfg = EngineConfig::default();
        let usable = to_multi(rect(0.0, 0.0, 20.0, 10.0).to_polygon());
        let specs = build_catalog(&[(2.0, 2.0)]);
        let restricted = [rect(0.0, 0.0, 8.0, 10.0).to_polygon()];
        let ctx =
            PlacementContext::new(&usable, &[], &restricted, &specs, 20.0, &cfg).unwrap();
        let zones = score_zones(&ctx);
        assert_eq!(zones.len(), 2);
        let best_center = geom::rect_center(&zones[0].bounds);
        assert!(best_center.x() > 10.0, "clean zone should rank first");
    }

    #[test]
    fn zone_fill_places_valid_islands() {
        let cfg = EngineConfig::default();
        let usable = to_multi(rect(0.0, 0.0, 30.0, 30.0).to_polygon());
        let specs = expand_to_target(&build_catalog(&[(2.0, 2.0)]), 60.0);
        let ctx = PlacementContext::new(&usable, &[], &[], &specs, 60.0, &cfg).unwrap();
        let islands = place(&ctx);
        assert!(!islands.is_empty());
        for island in &islands {
            assert!(geom::contains_rect(&usable, &island.rect));
        }
    }
}
