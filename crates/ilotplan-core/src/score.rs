//! Layout scoring.
//!
//! Every candidate layout is judged on four axes: how close its coverage
//! lands to the target, how accessible it leaves entrances and
//! circulation gaps, how evenly islands spread out, and how badly
//! footprints overlap. The same functions feed both the evolutionary
//! fitness and the final strategy selection.

use geo::Point;

use crate::config::EngineConfig;
use crate::geom;
use crate::layout::Island;

/// 1 at exact target coverage, linearly decaying to 0.
pub fn coverage_match(actual: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (1.0 - (actual - target).abs() / target).max(0.0)
}

/// Accessibility score in [0, 1].
///
/// Starts at 1.0; loses 0.1 per island closer than the entrance
/// clearance to any entrance and 0.05 per island pair closer than the
/// minimum clearance. An empty layout scores 0.
pub fn accessibility(islands: &[Island], entrances: &[Point<f64>], cfg: &EngineConfig) -> f64 {
    if islands.is_empty() {
        return 0.0;
    }
    let mut score: f64 = 1.0;
    for island in islands {
        let too_close = entrances
            .iter()
            .any(|&e| geom::rect_point_distance(&island.rect, e) < cfg.entrance_clearance);
        if too_close {
            score -= 0.1;
        }
    }
    for (i, a) in islands.iter().enumerate() {
        for b in &islands[i + 1..] {
            if geom::rect_distance(&a.rect, &b.rect) < cfg.min_clearance {
                score -= 0.05;
            }
        }
    }
    score.max(0.0)
}

/// Spatial distribution score: 1 − normalized variance of pairwise
/// center distances. A layout with ≤1 island scores 1.
pub fn distribution(islands: &[Island]) -> f64 {
    if islands.len() < 2 {
        return 1.0;
    }
    let centers: Vec<Point<f64>> = islands.iter().map(Island::center).collect();
    let mut distances = Vec::with_capacity(centers.len() * (centers.len() - 1) / 2);
    for (i, a) in centers.iter().enumerate() {
        for b in &centers[i + 1..] {
            let dx = a.x() - b.x();
            let dy = a.y() - b.y();
            distances.push((dx * dx + dy * dy).sqrt());
        }
    }
    let mean = distances.iter().sum::<f64>() / distances.len() as f64;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance =
        distances.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / distances.len() as f64;
    (1.0 - variance / (mean * mean)).max(0.0)
}

/// Sum over overlapping pairs of intersection area divided by the
/// smaller island's area.
pub fn overlap_penalty(islands: &[Island]) -> f64 {
    let mut penalty = 0.0;
    for (i, a) in islands.iter().enumerate() {
        for b in &islands[i + 1..] {
            let overlap = rect_overlap_area(a, b);
            if overlap > 0.0 {
                let smaller = a.area().min(b.area());
                if smaller > 0.0 {
                    penalty += overlap / smaller;
                }
            }
        }
    }
    penalty
}

/// Intersection area of two axis-aligned island footprints.
pub fn rect_overlap_area(a: &Island, b: &Island) -> f64 {
    let ox = (a.rect.max().x.min(b.rect.max().x) - a.rect.min().x.max(b.rect.min().x)).max(0.0);
    let oy = (a.rect.max().y.min(b.rect.max().y) - a.rect.min().y.max(b.rect.min().y)).max(0.0);
    ox * oy
}

/// Evolutionary fitness: 0.4 coverage-match + 0.3 accessibility
/// + 0.2 distribution − 0.1 overlap penalty, floored at 0.
pub fn fitness(
    islands: &[Island],
    usable_area: f64,
    target_coverage: f64,
    entrances: &[Point<f64>],
    cfg: &EngineConfig,
) -> f64 {
    let actual = if usable_area > 0.0 {
        islands.iter().map(Island::area).sum::<f64>() / usable_area
    } else {
        0.0
    };
    let value = 0.4 * coverage_match(actual, target_coverage)
        + 0.3 * accessibility(islands, entrances, cfg)
        + 0.2 * distribution(islands)
        - 0.1 * overlap_penalty(islands);
    value.max(0.0)
}

/// Strategy-selection composite: 0.6 coverage-match + 0.4 accessibility.
pub fn composite(coverage_match: f64, accessibility: f64) -> f64 {
    0.6 * coverage_match + 0.4 * accessibility
}
