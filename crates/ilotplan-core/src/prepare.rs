//! Usable-area derivation.
//!
//! The placement stages never look at the raw floor geometry: they work
//! on a single usable multipolygon derived here by carving walls,
//! restricted zones, and entrance clearance buffers out of the envelope.

use geo::{Area, BooleanOps, MultiPolygon, Point, Polygon};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::geom;

/// Raw floor geometry for one optimization request.
#[derive(Debug, Clone, Default)]
pub struct FloorGeometry {
    /// Outer boundary of the floor.
    pub envelope: Vec<Polygon<f64>>,
    /// Wall footprints, subtracted from the envelope.
    pub walls: Vec<Polygon<f64>>,
    /// Zones where nothing may be placed (stairs, technical rooms).
    pub restricted: Vec<Polygon<f64>>,
    /// Entrance positions; each gets a circular clearance buffer.
    pub entrances: Vec<Point<f64>>,
}

impl FloorGeometry {
    /// Rectangular envelope with no obstructions, the common test setup.
    pub fn rectangular(width: f64, height: f64) -> Self {
        Self {
            envelope: vec![geom::rect(0.0, 0.0, width, height).to_polygon()],
            ..Self::default()
        }
    }
}

/// Derive the usable area: envelope minus walls, restricted zones, and
/// entrance buffers, with degenerate inputs dropped up front and small
/// fragments dropped at the end.
///
/// Each subtraction runs through [`geom::repair`] so a slightly invalid
/// input cannot poison the downstream boolean operations. An empty
/// result is returned as-is; the caller degrades to an empty plan.
pub fn derive_usable_area(floor: &FloorGeometry, cfg: &EngineConfig) -> MultiPolygon<f64> {
    let envelope: Vec<Polygon<f64>> = floor
        .envelope
        .iter()
        .filter(|p| geom::sane_polygon(p))
        .cloned()
        .collect();
    let dropped = floor.envelope.len() - envelope.len();
    if dropped > 0 {
        warn!(dropped, "dropped degenerate envelope polygons");
    }
    if envelope.is_empty() {
        warn!("no valid envelope polygons, usable area is empty");
        return MultiPolygon::new(Vec::new());
    }

    let mut usable = geom::repair(&MultiPolygon::new(envelope));

    usable = subtract_all(usable, &floor.walls, "walls");
    usable = subtract_all(usable, &floor.restricted, "restricted zones");

    if !floor.entrances.is_empty() && cfg.entrance_clearance > 0.0 {
        let buffers: Vec<Polygon<f64>> = floor
            .entrances
            .iter()
            .map(|&e| geom::circle(e, cfg.entrance_clearance))
            .collect();
        usable = subtract_all(usable, &buffers, "entrance buffers");
    }

    let before = usable.0.len();
    let kept: Vec<Polygon<f64>> = usable
        .0
        .into_iter()
        .filter(|p| p.unsigned_area() >= cfg.min_fragment_area)
        .collect();
    if kept.len() < before {
        debug!(
            dropped = before - kept.len(),
            min_fragment_area = cfg.min_fragment_area,
            "dropped small usable-area fragments"
        );
    }

    let usable = MultiPolygon::new(kept);
    debug!(
        parts = usable.0.len(),
        area = usable.unsigned_area(),
        "derived usable area"
    );
    usable
}

fn subtract_all(
    usable: MultiPolygon<f64>,
    obstacles: &[Polygon<f64>],
    kind: &str,
) -> MultiPolygon<f64> {
    let sane: Vec<Polygon<f64>> = obstacles
        .iter()
        .filter(|p| geom::sane_polygon(p))
        .cloned()
        .collect();
    let dropped = obstacles.len() - sane.len();
    if dropped > 0 {
        warn!(dropped, kind, "dropped degenerate obstacle polygons");
    }
    if sane.is_empty() {
        return usable;
    }
    let carved = usable.difference(&MultiPolygon::new(sane));
    geom::repair(&carved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::rect;

    #[test]
    fn empty_envelope_yields_empty_usable() {
        let cfg = EngineConfig::default();
        let usable = derive_usable_area(&FloorGeometry::default(), &cfg);
        assert!(usable.0.is_empty());
    }

    #[test]
    fn plain_envelope_keeps_full_area() {
        let cfg = EngineConfig::default();
        let floor = FloorGeometry::rectangular(20.0, 10.0);
        let usable = derive_usable_area(&floor, &cfg);
        assert!((usable.unsigned_area() - 200.0).abs() < 1e-6);
    }

    #[test]
    fn walls_and_restricted_carved_out() {
        let cfg = EngineConfig::default();
        let mut floor = FloorGeometry::rectangular(20.0, 10.0);
        floor.walls.push(rect(9.5, 0.0, 10.5, 10.0).to_polygon());
        floor.restricted.push(rect(0.0, 0.0, 4.0, 4.0).to_polygon());
        let usable = derive_usable_area(&floor, &cfg);
        // 200 − 10 (wall) − 16 (restricted), restricted does not overlap the wall.
        assert!((usable.unsigned_area() - 174.0).abs() < 1e-6);
    }

    #[test]
    fn entrance_buffer_carved_out() {
        let cfg = EngineConfig::default();
        let mut floor = FloorGeometry::rectangular(20.0, 20.0);
        floor.entrances.push(Point::new(10.0, 10.0));
        let usable = derive_usable_area(&floor, &cfg);
        // A 2 m clearance disk (16-gon) removes a bit under π·4 ≈ 12.57 m².
        assert!(usable.unsigned_area() < 400.0 - 11.0);
        assert!(usable.unsigned_area() > 400.0 - 13.0);
    }

    #[test]
    fn small_fragments_dropped() {
        let cfg = EngineConfig::default();
        let mut floor = FloorGeometry::rectangular(20.0, 10.0);
        // L-shaped wall pens a 1.5×1.5 = 2.25 m² corner, below the 4 m² floor.
        floor.walls.push(rect(18.0, 0.0, 18.5, 2.0).to_polygon());
        floor.walls.push(rect(18.0, 1.5, 20.0, 2.0).to_polygon());
        let usable = derive_usable_area(&floor, &cfg);
        for part in &usable.0 {
            assert!(part.unsigned_area() >= cfg.min_fragment_area);
        }
        // Only the big part survives: 200 − 1.75 walls − 2.25 fragment.
        assert!((usable.unsigned_area() - 196.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_inputs_ignored() {
        let cfg = EngineConfig::default();
        let mut floor = FloorGeometry::rectangular(10.0, 10.0);
        floor.walls.push(rect(0.0, 0.0, 0.0, 5.0).to_polygon());
        floor
            .restricted
            .push(rect(f64::NAN, 0.0, 1.0, 1.0).to_polygon());
        let usable = derive_usable_area(&floor, &cfg);
        assert!((usable.unsigned_area() - 100.0).abs() < 1e-6);
    }
}
