//! Island instances, candidate layouts, and the shared placement
//! validity rule.

use geo::{MultiPolygon, Point, Polygon, Rect};

use crate::catalog::SizeCategory;
use crate::config::EngineConfig;
use crate::geom;

/// A placed rectangular island. Instances are never mutated:
/// repositioning produces a new instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Island {
    pub id: u32,
    pub rect: Rect<f64>,
    pub category: SizeCategory,
}

impl Island {
    pub fn new(id: u32, rect: Rect<f64>, category: SizeCategory) -> Self {
        Self { id, rect, category }
    }

    pub fn center(&self) -> Point<f64> {
        geom::rect_center(&self.rect)
    }

    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    pub fn area(&self) -> f64 {
        self.rect.width() * self.rect.height()
    }

    pub fn polygon(&self) -> Polygon<f64> {
        self.rect.to_polygon()
    }

    /// Structural sanity: finite coordinates and positive dimensions.
    pub fn is_well_formed(&self) -> bool {
        let (min, max) = (self.rect.min(), self.rect.max());
        min.x.is_finite()
            && min.y.is_finite()
            && max.x.is_finite()
            && max.y.is_finite()
            && self.rect.width() > 0.0
            && self.rect.height() > 0.0
    }
}

/// An ordered collection of non-overlapping islands over one usable
/// area. Candidates are independent copies with no shared state.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub islands: Vec<Island>,
}

impl Layout {
    pub fn new(islands: Vec<Island>) -> Self {
        Self { islands }
    }

    pub fn len(&self) -> usize {
        self.islands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    /// Sum of island footprint areas.
    pub fn total_area(&self) -> f64 {
        self.islands.iter().map(Island::area).sum()
    }

    /// Fraction of the usable area covered by islands.
    pub fn coverage(&self, usable_area: f64) -> f64 {
        if usable_area > 0.0 {
            self.total_area() / usable_area
        } else {
            0.0
        }
    }
}

/// The validity rule every strategy shares.
///
/// A candidate footprint is placeable when it is fully contained in the
/// usable area, its spacing buffer stays clear of every placed island's
/// buffer (center-to-center gap of twice the spacing), and it keeps the
/// configured clearance from every entrance.
pub fn placement_valid(
    rect: &Rect<f64>,
    usable: &MultiPolygon<f64>,
    placed: &[Island],
    entrances: &[Point<f64>],
    cfg: &EngineConfig,
) -> bool {
    if !geom::contains_rect(usable, rect) {
        return false;
    }
    let required_gap = 2.0 * cfg.min_island_spacing;
    if placed
        .iter()
        .any(|island| geom::rect_distance(rect, &island.rect) < required_gap)
    {
        return false;
    }
    if entrances
        .iter()
        .any(|&entrance| geom::rect_point_distance(rect, entrance) < cfg.entrance_clearance)
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{rect, to_multi};

    fn square_usable() -> MultiPolygon<f64> {
        to_multi(rect(0.0, 0.0, 20.0, 20.0).to_polygon())
    }

    fn island_at(id: u32, min_x: f64, min_y: f64) -> Island {
        Island::new(
            id,
            rect(min_x, min_y, min_x + 2.0, min_y + 2.0),
            SizeCategory::Small,
        )
    }

    #[test]
    fn contained_candidate_is_valid() {
        let cfg = EngineConfig::default();
        let usable = square_usable();
        assert!(placement_valid(
            &rect(1.0, 1.0, 3.0, 3.0),
            &usable,
            &[],
            &[],
            &cfg
        ));
    }

    #[test]
    fn out_of_bounds_candidate_rejected() {
        let cfg = EngineConfig::default();
        let usable = square_usable();
        assert!(!placement_valid(
            &rect(19.0, 19.0, 21.0, 21.0),
            &usable,
            &[],
            &[],
            &cfg
        ));
    }

    #[test]
    fn spacing_buffer_enforced() {
        let cfg = EngineConfig::default();
        let usable = square_usable();
        let placed = vec![island_at(0, 5.0, 5.0)];
        // 0.5 m gap: buffers (0.5 each) would touch/overlap.
        assert!(!placement_valid(
            &rect(7.5, 5.0, 9.5, 7.0),
            &usable,
            &placed,
            &[],
            &cfg
        ));
        // 1.5 m gap: clear of both buffers.
        assert!(placement_valid(
            &rect(8.5, 5.0, 10.5, 7.0),
            &usable,
            &placed,
            &[],
            &cfg
        ));
    }

    #[test]
    fn entrance_clearance_enforced() {
        let cfg = EngineConfig::default();
        let usable = square_usable();
        let entrances = vec![Point::new(4.0, 4.0)];
        assert!(!placement_valid(
            &rect(4.5, 4.5, 6.5, 6.5),
            &usable,
            &[],
            &entrances,
            &cfg
        ));
        assert!(placement_valid(
            &rect(8.0, 8.0, 10.0, 10.0),
            &usable,
            &[],
            &entrances,
            &cfg
        ));
    }

    #[test]
    fn layout_coverage_arithmetic() {
        let layout = Layout::new(vec![island_at(0, 0.0, 0.0), island_at(1, 5.0, 5.0)]);
        assert!((layout.total_area() - 8.0).abs() < 1e-12);
        assert!((layout.coverage(100.0) - 0.08).abs() < 1e-12);
        assert_eq!(layout.coverage(0.0), 0.0);
    }

    #[test]
    fn malformed_island_detected() {
        let island = Island::new(0, rect(0.0, 0.0, 0.0, 2.0), SizeCategory::Small);
        assert!(!island.is_well_formed());
        assert!(island_at(1, 0.0, 0.0).is_well_formed());
    }
}
