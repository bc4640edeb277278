//! Planar geometry helpers shared by the preparation, placement, and
//! corridor stages.
//!
//! Everything works in meters in a shared planar coordinate system.
//! Polygon boolean operations come from `geo`; the axis-aligned distance
//! math is closed-form and does not allocate.

use geo::{
    coord, Area, BooleanOps, BoundingRect, Coord, LineString, MultiPolygon, Point, Polygon, Rect,
};

/// Tolerance for area comparisons, in m².
pub const AREA_EPS: f64 = 1e-6;

/// Segment count for circular-arc approximations (entrance buffers,
/// corridor capsule caps).
const ARC_SEGMENTS: usize = 16;

/// Axis-aligned rectangle from corner coordinates.
pub fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rect<f64> {
    Rect::new(coord! { x: min_x, y: min_y }, coord! { x: max_x, y: max_y })
}

/// Axis-aligned rectangle from a center point and dimensions.
pub fn rect_from_center(cx: f64, cy: f64, width: f64, height: f64) -> Rect<f64> {
    rect(
        cx - width / 2.0,
        cy - height / 2.0,
        cx + width / 2.0,
        cy + height / 2.0,
    )
}

/// Center of a rectangle as a point.
pub fn rect_center(r: &Rect<f64>) -> Point<f64> {
    let c = r.center();
    Point::new(c.x, c.y)
}

/// Euclidean distance between two axis-aligned rectangles (0 when they
/// touch or overlap).
pub fn rect_distance(a: &Rect<f64>, b: &Rect<f64>) -> f64 {
    let dx = (a.min().x - b.max().x).max(b.min().x - a.max().x).max(0.0);
    let dy = (a.min().y - b.max().y).max(b.min().y - a.max().y).max(0.0);
    (dx * dx + dy * dy).sqrt()
}

/// Euclidean distance from a rectangle to a point (0 when inside).
pub fn rect_point_distance(r: &Rect<f64>, p: Point<f64>) -> f64 {
    let cx = p.x().clamp(r.min().x, r.max().x);
    let cy = p.y().clamp(r.min().y, r.max().y);
    let dx = p.x() - cx;
    let dy = p.y() - cy;
    (dx * dx + dy * dy).sqrt()
}

/// Wrap a single polygon as a multipolygon so every boolean operation
/// runs on the same type.
pub fn to_multi(polygon: Polygon<f64>) -> MultiPolygon<f64> {
    MultiPolygon::new(vec![polygon])
}

/// Re-node a multipolygon through a self-union.
///
/// This is the boolean-ops analogue of a zero-width buffer: the overlay
/// backend rebuilds the rings, fixing self-intersections and winding.
pub fn repair(mp: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    if mp.0.is_empty() {
        return MultiPolygon::new(Vec::new());
    }
    mp.union(mp)
}

/// Basic sanity check used before feeding caller-supplied polygons into
/// boolean operations. Degenerate regions are treated as absent.
pub fn sane_polygon(polygon: &Polygon<f64>) -> bool {
    let ring = polygon.exterior();
    ring.0.len() >= 4
        && ring.0.iter().all(|c| c.x.is_finite() && c.y.is_finite())
        && polygon.unsigned_area() > AREA_EPS
}

/// Check that a rectangle lies fully inside the usable area.
///
/// Fast path: when the usable area is a single hole-free rectangular
/// part, containment reduces to bounding-box nesting. General path:
/// clip and compare areas, which is robust against boundary touching.
pub fn contains_rect(usable: &MultiPolygon<f64>, r: &Rect<f64>) -> bool {
    if r.width() <= 0.0 || r.height() <= 0.0 {
        return false;
    }
    if usable.0.len() == 1 && usable.0[0].interiors().is_empty() {
        let part = &usable.0[0];
        if let Some(b) = part.bounding_rect() {
            let box_area = b.width() * b.height();
            if (part.unsigned_area() - box_area).abs() <= AREA_EPS * (1.0 + box_area) {
                return r.min().x >= b.min().x - AREA_EPS
                    && r.min().y >= b.min().y - AREA_EPS
                    && r.max().x <= b.max().x + AREA_EPS
                    && r.max().y <= b.max().y + AREA_EPS;
            }
        }
    }
    let target = r.width() * r.height();
    let clipped = usable.intersection(&to_multi(r.to_polygon()));
    clipped.unsigned_area() >= target - AREA_EPS.max(target * 1e-9)
}

/// Regular polygon approximating a circle, used for clearance buffers
/// around entrance points.
pub fn circle(center: Point<f64>, radius: f64) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = (0..ARC_SEGMENTS)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / ARC_SEGMENTS as f64;
            coord! {
                x: center.x() + radius * theta.cos(),
                y: center.y() + radius * theta.sin(),
            }
        })
        .collect();
    Polygon::new(LineString::new(coords), Vec::new())
}

/// Capsule (stadium) polygon: the segment from `a` to `b` buffered by
/// `half_width`, with approximated semicircular caps.
pub fn capsule(a: Point<f64>, b: Point<f64>, half_width: f64) -> Polygon<f64> {
    let dx = b.x() - a.x();
    let dy = b.y() - a.y();
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-9 {
        return circle(a, half_width);
    }
    let heading = dy.atan2(dx);
    let cap_steps = ARC_SEGMENTS / 2;
    let mut coords = Vec::with_capacity(2 * (cap_steps + 1));
    // Cap behind `a`: sweep from the left side of the heading to the right.
    for k in 0..=cap_steps {
        let theta =
            heading + std::f64::consts::FRAC_PI_2 + std::f64::consts::PI * k as f64 / cap_steps as f64;
        coords.push(coord! {
            x: a.x() + half_width * theta.cos(),
            y: a.y() + half_width * theta.sin(),
        });
    }
    // Cap ahead of `b`: sweep from the right side back to the left.
    for k in 0..=cap_steps {
        let theta =
            heading - std::f64::consts::FRAC_PI_2 + std::f64::consts::PI * k as f64 / cap_steps as f64;
        coords.push(coord! {
            x: b.x() + half_width * theta.cos(),
            y: b.y() + half_width * theta.sin(),
        });
    }
    Polygon::new(LineString::new(coords), Vec::new())
}

/// Minimum distance from a point to the boundary rings of the usable
/// area.
pub fn boundary_distance(p: Point<f64>, usable: &MultiPolygon<f64>) -> f64 {
    let mut min = f64::INFINITY;
    for part in &usable.0 {
        min = min.min(ring_distance(p, part.exterior()));
        for interior in part.interiors() {
            min = min.min(ring_distance(p, interior));
        }
    }
    min
}

fn ring_distance(p: Point<f64>, ring: &LineString<f64>) -> f64 {
    let mut min = f64::INFINITY;
    for line in ring.lines() {
        min = min.min(point_segment_distance(p, line.start, line.end));
    }
    min
}

fn point_segment_distance(p: Point<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq <= 1e-18 {
        0.0
    } else {
        (((p.x() - a.x) * abx + (p.y() - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    };
    let px = a.x + t * abx - p.x();
    let py = a.y + t * aby - p.y();
    (px * px + py * py).sqrt()
}

/// Smallest bounding-box dimension of a multipolygon, 0 when empty.
pub fn min_dimension(mp: &MultiPolygon<f64>) -> f64 {
    mp.bounding_rect()
        .map(|b| b.width().min(b.height()))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_distance_overlapping_is_zero() {
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let b = rect(2.0, 2.0, 6.0, 6.0);
        assert_eq!(rect_distance(&a, &b), 0.0);
    }

    #[test]
    fn rect_distance_axis_gap() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(5.0, 0.0, 7.0, 2.0);
        assert!((rect_distance(&a, &b) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn rect_distance_diagonal_gap() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(4.0, 5.0, 6.0, 7.0);
        // dx = 3, dy = 4 → 5
        assert!((rect_distance(&a, &b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn rect_point_distance_inside_is_zero() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(rect_point_distance(&r, Point::new(5.0, 5.0)), 0.0);
    }

    #[test]
    fn rect_point_distance_outside() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        assert!((rect_point_distance(&r, Point::new(13.0, 14.0)) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn contains_rect_fast_path() {
        let usable = to_multi(rect(0.0, 0.0, 10.0, 10.0).to_polygon());
        assert!(contains_rect(&usable, &rect(1.0, 1.0, 3.0, 3.0)));
        assert!(contains_rect(&usable, &rect(0.0, 0.0, 10.0, 10.0)));
        assert!(!contains_rect(&usable, &rect(8.0, 8.0, 11.0, 9.0)));
    }

    #[test]
    fn contains_rect_general_path() {
        // L-shaped usable area: 10×10 minus the 5×5 top-right corner.
        let outer = to_multi(rect(0.0, 0.0, 10.0, 10.0).to_polygon());
        let notch = to_multi(rect(5.0, 5.0, 10.0, 10.0).to_polygon());
        let usable = outer.difference(&notch);
        assert!(contains_rect(&usable, &rect(1.0, 1.0, 4.0, 4.0)));
        assert!(contains_rect(&usable, &rect(1.0, 6.0, 4.0, 9.0)));
        assert!(!contains_rect(&usable, &rect(6.0, 6.0, 9.0, 9.0)));
    }

    #[test]
    fn circle_area_close_to_exact() {
        let c = circle(Point::new(3.0, 4.0), 2.0);
        let exact = std::f64::consts::PI * 4.0;
        // 16-gon underestimates the disk by a few percent.
        assert!(c.unsigned_area() > exact * 0.95);
        assert!(c.unsigned_area() < exact * 1.001);
    }

    #[test]
    fn capsule_covers_segment_body() {
        let c = capsule(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 1.0);
        // Body rectangle is 10×2 = 20, plus caps ≈ π.
        let area = c.unsigned_area();
        assert!(area > 20.0 && area < 20.0 + std::f64::consts::PI * 1.01);
    }

    #[test]
    fn capsule_degenerate_is_circle() {
        let c = capsule(Point::new(1.0, 1.0), Point::new(1.0, 1.0), 2.0);
        assert!(c.unsigned_area() > 0.0);
    }

    #[test]
    fn boundary_distance_square() {
        let usable = to_multi(rect(0.0, 0.0, 10.0, 10.0).to_polygon());
        let d = boundary_distance(Point::new(5.0, 5.0), &usable);
        assert!((d - 5.0).abs() < 1e-9);
        let d = boundary_distance(Point::new(1.0, 5.0), &usable);
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn repair_keeps_valid_area() {
        let usable = to_multi(rect(0.0, 0.0, 10.0, 10.0).to_polygon());
        let repaired = repair(&usable);
        assert!((repaired.unsigned_area() - 100.0).abs() < 1e-6);
    }
}
