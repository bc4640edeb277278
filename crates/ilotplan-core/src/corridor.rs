//! Corridor network synthesis.
//!
//! Two corridor sources: bands between facing island rows, and
//! minimum-spanning-tree links that stitch the remaining components
//! together. Row corridors come first; the MST only adds what row
//! corridors left disconnected.

use geo::{Area, BooleanOps, MultiPolygon, Polygon};
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::geom;
use crate::layout::Island;

/// What a corridor connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Connection {
    /// Band between two facing rows, by row index.
    Rows { a: usize, b: usize },
    /// Spanning-tree link between two islands, by island id.
    Islands { a: u32, b: u32 },
}

/// One synthesized corridor.
#[derive(Debug, Clone)]
pub struct Corridor {
    pub geometry: MultiPolygon<f64>,
    pub width: f64,
    pub area: f64,
    pub connects: Connection,
}

/// The full circulation network for a layout.
#[derive(Debug, Clone)]
pub struct CorridorNetwork {
    pub corridors: Vec<Corridor>,
    /// Whether every island ends up in one circulation component.
    pub fully_connected: bool,
}

impl CorridorNetwork {
    pub fn total_area(&self) -> f64 {
        self.corridors.iter().map(|c| c.area).sum()
    }
}

/// A horizontal row of islands with near-equal center heights.
#[derive(Debug, Clone)]
pub struct Row {
    /// Indices into the layout's island list, in x order.
    pub members: Vec<usize>,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Group islands into rows by center height.
///
/// Islands are scanned in (center-y, id) order; an island joins the
/// open row while its center stays within the tolerance of the last
/// member added, so a chain of small steps keeps one row. Groups of
/// one are discarded.
pub fn detect_rows(islands: &[Island], tolerance: f64) -> Vec<Row> {
    if islands.len() < 2 {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..islands.len()).collect();
    order.sort_by(|&i, &j| {
        let yi = islands[i].center().y();
        let yj = islands[j].center().y();
        yi.partial_cmp(&yj)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(islands[i].id.cmp(&islands[j].id))
    });

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut last_y = f64::NEG_INFINITY;
    for idx in order {
        let cy = islands[idx].center().y();
        // Centers come sorted ascending, so cy - last_y is the step up.
        match groups.last_mut() {
            Some(group) if cy - last_y <= tolerance => group.push(idx),
            _ => groups.push(vec![idx]),
        }
        last_y = cy;
    }

    groups
        .into_iter()
        .filter(|g| g.len() >= 2)
        .map(|mut members| {
            members.sort_by(|&i, &j| {
                islands[i]
                    .center()
                    .x()
                    .partial_cmp(&islands[j].center().x())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let mut row = Row {
                members,
                min_x: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                min_y: f64::INFINITY,
                max_y: f64::NEG_INFINITY,
            };
            for &i in &row.members.clone() {
                let r = &islands[i].rect;
                row.min_x = row.min_x.min(r.min().x);
                row.max_x = row.max_x.max(r.max().x);
                row.min_y = row.min_y.min(r.min().y);
                row.max_y = row.max_y.max(r.max().y);
            }
            row
        })
        .collect()
}

/// Band corridor between two facing rows, or `None` when they do not
/// face each other across a walkable gap.
fn row_corridor(
    rows: &[Row],
    a: usize,
    b: usize,
    usable: &MultiPolygon<f64>,
    cfg: &EngineConfig,
) -> Option<Corridor> {
    let (lower, upper) = if rows[a].max_y <= rows[b].min_y {
        (a, b)
    } else {
        (b, a)
    };
    let gap = rows[upper].min_y - rows[lower].max_y;
    if gap < cfg.min_row_separation {
        return None;
    }
    let x_lo = rows[a].min_x.max(rows[b].min_x);
    let x_hi = rows[a].max_x.min(rows[b].max_x);
    if x_hi - x_lo <= 0.0 {
        return None;
    }

    let mut band = geom::rect(x_lo, rows[lower].max_y, x_hi, rows[upper].min_y);
    let mut clipped = usable.intersection(&geom::to_multi(band.to_polygon()));
    if clipped.unsigned_area() <= geom::AREA_EPS {
        return None;
    }
    // Widen a band thinner than the corridor width symmetrically around
    // its own center, then clip again.
    if geom::min_dimension(&clipped) < cfg.corridor_width {
        let c = band.center();
        let w = band.width().max(cfg.corridor_width);
        let h = band.height().max(cfg.corridor_width);
        band = geom::rect_from_center(c.x, c.y, w, h);
        clipped = usable.intersection(&geom::to_multi(band.to_polygon()));
        if clipped.unsigned_area() <= geom::AREA_EPS {
            return None;
        }
    }

    Some(Corridor {
        area: clipped.unsigned_area(),
        geometry: clipped,
        width: cfg.corridor_width,
        connects: Connection::Rows { a, b },
    })
}

/// Synthesize the corridor network for a placed layout.
///
/// Row bands are generated between every facing row pair, then a
/// deterministic Kruskal pass links whatever components remain, using
/// capsules between island centers. Layouts of fewer than two islands
/// get no corridors and count as connected.
pub fn synthesize(
    islands: &[Island],
    usable: &MultiPolygon<f64>,
    cfg: &EngineConfig,
) -> CorridorNetwork {
    let n = islands.len();
    if n < 2 {
        return CorridorNetwork {
            corridors: Vec::new(),
            fully_connected: true,
        };
    }

    let rows = detect_rows(islands, cfg.row_tolerance);
    // The circulation graph mirrors the union-find; the union-find
    // drives Kruskal, the graph answers the final connectivity check.
    let mut circulation: UnGraph<u32, ()> = UnGraph::new_undirected();
    let nodes: Vec<NodeIndex> = islands.iter().map(|i| circulation.add_node(i.id)).collect();
    let mut components: UnionFind<usize> = UnionFind::new(n);
    for row in &rows {
        for pair in row.members.windows(2) {
            components.union(pair[0], pair[1]);
            circulation.add_edge(nodes[pair[0]], nodes[pair[1]], ());
        }
    }

    let mut corridors = Vec::new();
    // Any two rows can face each other: an intervening row with a
    // disjoint x-range does not block the band.
    for a in 0..rows.len() {
        for b in a + 1..rows.len() {
            if let Some(corridor) = row_corridor(&rows, a, b, usable, cfg) {
                components.union(rows[a].members[0], rows[b].members[0]);
                circulation.add_edge(nodes[rows[a].members[0]], nodes[rows[b].members[0]], ());
                corridors.push(corridor);
            }
        }
    }

    // Candidate spanning-tree edges, shortest first with a stable
    // index tie-break.
    let mut edges: Vec<(f64, usize, usize)> = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            let ci = islands[i].center();
            let cj = islands[j].center();
            let dx = ci.x() - cj.x();
            let dy = ci.y() - cj.y();
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= cfg.max_connection_distance {
                edges.push((dist, i, j));
            }
        }
    }
    edges.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    let footprints = MultiPolygon::new(
        islands.iter().map(Island::polygon).collect::<Vec<Polygon<f64>>>(),
    );
    for (_, i, j) in edges {
        if components.find(i) == components.find(j) {
            continue;
        }
        components.union(i, j);
        circulation.add_edge(nodes[i], nodes[j], ());
        let capsule = geom::capsule(
            islands[i].center(),
            islands[j].center(),
            cfg.corridor_width / 2.0,
        );
        let clipped = usable
            .intersection(&geom::to_multi(capsule))
            .difference(&footprints);
        if clipped.unsigned_area() <= geom::AREA_EPS {
            continue;
        }
        corridors.push(Corridor {
            area: clipped.unsigned_area(),
            geometry: clipped,
            width: cfg.corridor_width,
            connects: Connection::Islands {
                a: islands[i].id,
                b: islands[j].id,
            },
        });
    }

    let fully_connected = connected_components(&circulation) == 1;
    if !fully_connected {
        warn!(
            islands = n,
            corridors = corridors.len(),
            "circulation network is disconnected"
        );
    }
    debug!(
        corridors = corridors.len(),
        rows = rows.len(),
        fully_connected,
        "synthesized corridor network"
    );

    CorridorNetwork {
        corridors,
        fully_connected,
    }
}
