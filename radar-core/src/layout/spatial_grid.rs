// Spatial hash grid for proximity queries.
//
// Instead of checking a candidate against every placed blip, points are
// bucketed into cells exactly one tolerance wide and one tolerance tall. Any
// point closer than the tolerance on both axes is then in the candidate's cell
// or one of its eight neighbours.

use std::collections::HashMap;

use super::{Point, Tolerance};

/// Smallest cell edge, so a zero tolerance cannot divide by zero.
const MIN_CELL: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_w: f64,
    cell_h: f64,
    /// Map from cell coordinates to the points inside that cell.
    cells: HashMap<(i64, i64), Vec<Point>>,
}

impl SpatialGrid {
    /// Create a grid whose cells match the given tolerance.
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            cell_w: tolerance.x.max(MIN_CELL),
            cell_h: tolerance.y.max(MIN_CELL),
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, p: Point) -> (i64, i64) {
        ((p.x / self.cell_w).floor() as i64, (p.y / self.cell_h).floor() as i64)
    }

    pub fn insert(&mut self, p: Point) {
        let cell = self.cell_of(p);
        self.cells.entry(cell).or_default().push(p);
    }

    /// Points in the 3x3 block of cells around `p`.
    /// May include points farther than one tolerance; callers do the exact check.
    pub fn query(&self, p: Point) -> Vec<Point> {
        let (cx, cy) = self.cell_of(p);
        let mut result = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(points) = self.cells.get(&(cx + dx, cy + dy)) {
                    result.extend_from_slice(points);
                }
            }
        }
        result
    }

    /// Whether some stored point is strictly within `tolerance` of `p` on both axes.
    pub fn any_within(&self, p: Point, tolerance: Tolerance) -> bool {
        self.query(p).iter().any(|other| tolerance.overlaps(p, *other))
    }

    /// Number of stored points.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}
