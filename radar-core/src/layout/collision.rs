// Collision detection with a bounded retry budget.
//
// A candidate collides when some already placed blip (any ring, any quadrant)
// is closer than the tolerance on both axes. The retry budget is shared by a
// whole placement run: once it is spent, every candidate is accepted, so a
// dense radar still terminates, just with visible overlaps.

use super::Point;
use super::placement::PlacementState;

/// Total collision-triggered resamples allowed in one placement run.
pub const MAX_COLLISION_RETRY_COUNT: usize = 350;

/// Per-axis separation below which two blips count as overlapping, in
/// normalized chart units (1.0 = chart radius).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub x: f64,
    pub y: f64,
}

impl Tolerance {
    /// Derive tolerances from chart dimensions given in pixels.
    ///
    /// Horizontally a blip reserves `width / rings / 100 * constant * 4` pixels
    /// (room for its label); vertically one line of text. Both are converted
    /// to normalized units by dividing by the chart radius (`width / 2`).
    pub fn for_chart(width: f64, ring_count: usize, font_size: f64, tolerance_constant: f64) -> Self {
        let radius = width / 2.0;
        let x_px = width / ring_count.max(1) as f64 / 100.0 * tolerance_constant * 4.0;
        Self {
            x: x_px / radius,
            y: font_size / radius,
        }
    }

    pub fn overlaps(&self, a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < self.x && (a.y - b.y).abs() < self.y
    }
}

/// Run-wide count of rejected candidates.
#[derive(Debug, Clone)]
pub struct RetryBudget {
    used: usize,
    max: usize,
}

impl RetryBudget {
    pub fn new(max: usize) -> Self {
        Self { used: 0, max }
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn exhausted(&self) -> bool {
        self.used >= self.max
    }

    pub fn record_rejection(&mut self) {
        if !self.exhausted() {
            self.used += 1;
        }
    }
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self::new(MAX_COLLISION_RETRY_COUNT)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CollisionDetector {
    tolerance: Tolerance,
}

impl CollisionDetector {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// True iff the budget still has room and `candidate` overlaps a placed blip.
    pub fn rejects(&self, candidate: Point, state: &PlacementState, budget: &RetryBudget) -> bool {
        if budget.exhausted() {
            return false;
        }
        state.any_within(candidate, self.tolerance)
    }
}
