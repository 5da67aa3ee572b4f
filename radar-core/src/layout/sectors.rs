use std::f64::consts::TAU;

/// Angular slice owned by one quadrant. Quadrants split the full circle into
/// equal slices in declaration order, starting at angle 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    /// Start angle in radians.
    pub start: f64,
    /// Angular width in radians.
    pub width: f64,
    /// Renderer rotation for this quadrant, in degrees.
    pub rotate_degrees: f64,
}

impl Sector {
    pub fn for_quadrant(index: usize, count: usize) -> Self {
        let count = count.max(1) as f64;
        let width = TAU / count;
        Self {
            start: index as f64 * width,
            width,
            rotate_degrees: index as f64 * 360.0 / count,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    pub fn angle_at(&self, u: f64) -> f64 {
        self.start + u * self.width
    }

    /// Whether `angle` (any winding) falls in `[start, end)`, with `eps` slack for round-off.
    pub fn contains(&self, angle: f64, eps: f64) -> bool {
        let a = angle.rem_euclid(TAU);
        (a >= self.start - eps && a < self.end() + eps)
            // the slice touching 2π also owns angles that wrapped to just above 0
            || (self.end() >= TAU - eps && a < eps)
    }
}
