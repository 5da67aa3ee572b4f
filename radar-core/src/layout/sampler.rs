// Candidate sampling.
//
// A candidate is drawn uniformly in (radius, angle) inside a ring band and a
// quadrant sector, then converted to planar coordinates. Every retry draws a
// fresh candidate; nothing is nudged.
//
// Randomness comes through `UnitSource` so callers decide where draws come
// from: any `rand::Rng` in production, a fixed script in tests.

use rand::Rng;

use super::Point;
use super::rings::RadialBand;
use super::sectors::Sector;

/// A stream of uniform draws in `[0, 1)`.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng> UnitSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
///
/// Values are clamped into `[0, 1)`. An empty script always yields 0.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, next: 0 }
    }

    /// Number of draws handed out so far.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl UnitSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let u = self.draws[self.next % self.draws.len()];
        self.next += 1;
        if u.is_nan() {
            0.0
        } else {
            u.clamp(0.0, 1.0 - f64::EPSILON)
        }
    }
}

/// Draw one candidate point. The radius draw comes first, then the angle draw.
pub fn sample_candidate<R: UnitSource + ?Sized>(band: RadialBand, sector: Sector, rng: &mut R) -> Point {
    let r = band.radius_at(rng.next_unit());
    let t = sector.angle_at(rng.next_unit());
    Point::from_polar(r, t)
}
