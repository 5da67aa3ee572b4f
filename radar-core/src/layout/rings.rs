// Radial band geometry.
//
// Rings get normalized radial bands whose widths shrink geometrically from the
// innermost ring outward: with diminish factor d, each band is 1/d as wide as
// the one inside it. Boundaries run from 0 (center) to 1 (chart edge).

/// Fraction of a unit radius kept clear on each side of a band, split across rings.
pub const RING_MARGIN: f64 = 0.2;

/// Compute the `ring_count + 1` band boundaries for the given diminish factor.
pub fn radius_bands(ring_count: usize, diminish: f64) -> Vec<f64> {
    if ring_count == 0 {
        return vec![0.0];
    }

    // d^0, d^1, ... normalized to fractions of the full radius
    let mut fractions: Vec<f64> = (0..ring_count).map(|i| diminish.powi(i as i32)).collect();
    let total: f64 = fractions.iter().sum();
    for f in &mut fractions {
        *f /= total;
    }

    // Largest fraction goes to the innermost ring
    fractions.reverse();

    let mut bands = Vec::with_capacity(ring_count + 1);
    bands.push(0.0);
    let mut acc = 0.0;
    for f in fractions {
        acc += f;
        bands.push(acc);
    }
    bands.sort_by(f64::total_cmp);

    // Absorb accumulated rounding so the outermost ring ends exactly at the edge
    if let Some(last) = bands.last_mut() {
        *last = 1.0;
    }
    bands
}

/// Sampling range of one ring after the margins are taken off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialBand {
    /// Inner boundary plus inset.
    pub start: f64,
    /// Usable width, never negative.
    pub span: f64,
    /// True when the insets consumed the whole band and `span` was clamped to 0.
    pub degenerate: bool,
}

impl RadialBand {
    pub fn radius_at(&self, u: f64) -> f64 {
        self.start + u * self.span
    }

    pub fn end(&self) -> f64 {
        self.start + self.span
    }
}

#[derive(Debug, Clone)]
pub struct RingGeometry {
    bands: Vec<f64>,
}

impl RingGeometry {
    pub fn new(ring_count: usize, diminish: f64) -> Self {
        Self { bands: radius_bands(ring_count, diminish) }
    }

    pub fn bands(&self) -> &[f64] {
        &self.bands
    }

    pub fn ring_count(&self) -> usize {
        self.bands.len().saturating_sub(1)
    }

    /// Margin kept on each side of every band.
    pub fn inset(&self) -> f64 {
        RING_MARGIN / self.ring_count().max(1) as f64
    }

    /// Raw `(inner, outer)` boundaries of ring `ring`.
    pub fn boundaries(&self, ring: usize) -> (f64, f64) {
        (self.bands[ring], self.bands[ring + 1])
    }

    pub fn sampling_band(&self, ring: usize) -> RadialBand {
        let (inner, outer) = self.boundaries(ring);
        let inset = self.inset();
        let span = (outer - inner) - 2.0 * inset;
        RadialBand {
            start: inner + inset,
            span: span.max(0.0),
            degenerate: span < 0.0,
        }
    }
}
