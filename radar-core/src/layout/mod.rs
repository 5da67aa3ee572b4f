// Radar layout.
//
// Places every item of a radar setup as a blip inside its ring band and
// quadrant sector, keeping blips apart where the retry budget allows.
//
// Properties:
// - Normalized output: radius 1.0 is the chart edge; pixel scaling belongs
//   to the renderer
// - Greedy: one item at a time, inner rings first
// - Randomized: draws come from a caller-supplied source, so a fixed source
//   reproduces a layout exactly
// - Always terminates: at most `max_collision_retry` rejected candidates per run
//
// Submodules:
// - rings: radial band boundaries
// - sectors: quadrant angles
// - sampler: candidate points and random sources
// - spatial_grid: O(1) proximity queries
// - collision: tolerance, retry budget, accept/reject
// - placement: the placement loop

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Diagnostic, RadarError};
use crate::setup::{compile, Radar, RadarSetup};

mod spatial_grid;
pub mod rings;
pub mod sectors;
pub mod sampler;
pub mod collision;
pub mod placement;

pub use collision::{CollisionDetector, RetryBudget, Tolerance, MAX_COLLISION_RETRY_COUNT};
pub use placement::{Placement, PlacementEngine, PlacementState};
pub use rings::{radius_bands, RadialBand, RingGeometry};
pub use sampler::{sample_candidate, ScriptedSource, UnitSource};
pub use sectors::Sector;

pub const DEFAULT_WIDTH: f64 = 700.0;
pub const RADIUS_DIMINISH_CONSTANT: f64 = 1.5;
pub const DEFAULT_MARGIN: f64 = 5.0;
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const TOLERANCE_CONSTANT: f64 = 6.0;
/// Chart height relative to its width; the extra room holds the legend.
pub const RIGHT_EXTENSION: f64 = 1.1;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn from_polar(r: f64, t: f64) -> Self {
        Self { x: r * t.cos(), y: r * t.sin() }
    }

    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Polar angle in `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        let t = self.y.atan2(self.x);
        if t < 0.0 { t + std::f64::consts::TAU } else { t }
    }
}

/// A placed item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Blip {
    /// Position in processing order (ring order, then input order).
    pub id: usize,
    pub name: String,
    pub quadrant: String,
    pub x: f64,
    pub y: f64,
}

impl Blip {
    pub fn point(&self) -> Point {
        Point { x: self.x, y: self.y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadarConfig {
    /// Chart width in pixels.
    pub width: f64,
    /// How much narrower each ring is than the one inside it (> 1).
    pub radius_diminish: f64,
    /// Padding around the chart, in pixels. Passed through to the renderer.
    pub margin: f64,
    /// Label font size in pixels; sets the vertical collision tolerance.
    pub font_size: f64,
    /// Scales the horizontal collision tolerance.
    pub tolerance_constant: f64,
    /// Rejected candidates allowed per run before overlaps are accepted.
    pub max_collision_retry: usize,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            radius_diminish: RADIUS_DIMINISH_CONSTANT,
            margin: DEFAULT_MARGIN,
            font_size: DEFAULT_FONT_SIZE,
            tolerance_constant: TOLERANCE_CONSTANT,
            max_collision_retry: MAX_COLLISION_RETRY_COUNT,
        }
    }
}

impl RadarConfig {
    pub fn validate(&self) -> Result<(), RadarError> {
        if !(self.radius_diminish.is_finite() && self.radius_diminish > 1.0) {
            return Err(RadarError::InvalidDiminish(self.radius_diminish));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(RadarError::InvalidWidth(self.width));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(RadarError::InvalidFontSize(self.font_size));
        }
        if !(self.tolerance_constant.is_finite() && self.tolerance_constant >= 0.0) {
            return Err(RadarError::InvalidToleranceConstant(self.tolerance_constant));
        }
        Ok(())
    }

    pub fn height(&self) -> f64 {
        self.width * RIGHT_EXTENSION
    }

    pub fn tolerance(&self, ring_count: usize) -> Tolerance {
        Tolerance::for_chart(self.width, ring_count, self.font_size, self.tolerance_constant)
    }
}

/// A laid out radar: the compiled ring/quadrant sets, their geometry and the placed blips.
#[derive(Debug, Clone)]
pub struct RadarLayout {
    pub radar: Radar,
    pub config: RadarConfig,
    pub geometry: RingGeometry,
    pub placement: Placement,
}

/// Lay out a full radar setup from scratch.
pub fn layout_radar<R: UnitSource + ?Sized>(setup: &RadarSetup, rng: &mut R) -> Result<RadarLayout, RadarError> {
    setup.config.validate()?;
    let radar = compile(&setup.rings, &setup.quadrants)?;

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let items = setup.items(&mut diagnostics);

    let engine = PlacementEngine::new(&radar, &setup.config);
    let mut placement = engine.place(&items, rng);
    let geometry = engine.geometry().clone();

    diagnostics.append(&mut placement.diagnostics);
    placement.diagnostics = diagnostics;

    info!(
        blips = placement.blips.len(),
        retries = placement.collision_retries,
        diagnostics = placement.diagnostics.len(),
        "radar laid out"
    );

    Ok(RadarLayout {
        radar,
        config: setup.config.clone(),
        geometry,
        placement,
    })
}
