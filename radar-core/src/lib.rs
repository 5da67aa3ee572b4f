//! Blip placement for technology radars.
//!
//! A radar is a disc split into named quadrants (equal angular slices) and
//! named rings (concentric bands, inner rings wider than outer ones). Every
//! item names one ring and one quadrant; this crate picks a point for it inside
//! that band and slice, trying to keep labels from piling up on each other.
//!
//! ```rust,ignore
//! use radar_core::{place, Item, RadarConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaChaRng;
//!
//! let rings = vec!["adopt".into(), "trial".into(), "assess".into(), "hold".into()];
//! let quadrants = vec!["tools".into(), "techniques".into(), "platforms".into(), "languages".into()];
//! let items = vec![Item::new("D3", "tools", "assess")];
//!
//! let placement = place(&items, &rings, &quadrants, &RadarConfig::default(),
//!                       &mut ChaChaRng::seed_from_u64(42))?;
//! ```

mod error;
pub mod setup;
pub mod layout;
pub mod output;
pub mod feed;
mod wasm;

use rand::SeedableRng;
use rand_chacha::ChaChaRng;

pub use error::{Diagnostic, RadarError};
pub use feed::{FeedError, ItemFeed};
pub use layout::{layout_radar, Blip, Placement, PlacementEngine, Point, RadarConfig, RadarLayout, UnitSource};
pub use output::RadarOutput;
pub use setup::{Item, RadarSetup};

/// Place `items` on a radar with the given rings (inner to outer) and quadrants.
///
/// Fails only on an unusable ring/quadrant declaration or config; problems with
/// individual items are reported as diagnostics on the returned placement.
pub fn place<R: UnitSource + ?Sized>(
    items: &[Item],
    rings: &[String],
    quadrants: &[String],
    cfg: &RadarConfig,
    rng: &mut R,
) -> Result<Placement, RadarError> {
    cfg.validate()?;
    let radar = setup::compile(rings, quadrants)?;
    Ok(PlacementEngine::new(&radar, cfg).place(items, rng))
}

/// Parse a radar setup document, lay it out and build the renderer output.
/// Errors end up in `RadarOutput::error` instead of being returned.
pub fn render_radar(input: &str, seed: u64) -> RadarOutput {
    let setup = match RadarSetup::from_json(input) {
        Ok(setup) => setup,
        Err(e) => return RadarOutput::from_error(&RadarError::Setup(e)),
    };
    let mut rng = ChaChaRng::seed_from_u64(seed);
    match layout_radar(&setup, &mut rng) {
        Ok(layout) => RadarOutput::from_layout(&layout),
        Err(e) => RadarOutput::from_error(&e),
    }
}
