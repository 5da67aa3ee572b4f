mod types;
pub mod compile;

pub use types::{Item, RadarSetup, items_from_value, sample_setup};
pub use compile::{compile, Radar, RingId, QuadrantId};
