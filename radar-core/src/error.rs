//! Error and diagnostic types.
//!
//! `RadarError` stops a single layout call (bad ring/quadrant declarations,
//! unusable config, unreadable setup JSON). `Diagnostic` records anomalies the
//! layout recovered from; they travel with the output instead of aborting it.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadarError {
    #[error("at least one ring is required")]
    NoRings,
    #[error("at least one quadrant is required")]
    NoQuadrants,
    #[error("ring '{0}' is declared more than once")]
    DuplicateRing(String),
    #[error("quadrant '{0}' is declared more than once")]
    DuplicateQuadrant(String),
    #[error("radius diminish factor must be a finite number greater than 1, got {0}")]
    InvalidDiminish(f64),
    #[error("chart width must be a positive number, got {0}")]
    InvalidWidth(f64),
    #[error("font size must be a positive number, got {0}")]
    InvalidFontSize(f64),
    #[error("tolerance constant must be a finite number of at least 0, got {0}")]
    InvalidToleranceConstant(f64),
    #[error("malformed radar setup: {0}")]
    Setup(#[from] serde_json::Error),
}

/// A non-fatal anomaly found while placing blips.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// `data` was not an array; it was treated as empty.
    InvalidInputShape,
    /// Array element at `index` is not an item object and was skipped.
    MalformedItem { index: usize },
    /// Item names a ring that is not declared. Sorted first, placed in the innermost band.
    UnknownRing { name: String, ring: String },
    /// Item names a quadrant that is not declared. The item is not placed.
    UnknownQuadrant { name: String, quadrant: String },
    /// The ring band is narrower than its two insets; every blip sits at the inner inset.
    DegenerateBand { ring: String },
    /// Collision checking switched off while placing the item at processing index `at`.
    RetryBudgetExhausted { at: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidInputShape => write!(f, "data is not an array"),
            Diagnostic::MalformedItem { index } => {
                write!(f, "data[{}] is not a {{name, quadrant, ring}} object", index)
            }
            Diagnostic::UnknownRing { name, ring } => {
                write!(f, "'{}' references unknown ring '{}'", name, ring)
            }
            Diagnostic::UnknownQuadrant { name, quadrant } => {
                write!(f, "'{}' references unknown quadrant '{}'", name, quadrant)
            }
            Diagnostic::DegenerateBand { ring } => {
                write!(f, "ring '{}' is too narrow for its margins", ring)
            }
            Diagnostic::RetryBudgetExhausted { at } => {
                write!(f, "collision retry budget exhausted at blip {}", at)
            }
        }
    }
}
