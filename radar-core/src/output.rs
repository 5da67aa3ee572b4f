//! Output types for the radar renderer.
//!
//! These structs are serialized to JSON and handed to the frontend, which
//! scales the normalized coordinates to pixels and draws them.

use serde::Serialize;

use crate::error::{Diagnostic, RadarError};
use crate::layout::{Blip, RadarConfig, RadarLayout, Sector};

/// One ring band, in normalized radius units.
#[derive(Debug, Clone, Serialize)]
pub struct RingOutput {
    pub name: String,
    pub inner: f64,
    pub outer: f64,
}

/// One quadrant with the blips that belong to it
#[derive(Debug, Clone, Serialize)]
pub struct QuadrantOutput {
    pub name: String,
    pub index: usize,
    /// Rotation the renderer applies to this quadrant's group
    pub rotate_degrees: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blips: Vec<Blip>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

/// The combined output sent to the renderer
#[derive(Debug, Clone, Serialize)]
pub struct RadarOutput {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rings: Vec<RingOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quadrants: Vec<QuadrantOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blips: Vec<Blip>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl RadarOutput {
    pub fn from_layout(layout: &RadarLayout) -> Self {
        let rings = layout
            .radar
            .rings()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let (inner, outer) = layout.geometry.boundaries(i);
                RingOutput { name: name.clone(), inner, outer }
            })
            .collect();

        let count = layout.radar.quadrant_count();
        let quadrants = layout
            .radar
            .quadrants()
            .iter()
            .enumerate()
            .map(|(index, name)| QuadrantOutput {
                name: name.clone(),
                index,
                rotate_degrees: Sector::for_quadrant(index, count).rotate_degrees,
                blips: layout
                    .placement
                    .blips
                    .iter()
                    .filter(|b| &b.quadrant == name)
                    .cloned()
                    .collect(),
            })
            .collect();

        Self {
            width: layout.config.width,
            height: layout.config.height(),
            margin: layout.config.margin,
            rings,
            quadrants,
            blips: layout.placement.blips.clone(),
            diagnostics: layout.placement.diagnostics.clone(),
            error: None,
        }
    }

    pub fn from_error(err: &RadarError) -> Self {
        let cfg = RadarConfig::default();
        Self {
            width: cfg.width,
            height: cfg.height(),
            margin: cfg.margin,
            rings: vec![],
            quadrants: vec![],
            blips: vec![],
            diagnostics: vec![],
            error: Some(ErrorInfo { message: err.to_string() }),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| "{\"error\": {\"message\": \"Serialization error\"}}".to_string())
    }
}
