use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::Diagnostic;
use crate::layout::RadarConfig;

/// One entry to put on the radar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub quadrant: String,
    pub ring: String,
}

impl Item {
    pub fn new(name: &str, quadrant: &str, ring: &str) -> Self {
        Self {
            name: name.to_string(),
            quadrant: quadrant.to_string(),
            ring: ring.to_string(),
        }
    }
}

/// The radar setup document handed over by the host.
///
/// ```json
/// { "rings": ["adopt", "trial"], "quadrants": ["tools", "languages"],
///   "data": [{ "name": "D3", "quadrant": "tools", "ring": "trial" }],
///   "width": 700, "radiusDiminish": 1.5, "fontSize": 12 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarSetup {
    /// Inner to outer.
    #[serde(default)]
    pub rings: Vec<String>,
    /// In angular order, starting at angle 0.
    #[serde(default)]
    pub quadrants: Vec<String>,
    /// Raw item list. Kept untyped so a non-array payload degrades to an
    /// empty radar instead of failing the whole setup.
    #[serde(default)]
    pub data: Value,
    #[serde(flatten)]
    pub config: RadarConfig,
}

impl RadarSetup {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Typed view of `data`; see [`items_from_value`].
    pub fn items(&self, diagnostics: &mut Vec<Diagnostic>) -> Vec<Item> {
        items_from_value(&self.data, diagnostics)
    }
}

/// Extract items from a raw JSON payload.
///
/// - `null` (no data yet) yields no items.
/// - Any other non-array value yields no items and an `InvalidInputShape` diagnostic.
/// - Array elements that are not item objects are skipped with `MalformedItem`.
pub fn items_from_value(value: &Value, diagnostics: &mut Vec<Diagnostic>) -> Vec<Item> {
    let entries = match value {
        Value::Null => return Vec::new(),
        Value::Array(entries) => entries,
        _ => {
            warn!("radar data is not an array, treating it as empty");
            diagnostics.push(Diagnostic::InvalidInputShape);
            return Vec::new();
        }
    };

    let mut items = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match Item::deserialize(entry) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed radar item");
                diagnostics.push(Diagnostic::MalformedItem { index });
            }
        }
    }
    items
}

/// The setup shipped with the original radar app.
pub fn sample_setup() -> RadarSetup {
    let strings = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let data = vec![
        Item::new("D3", "tools", "assess"),
        Item::new("TypeScript", "languages", "trial"),
        Item::new("Storybook", "tools", "adopt"),
        Item::new("JavaScript", "languages", "hold"),
    ];
    RadarSetup {
        rings: strings(&["adopt", "trial", "assess", "hold"]),
        quadrants: strings(&["tools", "techniques", "platforms", "languages"]),
        data: serde_json::to_value(data).unwrap_or(Value::Null),
        config: RadarConfig::default(),
    }
}
