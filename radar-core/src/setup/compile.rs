//
// Compile step: declared ring/quadrant names -> Radar (index-friendly IR)
//
// What this does:
// - Rejects empty ring or quadrant sets
// - Enforces uniqueness of ring names and of quadrant names
// - Assigns RingId / QuadrantId in declaration order
//
// Declaration order is semantic: ring 0 is the innermost band and is processed
// first; quadrant 0 starts at angle 0.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::RadarError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RingId(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QuadrantId(pub usize);

#[derive(Debug, Clone)]
pub struct Radar {
    rings: Vec<String>,
    quadrants: Vec<String>,
    ring_by_name: HashMap<String, RingId>,
    quadrant_by_name: HashMap<String, QuadrantId>,
}

impl Radar {
    pub fn rings(&self) -> &[String] {
        &self.rings
    }

    pub fn quadrants(&self) -> &[String] {
        &self.quadrants
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn quadrant_count(&self) -> usize {
        self.quadrants.len()
    }

    pub fn ring_id(&self, name: &str) -> Option<RingId> {
        self.ring_by_name.get(name).copied()
    }

    pub fn quadrant_id(&self, name: &str) -> Option<QuadrantId> {
        self.quadrant_by_name.get(name).copied()
    }

    pub fn ring_name(&self, ring: RingId) -> &str {
        &self.rings[ring.0]
    }

    pub fn quadrant_name(&self, quadrant: QuadrantId) -> &str {
        &self.quadrants[quadrant.0]
    }
}

pub fn compile(rings: &[String], quadrants: &[String]) -> Result<Radar, RadarError> {
    if rings.is_empty() {
        return Err(RadarError::NoRings);
    }
    if quadrants.is_empty() {
        return Err(RadarError::NoQuadrants);
    }

    let mut ring_by_name = HashMap::with_capacity(rings.len());
    for (i, name) in rings.iter().enumerate() {
        if ring_by_name.insert(name.clone(), RingId(i)).is_some() {
            return Err(RadarError::DuplicateRing(name.clone()));
        }
    }

    let mut quadrant_by_name = HashMap::with_capacity(quadrants.len());
    for (i, name) in quadrants.iter().enumerate() {
        if quadrant_by_name.insert(name.clone(), QuadrantId(i)).is_some() {
            return Err(RadarError::DuplicateQuadrant(name.clone()));
        }
    }

    Ok(Radar {
        rings: rings.to_vec(),
        quadrants: quadrants.to_vec(),
        ring_by_name,
        quadrant_by_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compile_assigns_ids_in_order() {
        let radar = compile(
            &names(&["adopt", "trial", "assess", "hold"]),
            &names(&["tools", "techniques", "platforms", "languages"]),
        )
        .unwrap();

        assert_eq!(radar.ring_count(), 4);
        assert_eq!(radar.quadrant_count(), 4);
        assert_eq!(radar.ring_id("adopt"), Some(RingId(0)));
        assert_eq!(radar.ring_id("hold"), Some(RingId(3)));
        assert_eq!(radar.quadrant_id("languages"), Some(QuadrantId(3)));
        assert_eq!(radar.ring_id("later"), None);
        assert_eq!(radar.ring_name(RingId(2)), "assess");
        assert_eq!(radar.quadrant_name(QuadrantId(1)), "techniques");
    }

    #[test]
    fn test_compile_rejects_empty_sets() {
        assert!(matches!(compile(&[], &names(&["tools"])), Err(RadarError::NoRings)));
        assert!(matches!(compile(&names(&["adopt"]), &[]), Err(RadarError::NoQuadrants)));
    }

    #[test]
    fn test_compile_rejects_duplicates() {
        let err = compile(&names(&["adopt", "hold", "adopt"]), &names(&["tools"])).unwrap_err();
        assert!(matches!(err, RadarError::DuplicateRing(ref r) if r == "adopt"));

        let err = compile(&names(&["adopt"]), &names(&["tools", "tools"])).unwrap_err();
        assert!(matches!(err, RadarError::DuplicateQuadrant(ref q) if q == "tools"));
    }
}
