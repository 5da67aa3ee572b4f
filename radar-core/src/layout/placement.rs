// Greedy blip placement.
//
// Items are processed in ring order (inner first, input order within a ring).
// Each item draws candidates in its band/sector until one clears every blip
// placed so far, or until the run-wide retry budget is spent. Accepted blips
// become part of the collision reference set for everything after them.
//
// Nothing survives between runs: each call builds a fresh PlacementState and
// RetryBudget, so concurrent runs never share mutable state.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Diagnostic;
use crate::setup::{Item, Radar, RingId};
use super::{Blip, Point, RadarConfig};
use super::collision::{CollisionDetector, RetryBudget, Tolerance};
use super::rings::RingGeometry;
use super::sampler::{UnitSource, sample_candidate};
use super::sectors::Sector;
use super::spatial_grid::SpatialGrid;

/// Blips accepted so far in one run, indexed for proximity queries.
#[derive(Debug, Clone)]
pub struct PlacementState {
    blips: Vec<Blip>,
    grid: SpatialGrid,
}

impl PlacementState {
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            blips: Vec::new(),
            grid: SpatialGrid::new(tolerance),
        }
    }

    pub fn push(&mut self, blip: Blip) {
        self.grid.insert(blip.point());
        self.blips.push(blip);
    }

    pub fn any_within(&self, p: Point, tolerance: Tolerance) -> bool {
        self.grid.any_within(p, tolerance)
    }

    pub fn blips(&self) -> &[Blip] {
        &self.blips
    }

    pub fn len(&self) -> usize {
        self.blips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blips.is_empty()
    }

    pub fn into_blips(self) -> Vec<Blip> {
        self.blips
    }
}

/// Result of one placement run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Placement {
    /// In processing order.
    pub blips: Vec<Blip>,
    pub diagnostics: Vec<Diagnostic>,
    /// Rejected candidates over the whole run.
    pub collision_retries: usize,
}

pub struct PlacementEngine<'a> {
    radar: &'a Radar,
    geometry: RingGeometry,
    detector: CollisionDetector,
    max_retries: usize,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(radar: &'a Radar, cfg: &RadarConfig) -> Self {
        Self {
            radar,
            geometry: RingGeometry::new(radar.ring_count(), cfg.radius_diminish),
            detector: CollisionDetector::new(cfg.tolerance(radar.ring_count())),
            max_retries: cfg.max_collision_retry,
        }
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.detector = CollisionDetector::new(tolerance);
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    pub fn place<R: UnitSource + ?Sized>(&self, items: &[Item], rng: &mut R) -> Placement {
        let mut diagnostics = Vec::new();
        let ordered = processing_order(self.radar, items, &mut diagnostics);

        let mut state = PlacementState::new(self.detector.tolerance());
        let mut budget = RetryBudget::new(self.max_retries);
        let mut degenerate_reported = vec![false; self.radar.ring_count()];
        let mut exhaustion_reported = false;

        for (id, (ring, item)) in ordered.into_iter().enumerate() {
            let Some(quadrant) = self.radar.quadrant_id(&item.quadrant) else {
                warn!(name = %item.name, quadrant = %item.quadrant, "unknown quadrant, blip not placed");
                diagnostics.push(Diagnostic::UnknownQuadrant {
                    name: item.name.clone(),
                    quadrant: item.quadrant.clone(),
                });
                continue;
            };

            // Unknown rings were sorted first; they share the innermost band
            let ring = ring.unwrap_or(RingId(0));
            let band = self.geometry.sampling_band(ring.0);
            if band.degenerate && !degenerate_reported[ring.0] {
                degenerate_reported[ring.0] = true;
                let name = self.radar.ring_name(ring).to_string();
                warn!(ring = %name, "ring band narrower than its margins, clamping");
                diagnostics.push(Diagnostic::DegenerateBand { ring: name });
            }
            let sector = Sector::for_quadrant(quadrant.0, self.radar.quadrant_count());

            // A zero budget is spent before the first check
            if budget.exhausted() && !exhaustion_reported {
                exhaustion_reported = true;
                debug!(at = id, "collision retry budget exhausted, accepting overlaps");
                diagnostics.push(Diagnostic::RetryBudgetExhausted { at: id });
            }

            let point = loop {
                let candidate = sample_candidate(band, sector, rng);
                if !self.detector.rejects(candidate, &state, &budget) {
                    break candidate;
                }
                budget.record_rejection();
                if budget.exhausted() {
                    exhaustion_reported = true;
                    debug!(at = id, "collision retry budget exhausted, accepting overlaps");
                    diagnostics.push(Diagnostic::RetryBudgetExhausted { at: id });
                }
            };

            state.push(Blip {
                id,
                name: item.name.clone(),
                quadrant: item.quadrant.clone(),
                x: point.x,
                y: point.y,
            });
        }

        Placement {
            blips: state.into_blips(),
            diagnostics,
            collision_retries: budget.used(),
        }
    }
}

/// Stable-sort items by ring index. Items with an undeclared ring sort before
/// every known ring.
fn processing_order<'i>(
    radar: &Radar,
    items: &'i [Item],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<(Option<RingId>, &'i Item)> {
    let mut ordered: Vec<(Option<RingId>, &Item)> = items
        .iter()
        .map(|item| {
            let ring = radar.ring_id(&item.ring);
            if ring.is_none() {
                warn!(name = %item.name, ring = %item.ring, "unknown ring, placing in innermost band");
                diagnostics.push(Diagnostic::UnknownRing {
                    name: item.name.clone(),
                    ring: item.ring.clone(),
                });
            }
            (ring, item)
        })
        .collect();

    ordered.sort_by_key(|(ring, _)| ring.map_or(-1, |r| r.0 as isize));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::compile;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;
    use std::f64::consts::{FRAC_PI_2, PI};
    use crate::layout::collision::MAX_COLLISION_RETRY_COUNT;
    use crate::layout::sampler::ScriptedSource;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn tech_radar() -> Radar {
        compile(
            &names(&["adopt", "trial", "assess", "hold"]),
            &names(&["tools", "techniques", "platforms", "languages"]),
        )
        .unwrap()
    }

    fn sample_items() -> Vec<Item> {
        vec![
            Item::new("D3", "tools", "assess"),
            Item::new("TypeScript", "languages", "trial"),
            Item::new("Storybook", "tools", "adopt"),
            Item::new("JavaScript", "languages", "hold"),
        ]
    }

    fn many_items(radar: &Radar, count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| {
                let ring = &radar.rings()[i % radar.ring_count()];
                let quadrant = &radar.quadrants()[(i / radar.ring_count()) % radar.quadrant_count()];
                Item::new(&format!("item-{}", i), quadrant, ring)
            })
            .collect()
    }

    #[test]
    fn test_empty_items() {
        let radar = tech_radar();
        let engine = PlacementEngine::new(&radar, &RadarConfig::default());
        let placement = engine.place(&[], &mut ChaChaRng::seed_from_u64(42));
        assert!(placement.blips.is_empty());
        assert!(placement.diagnostics.is_empty());
        assert_eq!(placement.collision_retries, 0);
    }

    #[test]
    fn test_sorted_by_ring_with_stable_ties() {
        let radar = tech_radar();
        let mut items = sample_items();
        items.push(Item::new("Rust", "languages", "adopt"));
        let engine = PlacementEngine::new(&radar, &RadarConfig::default());
        let placement = engine.place(&items, &mut ChaChaRng::seed_from_u64(42));

        let order: Vec<&str> = placement.blips.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(order, vec!["Storybook", "Rust", "TypeScript", "D3", "JavaScript"]);
        let ids: Vec<usize> = placement.blips.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_d3_lands_in_assess_tools() {
        let radar = tech_radar();
        let engine = PlacementEngine::new(&radar, &RadarConfig::default());
        let mut rng = ChaChaRng::seed_from_u64(7);
        let placement = engine.place(&[Item::new("D3", "tools", "assess")], &mut rng);

        let d3 = &placement.blips[0];
        let r = d3.point().radius();
        assert!(r >= 0.692 + 0.05 - 0.01 && r <= 0.877 - 0.05 + 0.01, "radius {}", r);
        let t = d3.point().angle();
        assert!((0.0..FRAC_PI_2).contains(&t), "angle {}", t);
    }

    #[test]
    fn test_blips_respect_band_and_sector() {
        let radar = tech_radar();
        let engine = PlacementEngine::new(&radar, &RadarConfig::default());
        let items = many_items(&radar, 60);
        let placement = engine.place(&items, &mut ChaChaRng::seed_from_u64(42));
        assert_eq!(placement.blips.len(), 60);

        for blip in &placement.blips {
            let item = items.iter().find(|i| i.name == blip.name).unwrap();
            let ring = radar.ring_id(&item.ring).unwrap();
            let quadrant = radar.quadrant_id(&item.quadrant).unwrap();
            let band = engine.geometry().sampling_band(ring.0);
            let sector = Sector::for_quadrant(quadrant.0, 4);

            let r = blip.point().radius();
            assert!(r >= band.start - 1e-9 && r <= band.end() + 1e-9, "{} radius {}", blip.name, r);
            assert!(sector.contains(blip.point().angle(), 1e-9), "{} angle {}", blip.name, blip.point().angle());
            assert_eq!(blip.quadrant, item.quadrant);
        }
    }

    #[test]
    fn test_no_overlaps_while_budget_remains() {
        let radar = tech_radar();
        let tol = Tolerance { x: 0.05, y: 0.03 };
        let engine = PlacementEngine::new(&radar, &RadarConfig::default())
            .with_tolerance(tol)
            .with_max_retries(100_000);
        let placement = engine.place(&many_items(&radar, 24), &mut ChaChaRng::seed_from_u64(42));

        assert!(placement.collision_retries < 100_000);
        for (i, a) in placement.blips.iter().enumerate() {
            for b in &placement.blips[..i] {
                assert!(!tol.overlaps(a.point(), b.point()), "{} overlaps {}", a.name, b.name);
            }
        }
        assert!(!placement.diagnostics.iter().any(|d| matches!(d, Diagnostic::RetryBudgetExhausted { .. })));
    }

    #[test]
    fn test_budget_is_shared_across_the_run() {
        let radar = tech_radar();
        // Every blip collides with every other one
        let engine = PlacementEngine::new(&radar, &RadarConfig::default())
            .with_tolerance(Tolerance { x: 10.0, y: 10.0 });
        let placement = engine.place(&many_items(&radar, 10), &mut ChaChaRng::seed_from_u64(42));

        assert_eq!(placement.blips.len(), 10);
        assert_eq!(placement.collision_retries, MAX_COLLISION_RETRY_COUNT);
        // Spent entirely on the second blip, never reset afterwards
        assert_eq!(placement.diagnostics, vec![Diagnostic::RetryBudgetExhausted { at: 1 }]);
    }

    #[test]
    fn test_zero_budget_reports_exhaustion_at_first_blip() {
        let radar = tech_radar();
        let engine = PlacementEngine::new(&radar, &RadarConfig::default())
            .with_tolerance(Tolerance { x: 10.0, y: 10.0 })
            .with_max_retries(0);
        let placement = engine.place(&many_items(&radar, 5), &mut ChaChaRng::seed_from_u64(42));

        assert_eq!(placement.blips.len(), 5);
        assert_eq!(placement.collision_retries, 0);
        assert_eq!(placement.diagnostics, vec![Diagnostic::RetryBudgetExhausted { at: 0 }]);
    }

    #[test]
    fn test_retry_resamples_whole_candidate() {
        let radar = compile(&names(&["adopt"]), &names(&["tools"])).unwrap();
        let engine = PlacementEngine::new(&radar, &RadarConfig::default())
            .with_tolerance(Tolerance { x: 0.1, y: 0.1 });
        // first blip: (0.5, 0.0); second: same draws collide, then (0.5, 0.5) is clear
        let mut src = ScriptedSource::new(vec![0.5, 0.0, 0.5, 0.0, 0.5, 0.5]);
        let placement = engine.place(
            &[Item::new("a", "tools", "adopt"), Item::new("b", "tools", "adopt")],
            &mut src,
        );

        assert_eq!(src.consumed(), 6);
        assert_eq!(placement.collision_retries, 1);
        let b = placement.blips[1].point();
        assert!((b.radius() - 0.5).abs() < 1e-12);
        assert!((b.angle() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic_with_same_draws() {
        let radar = tech_radar();
        let engine = PlacementEngine::new(&radar, &RadarConfig::default());
        let items = many_items(&radar, 30);

        let first = engine.place(&items, &mut ChaChaRng::seed_from_u64(99));
        let second = engine.place(&items, &mut ChaChaRng::seed_from_u64(99));
        assert_eq!(first.blips, second.blips);

        let script: Vec<f64> = (0..97).map(|i| (i as f64 * 0.37) % 1.0).collect();
        let a = engine.place(&items, &mut ScriptedSource::new(script.clone()));
        let b = engine.place(&items, &mut ScriptedSource::new(script));
        assert_eq!(a.blips, b.blips);
    }

    #[test]
    fn test_unknown_ring_sorts_first_and_is_placed() {
        let radar = tech_radar();
        let engine = PlacementEngine::new(&radar, &RadarConfig::default());
        let items = vec![
            Item::new("D3", "tools", "assess"),
            Item::new("Mystery", "platforms", "someday"),
        ];
        let placement = engine.place(&items, &mut ChaChaRng::seed_from_u64(42));

        assert_eq!(placement.blips[0].name, "Mystery");
        assert_eq!(placement.blips[0].id, 0);
        let band = engine.geometry().sampling_band(0);
        let r = placement.blips[0].point().radius();
        assert!(r >= band.start - 1e-9 && r <= band.end() + 1e-9);
        assert_eq!(placement.diagnostics[0], Diagnostic::UnknownRing {
            name: "Mystery".to_string(),
            ring: "someday".to_string(),
        });
    }

    #[test]
    fn test_unknown_quadrant_is_rejected() {
        let radar = tech_radar();
        let engine = PlacementEngine::new(&radar, &RadarConfig::default());
        let items = vec![
            Item::new("Ghost", "databases", "adopt"),
            Item::new("D3", "tools", "assess"),
        ];
        let placement = engine.place(&items, &mut ChaChaRng::seed_from_u64(42));

        assert_eq!(placement.blips.len(), 1);
        assert_eq!(placement.blips[0].name, "D3");
        // ids keep the processing position, so the rejected item leaves a gap
        assert_eq!(placement.blips[0].id, 1);
        assert_eq!(placement.diagnostics, vec![Diagnostic::UnknownQuadrant {
            name: "Ghost".to_string(),
            quadrant: "databases".to_string(),
        }]);
    }

    #[test]
    fn test_degenerate_band_reported_once() {
        let rings: Vec<String> = (0..10).map(|i| format!("r{}", i)).collect();
        let radar = compile(&rings, &names(&["q"])).unwrap();
        let engine = PlacementEngine::new(&radar, &RadarConfig::default());
        let items = vec![Item::new("a", "q", "r9"), Item::new("b", "q", "r9")];
        let placement = engine.place(&items, &mut ChaChaRng::seed_from_u64(42));

        let expected_r = engine.geometry().bands()[9] + engine.geometry().inset();
        for blip in &placement.blips {
            assert!((blip.point().radius() - expected_r).abs() < 1e-9);
        }
        let degenerate: Vec<_> = placement
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::DegenerateBand { .. }))
            .collect();
        assert_eq!(degenerate.len(), 1);
    }
}
