use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::viewport::{
    EntityLayer, PolygonEntity, ProvinceId, ProvinceMap, TransformParams, ViewportSettings,
};

/// Number of factions provinces are dealt out to
pub const FACTION_COUNT: usize = 4;

/// Largest corner displacement as a fraction of the cell size
///
/// Below 0.5 every jittered corner stays inside its own lattice cell, so
/// neighboring quads can never cross.
const JITTER: f64 = 0.3;

/// A single province
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    pub name: String,
    /// Normalized outline, implicitly closed
    pub vertices: Vec<DVec2>,
    /// Faction index in `0..FACTION_COUNT`
    pub owner: usize,
}

/// Generated province map
#[derive(Debug, Clone, Default)]
pub struct Provinces {
    seed: u64,
    provinces: Vec<Province>,
    map: ProvinceMap,
}

impl Provinces {
    /// Builds a `cols` x `rows` jittered grid
    ///
    /// Adjacent cells share their corner vertices, so the tessellation has no
    /// gaps and no overlaps. Border corners only move along the border.
    pub fn generate(seed: u64, cols: usize, rows: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let cell = DVec2::new(1.0 / cols.max(1) as f64, 1.0 / rows.max(1) as f64);

        let lattice: Vec<Vec<DVec2>> = (0..=rows)
            .map(|r| {
                (0..=cols)
                    .map(|c| {
                        let base = DVec2::new(c as f64, r as f64) * cell;
                        let mut offset = DVec2::new(
                            rng.random_range(-JITTER..JITTER),
                            rng.random_range(-JITTER..JITTER),
                        ) * cell;
                        if c == 0 || c == cols {
                            offset.x = 0.0;
                        }
                        if r == 0 || r == rows {
                            offset.y = 0.0;
                        }
                        base + offset
                    })
                    .collect()
            })
            .collect();

        let mut provinces = Vec::with_capacity(cols * rows);
        for r in 0..rows {
            for c in 0..cols {
                provinces.push(Province {
                    name: super::generate_name(&mut rng),
                    vertices: vec![
                        lattice[r][c],
                        lattice[r][c + 1],
                        lattice[r + 1][c + 1],
                        lattice[r + 1][c],
                    ],
                    owner: rng.random_range(0..FACTION_COUNT),
                });
            }
        }

        Self::from_provinces(seed, provinces)
    }

    pub fn from_provinces(seed: u64, provinces: Vec<Province>) -> Self {
        let map = ProvinceMap::new(
            provinces
                .iter()
                .map(|p| PolygonEntity::new(p.vertices.clone()))
                .collect(),
        );
        Self {
            seed,
            provinces,
            map,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    pub fn province(&self, id: ProvinceId) -> Option<&Province> {
        self.provinces.get(id.0)
    }

    pub fn map(&self) -> &ProvinceMap {
        &self.map
    }
}

impl EntityLayer for Provinces {
    type Id = ProvinceId;

    fn len(&self) -> usize {
        self.map.len()
    }

    fn contains(&self, id: ProvinceId) -> bool {
        self.map.contains(id)
    }

    fn entity_at(
        &self,
        params: &TransformParams,
        screen: DVec2,
        settings: &ViewportSettings,
    ) -> Option<ProvinceId> {
        self.map.entity_at(params, screen, settings)
    }

    fn entities_in_rect(&self, params: &TransformParams, a: DVec2, b: DVec2) -> Vec<ProvinceId> {
        self.map.entities_in_rect(params, a, b)
    }

    fn anchor(&self, id: ProvinceId) -> Option<DVec2> {
        self.map.anchor(id)
    }
}
