use enum_map::Enum;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::viewport::{EntityLayer, PointEntity, StarField, StarId, TransformParams, ViewportSettings};

/// Spectral class, hottest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
pub enum StarClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl StarClass {
    /// Picks a class from a roll in `[0, 1)`, weighted towards cool dwarfs
    fn from_roll(roll: f64) -> Self {
        match roll {
            r if r < 0.02 => StarClass::O,
            r if r < 0.07 => StarClass::B,
            r if r < 0.15 => StarClass::A,
            r if r < 0.27 => StarClass::F,
            r if r < 0.45 => StarClass::G,
            r if r < 0.68 => StarClass::K,
            _ => StarClass::M,
        }
    }

    /// Drawn radius at zoom 1.0
    pub fn base_radius_px(self) -> f64 {
        match self {
            StarClass::O => 7.0,
            StarClass::B => 6.0,
            StarClass::A => 5.0,
            StarClass::F => 4.5,
            StarClass::G => 4.0,
            StarClass::K => 3.5,
            StarClass::M => 3.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StarClass::O => "O (blue giant)",
            StarClass::B => "B (blue-white)",
            StarClass::A => "A (white)",
            StarClass::F => "F (yellow-white)",
            StarClass::G => "G (yellow dwarf)",
            StarClass::K => "K (orange dwarf)",
            StarClass::M => "M (red dwarf)",
        }
    }
}

/// A star system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub name: String,
    /// Normalized map position
    pub position: DVec2,
    pub radius_px: f64,
    pub class: StarClass,
    /// Twinkle phase offset in radians
    pub phase: f64,
}

/// Generated star map
#[derive(Debug, Clone, Default)]
pub struct Galaxy {
    seed: u64,
    stars: Vec<Star>,
    field: StarField,
}

/// Keeps stars off the map border so they are never half-drawn at zoom 1
const EDGE_MARGIN: f64 = 0.04;

impl Galaxy {
    /// Scatters `count` stars over a disc, deterministic for a given seed
    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let reach = 0.5 - EDGE_MARGIN;

        let stars: Vec<Star> = (0..count)
            .map(|_| {
                // sqrt keeps the density uniform over the disc area
                let r = rng.random::<f64>().sqrt() * reach;
                let theta = rng.random_range(0.0..std::f64::consts::TAU);
                let position = DVec2::splat(0.5) + DVec2::from_angle(theta) * r;
                let class = StarClass::from_roll(rng.random::<f64>());
                let radius_px = class.base_radius_px() * rng.random_range(0.85..1.15);

                let mut name = super::generate_name(&mut rng);
                if rng.random_bool(0.2) {
                    name.push_str(&format!(" {}", rng.random_range(2..=9)));
                }

                Star {
                    name,
                    position,
                    radius_px,
                    class,
                    phase: rng.random_range(0.0..std::f64::consts::TAU),
                }
            })
            .collect();

        Self::from_stars(seed, stars)
    }

    /// Builds a galaxy from explicit stars
    pub fn from_stars(seed: u64, stars: Vec<Star>) -> Self {
        let field = StarField::new(
            stars
                .iter()
                .map(|s| PointEntity {
                    norm: s.position,
                    radius_px: s.radius_px,
                })
                .collect(),
        );
        Self { seed, stars, field }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn star(&self, id: StarId) -> Option<&Star> {
        self.stars.get(id.0)
    }

    pub fn field(&self) -> &StarField {
        &self.field
    }
}

impl EntityLayer for Galaxy {
    type Id = StarId;

    fn len(&self) -> usize {
        self.field.len()
    }

    fn contains(&self, id: StarId) -> bool {
        self.field.contains(id)
    }

    fn entity_at(
        &self,
        params: &TransformParams,
        screen: DVec2,
        settings: &ViewportSettings,
    ) -> Option<StarId> {
        self.field.entity_at(params, screen, settings)
    }

    fn entities_in_rect(&self, params: &TransformParams, a: DVec2, b: DVec2) -> Vec<StarId> {
        self.field.entities_in_rect(params, a, b)
    }

    fn anchor(&self, id: StarId) -> Option<DVec2> {
        self.field.anchor(id)
    }
}
