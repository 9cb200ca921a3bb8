//! Entity layers
//!
//! A layer is the read-only set of entities one map widget shows. The
//! controller only talks to it through [`EntityLayer`], so the same
//! controller type drives the galaxy and the province map.

use std::fmt::Debug;

use glam::DVec2;

use super::hit::{self, PointEntity, PolygonEntity};
use super::settings::ViewportSettings;
use super::transform::TransformParams;

/// Index of a star in a [`StarField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StarId(pub usize);

/// Index of a province in a [`ProvinceMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProvinceId(pub usize);

/// A hit-testable set of entities addressed by a typed index
pub trait EntityLayer {
    type Id: Copy + Eq + Debug;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` names an entity in this layer
    fn contains(&self, id: Self::Id) -> bool;

    /// Entity under a widget-local screen point
    fn entity_at(
        &self,
        params: &TransformParams,
        screen: DVec2,
        settings: &ViewportSettings,
    ) -> Option<Self::Id>;

    /// Entities whose anchor maps inside the rectangle spanned by `a` and `b`
    fn entities_in_rect(&self, params: &TransformParams, a: DVec2, b: DVec2) -> Vec<Self::Id>;

    /// Representative normalized point (center or centroid)
    fn anchor(&self, id: Self::Id) -> Option<DVec2>;
}

/// Point entities with nearest-hit semantics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarField {
    entities: Vec<PointEntity>,
}

impl StarField {
    pub fn new(entities: Vec<PointEntity>) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &[PointEntity] {
        &self.entities
    }

    pub fn get(&self, id: StarId) -> Option<&PointEntity> {
        self.entities.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StarId, &PointEntity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(idx, entity)| (StarId(idx), entity))
    }
}

impl EntityLayer for StarField {
    type Id = StarId;

    fn len(&self) -> usize {
        self.entities.len()
    }

    fn contains(&self, id: StarId) -> bool {
        id.0 < self.entities.len()
    }

    fn entity_at(
        &self,
        params: &TransformParams,
        screen: DVec2,
        settings: &ViewportSettings,
    ) -> Option<StarId> {
        hit::nearest_point_entity_at(
            &self.entities,
            params,
            screen,
            settings.hit_radius_multiplier,
        )
        .map(StarId)
    }

    fn entities_in_rect(&self, params: &TransformParams, a: DVec2, b: DVec2) -> Vec<StarId> {
        hit::entities_in_screen_rect(self.entities.iter().map(|e| e.norm), params, a, b)
            .into_iter()
            .map(StarId)
            .collect()
    }

    fn anchor(&self, id: StarId) -> Option<DVec2> {
        self.get(id).map(|e| e.norm)
    }
}

/// Polygon entities with first-match semantics
///
/// Centroids are computed once on construction; rectangle queries and labels
/// use them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvinceMap {
    polygons: Vec<PolygonEntity>,
    centroids: Vec<DVec2>,
}

impl ProvinceMap {
    pub fn new(polygons: Vec<PolygonEntity>) -> Self {
        let centroids = polygons.iter().map(PolygonEntity::centroid).collect();
        Self {
            polygons,
            centroids,
        }
    }

    pub fn polygons(&self) -> &[PolygonEntity] {
        &self.polygons
    }

    pub fn get(&self, id: ProvinceId) -> Option<&PolygonEntity> {
        self.polygons.get(id.0)
    }

    pub fn centroid(&self, id: ProvinceId) -> Option<DVec2> {
        self.centroids.get(id.0).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProvinceId, &PolygonEntity, DVec2)> {
        self.polygons
            .iter()
            .zip(self.centroids.iter().copied())
            .enumerate()
            .map(|(idx, (polygon, centroid))| (ProvinceId(idx), polygon, centroid))
    }
}

impl EntityLayer for ProvinceMap {
    type Id = ProvinceId;

    fn len(&self) -> usize {
        self.polygons.len()
    }

    fn contains(&self, id: ProvinceId) -> bool {
        id.0 < self.polygons.len()
    }

    fn entity_at(
        &self,
        params: &TransformParams,
        screen: DVec2,
        _settings: &ViewportSettings,
    ) -> Option<ProvinceId> {
        hit::polygon_at(&self.polygons, params, screen).map(ProvinceId)
    }

    fn entities_in_rect(&self, params: &TransformParams, a: DVec2, b: DVec2) -> Vec<ProvinceId> {
        hit::entities_in_screen_rect(self.centroids.iter().copied(), params, a, b)
            .into_iter()
            .map(ProvinceId)
            .collect()
    }

    fn anchor(&self, id: ProvinceId) -> Option<DVec2> {
        self.centroid(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TransformParams {
        TransformParams::new(DVec2::new(800.0, 600.0), DVec2::ZERO, 1.0)
    }

    fn field() -> StarField {
        StarField::new(vec![
            PointEntity {
                norm: DVec2::new(0.25, 0.25),
                radius_px: 5.0,
            },
            PointEntity {
                norm: DVec2::new(0.75, 0.75),
                radius_px: 5.0,
            },
        ])
    }

    fn two_cells() -> ProvinceMap {
        ProvinceMap::new(vec![
            PolygonEntity::new(vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(0.5, 0.0),
                DVec2::new(0.5, 1.0),
                DVec2::new(0.0, 1.0),
            ]),
            PolygonEntity::new(vec![
                DVec2::new(0.5, 0.0),
                DVec2::new(1.0, 0.0),
                DVec2::new(1.0, 1.0),
                DVec2::new(0.5, 1.0),
            ]),
        ])
    }

    #[test]
    fn test_star_field_contains_only_valid_ids() {
        let f = field();
        assert!(f.contains(StarId(1)));
        assert!(!f.contains(StarId(2)));
        assert_eq!(f.anchor(StarId(9)), None);
    }

    #[test]
    fn test_star_field_entity_at() {
        let f = field();
        let settings = ViewportSettings::default();
        assert_eq!(
            f.entity_at(&params(), DVec2::new(600.0, 450.0), &settings),
            Some(StarId(1))
        );
        assert_eq!(f.entity_at(&params(), DVec2::new(400.0, 300.0), &settings), None);
    }

    #[test]
    fn test_star_field_rect() {
        let hits = field().entities_in_rect(&params(), DVec2::ZERO, DVec2::new(400.0, 300.0));
        assert_eq!(hits, vec![StarId(0)]);
    }

    #[test]
    fn test_province_map_hit_and_centroids() {
        let m = two_cells();
        let settings = ViewportSettings::default();
        assert_eq!(
            m.entity_at(&params(), DVec2::new(700.0, 100.0), &settings),
            Some(ProvinceId(1))
        );
        let c = m.anchor(ProvinceId(0)).unwrap_or_default();
        assert!((c - DVec2::new(0.25, 0.5)).length() < 1e-12);
    }

    #[test]
    fn test_province_map_rect_uses_centroids() {
        // Left cell centroid is at (200, 300); the right one at (600, 300)
        let hits = two_cells().entities_in_rect(
            &params(),
            DVec2::new(150.0, 250.0),
            DVec2::new(250.0, 350.0),
        );
        assert_eq!(hits, vec![ProvinceId(0)]);
    }

    #[test]
    fn test_empty_layers() {
        assert!(StarField::default().is_empty());
        assert!(ProvinceMap::default().is_empty());
        assert_eq!(
            ProvinceMap::default().entity_at(&params(), DVec2::ZERO, &ViewportSettings::default()),
            None
        );
    }
}
