//! Spatial overlap queries (broad-phase коллаборатора)
//!
//! `SpatialIndex`: контракт "дай мне collider'ы в этой форме" в стиле
//! non-alloc API движков: результаты пишутся в буфер вызывающего, возвращается
//! количество. Буфер заполнен → остальные кандидаты молча отбрасываются.
//!
//! `ColliderIndex`: snapshot collider'ов за текущий physics tick. Его
//! заполняет physics backend (engine bridge или `HeadlessPhysicsPlugin`).

use bevy::prelude::*;
use crate::collision_layers::mask_contains;
use crate::physics::ColliderShape;

/// Кандидат из overlap query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderHit {
    /// Entity, которому принадлежит collider
    pub entity: Entity,
    /// Слой collider'а (один бит)
    pub layer: u32,
    pub is_trigger: bool,
}

impl Default for ColliderHit {
    fn default() -> Self {
        Self {
            entity: Entity::PLACEHOLDER,
            layer: 0,
            is_trigger: false,
        }
    }
}

/// Spatial overlap query коллаборатора
///
/// Порядок кандидатов = порядок query (без сортировки по дистанции).
/// Возвращает число записанных в `hits` кандидатов (≤ `hits.len()`).
pub trait SpatialIndex {
    fn overlap_circle(&self, center: Vec2, radius: f32, layer_mask: u32, hits: &mut [ColliderHit]) -> usize;

    fn overlap_box(&self, center: Vec2, half_extents: Vec2, layer_mask: u32, hits: &mut [ColliderHit]) -> usize;
}

/// Collider в snapshot'е индекса (мировые координаты)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedCollider {
    pub entity: Entity,
    pub center: Vec2,
    pub shape: ColliderShape,
    pub layer: u32,
    pub is_trigger: bool,
}

impl IndexedCollider {
    pub fn overlaps(&self, other: &IndexedCollider, skin: f32) -> bool {
        self.shape
            .inflated(skin)
            .overlaps(self.center, &other.shape, other.center)
    }

    fn as_hit(&self) -> ColliderHit {
        ColliderHit {
            entity: self.entity,
            layer: self.layer,
            is_trigger: self.is_trigger,
        }
    }
}

/// Brute-force snapshot активных collider'ов
///
/// Для уровня платформера (десятки collider'ов) линейного прохода хватает.
#[derive(Resource, Debug, Default, Clone)]
pub struct ColliderIndex {
    entries: Vec<IndexedCollider>,
}

impl ColliderIndex {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn insert(&mut self, collider: IndexedCollider) {
        self.entries.push(collider);
    }

    pub fn entries(&self) -> &[IndexedCollider] {
        &self.entries
    }

    fn overlap_shape(&self, query_shape: ColliderShape, center: Vec2, layer_mask: u32, hits: &mut [ColliderHit]) -> usize {
        let mut count = 0;

        for entry in &self.entries {
            if count == hits.len() {
                break; // Буфер заполнен, остальное отбрасываем
            }
            if !mask_contains(layer_mask, entry.layer) {
                continue;
            }
            if query_shape.overlaps(center, &entry.shape, entry.center) {
                hits[count] = entry.as_hit();
                count += 1;
            }
        }

        count
    }
}

impl SpatialIndex for ColliderIndex {
    fn overlap_circle(&self, center: Vec2, radius: f32, layer_mask: u32, hits: &mut [ColliderHit]) -> usize {
        self.overlap_shape(ColliderShape::Circle { radius }, center, layer_mask, hits)
    }

    fn overlap_box(&self, center: Vec2, half_extents: Vec2, layer_mask: u32, hits: &mut [ColliderHit]) -> usize {
        self.overlap_shape(ColliderShape::Aabb { half_extents }, center, layer_mask, hits)
    }
}
