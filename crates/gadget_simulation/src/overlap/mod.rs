//! Overlap / ground detection
//!
//! `OverlapDetector`: переиспользуемый proximity query актора:
//! - Player: ground check (можно ли прыгать)
//! - любой актор: "есть ли рядом collider из этих слоёв"
//!
//! Polling каждый logic tick (`GameplaySet::Sensors`), результат
//! пересчитывается с нуля, stale `true` между тиками невозможен.

use bevy::prelude::*;

use crate::collision_layers::get_layer_name;
use crate::components::{is_active, Activation, PhysicsBody};
use crate::physics::{ColliderHit, ColliderIndex, SpatialIndex};
use crate::GameplaySet;

pub mod shape;


pub use shape::{BoxShape, CircleShape, OverlapShape};

/// Размер scratch буфера по умолчанию
///
/// Кандидаты сверх ёмкости молча отбрасываются (first-match по порядку query,
/// так что потерять можно только "дальние" по порядку кандидаты).
pub const DEFAULT_OVERLAP_CAPACITY: usize = 4;

/// Proximity query актора (shape strategy + фильтры + derived state)
///
/// Владелец: entity актора; query origin = `PhysicsBody::position + anchor`.
#[derive(Component, Debug)]
pub struct OverlapDetector {
    /// Смещение origin'а относительно тела (например, "ноги")
    pub anchor: Vec2,
    shape: Box<dyn OverlapShape>,
    layer_mask: u32,
    exclude_triggers: bool,
    /// Scratch буфер, len == capacity, переиспользуется каждый tick
    hits: Vec<ColliderHit>,
    is_overlapping: bool,
    overlapped_collider: Option<Entity>,
    overlapped_layer: u32,
}

impl OverlapDetector {
    pub fn new(shape: impl OverlapShape, layer_mask: u32) -> Self {
        Self {
            anchor: Vec2::ZERO,
            shape: Box::new(shape),
            layer_mask,
            exclude_triggers: false,
            hits: vec![ColliderHit::default(); DEFAULT_OVERLAP_CAPACITY],
            is_overlapping: false,
            overlapped_collider: None,
            overlapped_layer: 0,
        }
    }

    /// Круглый detector (основной вариант для ground check)
    pub fn circle(radius: f32, layer_mask: u32) -> Self {
        Self::new(CircleShape { radius }, layer_mask)
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.hits = vec![ColliderHit::default(); capacity];
        self
    }

    pub fn excluding_triggers(mut self, exclude: bool) -> Self {
        self.exclude_triggers = exclude;
        self
    }

    pub fn capacity(&self) -> usize {
        self.hits.len()
    }

    pub fn layer_mask(&self) -> u32 {
        self.layer_mask
    }

    pub fn is_overlapping(&self) -> bool {
        self.is_overlapping
    }

    /// Последний найденный collider
    ///
    /// НЕ сбрасывается, когда overlap пропадает (last-known hit для debug).
    pub fn overlapped_collider(&self) -> Option<Entity> {
        self.overlapped_collider
    }

    /// Битовая маска слоя последнего найденного collider'а
    pub fn overlapped_layer(&self) -> u32 {
        self.overlapped_layer
    }

    /// Пересчитать overlap для текущего tick'а
    ///
    /// Первый кандидат (в порядке query), который не принадлежит `owner` и не
    /// является trigger'ом (если trigger'ы исключены), и есть hit. Дальше не смотрим.
    pub fn poll(&mut self, owner: Entity, owner_position: Vec2, index: &dyn SpatialIndex) -> bool {
        let origin = owner_position + self.anchor;
        let count = self
            .shape
            .compute_candidates(origin, index, self.layer_mask, &mut self.hits)
            .min(self.hits.len());

        for hit in &self.hits[..count] {
            if hit.entity == owner {
                continue;
            }
            if self.exclude_triggers && hit.is_trigger {
                continue;
            }

            if self.overlapped_collider != Some(hit.entity) {
                self.overlapped_collider = Some(hit.entity);
                self.overlapped_layer = hit.layer;
                crate::log(&format!(
                    "👣 {:?} overlaps {:?} ({})",
                    owner,
                    hit.entity,
                    get_layer_name(hit.layer)
                ));
            }
            self.is_overlapping = true;
            return true;
        }

        self.is_overlapping = false;
        false
    }
}

/// Система: poll всех detector'ов (logic tick)
pub fn poll_overlap_detectors(
    index: Res<ColliderIndex>,
    mut detectors: Query<(Entity, &mut OverlapDetector, &PhysicsBody, Option<&Activation>)>,
) {
    for (entity, mut detector, body, activation) in detectors.iter_mut() {
        if !is_active(activation) {
            continue;
        }

        detector.poll(entity, body.position, &*index);
    }
}

/// Overlap Plugin
///
/// Detector'ы опрашиваются в `GameplaySet::Sensors`, до player logic.
pub struct OverlapPlugin;

impl Plugin for OverlapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ColliderIndex>();
        app.add_systems(Update, poll_overlap_detectors.in_set(GameplaySet::Sensors));
    }
}
