//! Shape strategies для OverlapDetector
//!
//! Каждая форма знает только одно: как спросить у `SpatialIndex` кандидатов.
//! Detector выбирает форму при создании и больше о ней не думает.

use bevy::prelude::*;
use std::fmt;

use crate::physics::{ColliderHit, SpatialIndex};

/// Стратегия overlap query (одна capability на форму)
pub trait OverlapShape: Send + Sync + fmt::Debug + 'static {
    /// Записывает кандидатов в `hits`, возвращает их количество
    fn compute_candidates(
        &self,
        origin: Vec2,
        index: &dyn SpatialIndex,
        layer_mask: u32,
        hits: &mut [ColliderHit],
    ) -> usize;
}

/// Круг радиуса `radius` с центром в anchor'е detector'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    pub radius: f32,
}

impl OverlapShape for CircleShape {
    fn compute_candidates(
        &self,
        origin: Vec2,
        index: &dyn SpatialIndex,
        layer_mask: u32,
        hits: &mut [ColliderHit],
    ) -> usize {
        index.overlap_circle(origin, self.radius, layer_mask, hits)
    }
}

/// Axis-aligned коробка с центром в anchor'е detector'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub half_extents: Vec2,
}

impl OverlapShape for BoxShape {
    fn compute_candidates(
        &self,
        origin: Vec2,
        index: &dyn SpatialIndex,
        layer_mask: u32,
        hits: &mut [ColliderHit],
    ) -> usize {
        index.overlap_box(origin, self.half_extents, layer_mask, hits)
    }
}
