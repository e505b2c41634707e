//! Physics компоненты: тело, collider, tag
//!
//! ECS владеет этими данными, physics backend (engine bridge или
//! `HeadlessPhysicsPlugin`) синхронизирует их со своим миром.

use bevy::prelude::*;
use crate::physics::ColliderShape;

/// 2D point mass: позиция, скорость, множитель гравитации
///
/// Все акторы читают/пишут velocity и position только через этот компонент.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
        }
    }
}

impl PhysicsBody {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }
}

/// Компонент-маркер: неподвижное тело (земля, платформы, финиш)
///
/// Не интегрируется, выталкивает динамические тела.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct StaticBody;

/// Collider актора (центр = `PhysicsBody::position`)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Один бит из `collision_layers`
    pub layer: u32,
    /// Trigger не даёт collision событий и может быть исключён из overlap
    pub is_trigger: bool,
}

impl Collider {
    pub fn circle(radius: f32, layer: u32) -> Self {
        Self {
            shape: ColliderShape::Circle { radius },
            layer,
            is_trigger: false,
        }
    }

    pub fn aabb(half_extents: Vec2, layer: u32) -> Self {
        Self {
            shape: ColliderShape::Aabb { half_extents },
            layer,
            is_trigger: false,
        }
    }

    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }
}

/// Gameplay tag collider'а (lookup через `Query<&ColliderTag>`)
///
/// Collision handlers решают, что делать, только по tag'у другой стороны.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
#[reflect(Component)]
pub enum ColliderTag {
    #[default]
    Untagged,
    /// Игрок
    Player,
    /// Hostile: контакт отнимает здоровье игрока
    Enemy,
    /// Pooled projectile игрока
    Bullet,
    /// Finish/goal уровня
    Victory,
}

impl ColliderTag {
    /// Tag entity или `Untagged`, если tag'а нет (или entity уже нет)
    pub fn of(tags: &Query<&ColliderTag>, entity: Entity) -> Self {
        tags.get(entity).copied().unwrap_or_default()
    }
}
