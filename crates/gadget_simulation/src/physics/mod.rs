//! Physics interaction module
//!
//! Физика: внешний коллаборатор. Симуляция видит её через:
//! - `PhysicsBody` / `Collider` / `ColliderTag` компоненты (components::physics)
//! - `ColliderIndex` resource + `SpatialIndex` trait (overlap queries)
//! - `CollisionStarted` event (collision-begin callbacks)
//!
//! `HeadlessPhysicsPlugin`: минимальный backend для headless прогона и тестов.

use bevy::prelude::*;

pub mod headless;
pub mod query;
pub mod shapes;

// Re-export основных типов
pub use headless::{ActiveContacts, HeadlessPhysicsConfig, HeadlessPhysicsPlugin};
pub use query::{ColliderHit, ColliderIndex, IndexedCollider, SpatialIndex};
pub use shapes::ColliderShape;

/// Event: начался контакт `entity` с `other` (Physics → ECS)
///
/// Backend шлёт по событию на каждую сторону контакта.
/// Доставляется дискретно, порядок относительно tick-систем не гарантирован.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionStarted {
    /// Кто получает callback
    pub entity: Entity,
    /// С кем столкнулся
    pub other: Entity,
}

/// Фазы FixedUpdate (physics tick)
///
/// Порядок: Actors (patrol bounds) → Integrate (backend step) → Broadphase
/// (index rebuild + contact events).
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    Actors,
    Integrate,
    Broadphase,
}
