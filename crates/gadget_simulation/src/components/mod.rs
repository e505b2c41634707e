//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: общие характеристики акторов (Health, Activation, Inert)
//! - physics: physics body коллаборатора (PhysicsBody, Collider, ColliderTag, StaticBody)
//! - animation: сигналы для animation коллаборатора (AnimationSignal)
//!
//! Компоненты конкретных акторов живут в своих модулях
//! (`player`, `patrol`, `projectile`, `overlap`).

pub mod actor;
pub mod animation;
pub mod physics;

// Re-exports для удобного импорта
pub use actor::*;
pub use animation::*;
pub use physics::*;
