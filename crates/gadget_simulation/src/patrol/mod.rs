//! Patrol enemy
//!
//! Ходит туда-обратно между двумя X-границами (physics tick).
//! Реакции на контакт:
//! - Bullet → деактивация (исчезает из симуляции)
//! - Player → `Inert` (перестаёт разворачиваться, но остаётся в мире и
//!   сохраняет velocity)

use bevy::prelude::*;

use crate::components::{is_active, Activation, ColliderTag, Inert, PhysicsBody};
use crate::physics::{CollisionStarted, PhysicsSet};
use crate::GameplaySet;

/// Маршрут патруля: `from ≤ to` (канонизируется при создании), скорость
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(Activation)]
pub struct PatrolRoute {
    from: f32,
    to: f32,
    speed: f32,
}

impl PatrolRoute {
    /// Маршрут между двумя точками (порядок аргументов не важен)
    pub fn between(a: f32, b: f32, speed: f32) -> Self {
        let (from, to) = if a <= b { (a, b) } else { (b, a) };
        Self {
            from,
            to,
            speed: speed.abs(),
        }
    }

    /// Маршрут от точки спавна на `patrol_size` (знак задаёт сторону)
    pub fn from_origin(origin_x: f32, patrol_size: f32, speed: f32) -> Self {
        Self::between(origin_x, origin_x + patrol_size, speed)
    }

    pub fn from_point(&self) -> f32 {
        self.from
    }

    pub fn to_point(&self) -> f32 {
        self.to
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Стартовая скорость: к `to`
    pub fn initial_velocity(&self) -> Vec2 {
        Vec2::new(self.speed, 0.0)
    }

    /// Направление по текущей velocity (+1 / -1 / 0 если стоит)
    pub fn heading(velocity: Vec2) -> f32 {
        if velocity.x > 0.0 {
            1.0
        } else if velocity.x < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    /// Проверка границ (physics tick)
    ///
    /// Разворот только "на выходе" за границу: на `to` при движении вправо,
    /// на `from` при движении влево. Возвращает true, если velocity изменилась.
    pub fn physics_tick(&self, x: f32, velocity: &mut Vec2) -> bool {
        if velocity.x >= 0.0 && x >= self.to {
            velocity.x = -self.speed;
            true
        } else if velocity.x <= 0.0 && x <= self.from {
            velocity.x = self.speed;
            true
        } else {
            false
        }
    }
}

/// Event: враг отключён контактом с игроком
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDisabled {
    pub enemy: Entity,
    pub player: Entity,
}

/// Event: враг деактивирован попаданием
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDeactivated {
    pub enemy: Entity,
    pub projectile: Entity,
}

/// Система: разворот на границах (FixedUpdate, до шага физики)
pub fn patrol_physics_tick(
    mut patrols: Query<(Entity, &PatrolRoute, &mut PhysicsBody, Option<&Activation>), Without<Inert>>,
) {
    for (entity, route, mut body, activation) in patrols.iter_mut() {
        if !is_active(activation) {
            continue;
        }

        let x = body.position.x;
        let mut velocity = body.velocity;
        if route.physics_tick(x, &mut velocity) {
            body.velocity = velocity;
            crate::log(&format!(
                "↔️ Patrol {:?} turned at x={:.2} (heading {})",
                entity,
                x,
                PatrolRoute::heading(velocity)
            ));
        }
    }
}

/// Система: collision callback патруля
///
/// Срабатывает и для `Inert` врага (отключена только tick-логика).
pub fn patrol_collisions(
    mut commands: Commands,
    mut collisions: EventReader<CollisionStarted>,
    tags: Query<&ColliderTag>,
    mut patrols: Query<&mut Activation, With<PatrolRoute>>,
    mut disabled: EventWriter<EnemyDisabled>,
    mut deactivated: EventWriter<EnemyDeactivated>,
) {
    for collision in collisions.read() {
        let Ok(mut activation) = patrols.get_mut(collision.entity) else {
            continue;
        };

        match ColliderTag::of(&tags, collision.other) {
            ColliderTag::Bullet => {
                if activation.set_active(false) {
                    deactivated.write(EnemyDeactivated {
                        enemy: collision.entity,
                        projectile: collision.other,
                    });
                    crate::log_info(&format!("💥 Enemy {:?} shot down", collision.entity));
                }
            }
            ColliderTag::Player => {
                commands.entity(collision.entity).insert(Inert);
                disabled.write(EnemyDisabled {
                    enemy: collision.entity,
                    player: collision.other,
                });
                crate::log(&format!("🛑 Enemy {:?} disabled by player contact", collision.entity));
            }
            _ => {}
        }
    }
}

/// Patrol Plugin
///
/// - `patrol_physics_tick` в FixedUpdate (`PhysicsSet::Actors`)
/// - `patrol_collisions` в `GameplaySet::Collisions`
pub struct PatrolPlugin;

impl Plugin for PatrolPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollisionStarted>()
            .add_event::<EnemyDisabled>()
            .add_event::<EnemyDeactivated>();

        app.add_systems(FixedUpdate, patrol_physics_tick.in_set(PhysicsSet::Actors));
        app.add_systems(Update, patrol_collisions.in_set(GameplaySet::Collisions));
    }
}
