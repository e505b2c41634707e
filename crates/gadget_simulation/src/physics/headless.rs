//! Headless physics backend
//!
//! Заменяет движок, когда симуляция крутится без него (headless бинарь,
//! integration тесты). Делает ровно то, что gameplay ждёт от коллаборатора:
//! - гравитация × `gravity_scale`, интеграция velocity → position
//! - выталкивание динамических тел из `StaticBody` (AABB push-out)
//! - пересборка `ColliderIndex` для overlap queries
//! - `CollisionStarted` при начале контакта (пары трекаются между тиками)
//!
//! Динамические тела друг друга не выталкивают, только события.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::components::{is_active, Activation, Collider, PhysicsBody, StaticBody};
use crate::physics::{CollisionStarted, ColliderIndex, IndexedCollider, PhysicsSet};

/// Параметры headless backend'а
#[derive(Resource, Debug, Clone, Copy)]
pub struct HeadlessPhysicsConfig {
    /// Гравитация мира (умножается на `PhysicsBody::gravity_scale`)
    pub gravity: Vec2,
    /// Допуск контакта: касание в пределах skin считается контактом
    pub contact_skin: f32,
}

impl Default for HeadlessPhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            contact_skin: 0.02,
        }
    }
}

/// Пары entity, находившиеся в контакте на прошлом тике
///
/// Ключ упорядочен (меньший Entity первым).
#[derive(Resource, Debug, Default)]
pub struct ActiveContacts {
    pairs: HashSet<(Entity, Entity)>,
}

impl ActiveContacts {
    pub fn contains(&self, a: Entity, b: Entity) -> bool {
        self.pairs.contains(&ordered_pair(a, b))
    }
}

fn ordered_pair(a: Entity, b: Entity) -> (Entity, Entity) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Система: гравитация + интеграция (FixedUpdate)
pub fn integrate_bodies(
    config: Res<HeadlessPhysicsConfig>,
    time: Res<Time>,
    mut bodies: Query<(&mut PhysicsBody, Option<&Activation>), Without<StaticBody>>,
) {
    let delta = time.delta_secs();

    for (mut body, activation) in bodies.iter_mut() {
        if !is_active(activation) {
            continue;
        }

        let gravity = config.gravity * body.gravity_scale;
        body.velocity += gravity * delta;
        let velocity = body.velocity;
        body.position += velocity * delta;
    }
}

/// Система: выталкивание динамических тел из статики
///
/// Коллайдеры приводятся к описанным AABB, выталкивание по оси минимального
/// проникновения; компонент скорости "в стену" обнуляется.
pub fn resolve_static_contacts(
    statics: Query<(&PhysicsBody, &Collider), With<StaticBody>>,
    mut dynamics: Query<(&mut PhysicsBody, &Collider, Option<&Activation>), Without<StaticBody>>,
) {
    for (mut body, collider, activation) in dynamics.iter_mut() {
        if !is_active(activation) || collider.is_trigger {
            continue;
        }

        let half = collider.shape.half_extents();

        for (solid, solid_collider) in statics.iter() {
            if solid_collider.is_trigger {
                continue;
            }

            let delta = body.position - solid.position;
            let penetration = half + solid_collider.shape.half_extents() - delta.abs();
            if penetration.x <= 0.0 || penetration.y <= 0.0 {
                continue;
            }

            if penetration.x < penetration.y {
                let sign = delta.x.signum();
                body.position.x += penetration.x * sign;
                if body.velocity.x * sign < 0.0 {
                    body.velocity.x = 0.0;
                }
            } else {
                let sign = delta.y.signum();
                body.position.y += penetration.y * sign;
                if body.velocity.y * sign < 0.0 {
                    body.velocity.y = 0.0;
                }
            }
        }
    }
}

/// Система: snapshot активных collider'ов для overlap queries
pub fn rebuild_collider_index(
    mut index: ResMut<ColliderIndex>,
    colliders: Query<(Entity, &PhysicsBody, &Collider, Option<&Activation>)>,
) {
    index.clear();

    for (entity, body, collider, activation) in colliders.iter() {
        if !is_active(activation) {
            continue;
        }

        index.insert(IndexedCollider {
            entity,
            center: body.position,
            shape: collider.shape,
            layer: collider.layer,
            is_trigger: collider.is_trigger,
        });
    }
}

/// Система: contact begin → `CollisionStarted` (по событию на каждую сторону)
///
/// Trigger'ы collision событий не дают; статика со статикой не проверяется.
pub fn detect_contact_begins(
    config: Res<HeadlessPhysicsConfig>,
    index: Res<ColliderIndex>,
    mut contacts: ResMut<ActiveContacts>,
    statics: Query<(), With<StaticBody>>,
    mut collisions: EventWriter<CollisionStarted>,
) {
    let entries = index.entries();
    let mut current = HashSet::with_capacity(contacts.pairs.len());

    for (i, a) in entries.iter().enumerate() {
        if a.is_trigger {
            continue;
        }

        for b in &entries[i + 1..] {
            if b.is_trigger || a.entity == b.entity {
                continue;
            }
            if statics.contains(a.entity) && statics.contains(b.entity) {
                continue;
            }
            if !a.overlaps(b, config.contact_skin) {
                continue;
            }

            current.insert(ordered_pair(a.entity, b.entity));

            if !contacts.contains(a.entity, b.entity) {
                collisions.write(CollisionStarted { entity: a.entity, other: b.entity });
                collisions.write(CollisionStarted { entity: b.entity, other: a.entity });
            }
        }
    }

    contacts.pairs = current;
}

/// Plugin headless физики
///
/// Регистрирует backend системы в FixedUpdate (после `PhysicsSet::Actors`).
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeadlessPhysicsConfig>()
            .init_resource::<ActiveContacts>()
            .init_resource::<ColliderIndex>()
            .add_event::<CollisionStarted>();

        app.add_systems(
            FixedUpdate,
            (
                (integrate_bodies, resolve_static_contacts)
                    .chain()
                    .in_set(PhysicsSet::Integrate),
                (rebuild_collider_index, detect_contact_begins)
                    .chain()
                    .in_set(PhysicsSet::Broadphase),
            ),
        );
    }
}
