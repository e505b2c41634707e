//! Pooled projectile
//!
//! Один projectile на игрока: не спавнится и не деспавнится, а
//! активируется/деактивируется (`Activation`).
//!
//! Lifecycle:
//! 1. Player logic → `Projectile::activate` (позиция руки, velocity, countdown)
//! 2. `tick_projectile_lifetimes` → деактивация по TTL
//! 3. `projectile_collisions` → деактивация при контакте с чем угодно, кроме игрока
//!
//! Что случится первым, то и выигрывает; у неактивного countdown не тикает.

use bevy::prelude::*;
use std::time::Duration;

use crate::components::{Activation, ColliderTag, PhysicsBody};
use crate::physics::CollisionStarted;
use crate::GameplaySet;

/// Верхняя граница TTL (секунды); больше `Timer` не принимает без паники
pub const MAX_TIME_TO_LIVE: f32 = 3600.0;

/// Pooled projectile (TTL + countdown)
#[derive(Component, Debug, Clone)]
#[require(Activation)]
pub struct Projectile {
    time_to_live: f32,
    countdown: Timer,
}

impl Projectile {
    /// TTL зажимается в `0..=MAX_TIME_TO_LIVE` (NaN/inf → максимум)
    pub fn new(time_to_live: f32) -> Self {
        let time_to_live = if time_to_live.is_finite() {
            time_to_live.clamp(0.0, MAX_TIME_TO_LIVE)
        } else {
            MAX_TIME_TO_LIVE
        };

        Self {
            time_to_live,
            countdown: Timer::from_seconds(time_to_live, TimerMode::Once),
        }
    }

    pub fn time_to_live(&self) -> f32 {
        self.time_to_live
    }

    /// Остаток countdown'а (секунды)
    pub fn remaining_secs(&self) -> f32 {
        self.countdown.remaining_secs()
    }

    /// Активировать: позиция + velocity в тело, countdown заново
    pub fn activate(
        &mut self,
        body: &mut PhysicsBody,
        activation: &mut Activation,
        position: Vec2,
        velocity: Vec2,
    ) {
        activation.set_active(true);
        body.position = position;
        body.velocity = velocity;
        self.countdown.reset();
    }

    /// Тик countdown'а; true, если TTL истёк именно на этом тике
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.countdown.tick(delta).just_finished()
    }
}

/// Event: projectile выпущен (player logic)
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileFired {
    pub shooter: Entity,
    pub projectile: Entity,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Event: projectile погас по TTL
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileExpired {
    pub projectile: Entity,
}

/// Event: projectile погас от контакта
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub target: Entity,
    pub target_tag: ColliderTag,
}

/// Система: countdown активных projectile'ов (logic tick)
pub fn tick_projectile_lifetimes(
    time: Res<Time>,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Activation)>,
    mut expired: EventWriter<ProjectileExpired>,
) {
    for (entity, mut projectile, mut activation) in projectiles.iter_mut() {
        if !activation.active {
            continue;
        }

        if projectile.tick(time.delta()) {
            activation.set_active(false);
            expired.write(ProjectileExpired { projectile: entity });
            crate::log(&format!("💨 Projectile {:?} expired (ttl {}s)", entity, projectile.time_to_live()));
        }
    }
}

/// Система: collision callback projectile'а
///
/// Игрок: friendly fire immunity (летим дальше), всё остальное гасит projectile.
pub fn projectile_collisions(
    mut collisions: EventReader<CollisionStarted>,
    tags: Query<&ColliderTag>,
    mut projectiles: Query<&mut Activation, With<Projectile>>,
    mut hits: EventWriter<ProjectileHit>,
) {
    for collision in collisions.read() {
        let Ok(mut activation) = projectiles.get_mut(collision.entity) else {
            continue;
        };

        // Уже погас (TTL или предыдущий контакт в этом же батче)
        if !activation.active {
            continue;
        }

        let target_tag = ColliderTag::of(&tags, collision.other);
        if target_tag == ColliderTag::Player {
            continue;
        }

        activation.set_active(false);
        hits.write(ProjectileHit {
            projectile: collision.entity,
            target: collision.other,
            target_tag,
        });

        crate::log(&format!(
            "🎯 Projectile {:?} hit {:?} ({:?})",
            collision.entity, collision.other, target_tag
        ));
    }
}

/// Projectile Plugin
///
/// - `projectile_collisions` в `GameplaySet::Collisions`
/// - `tick_projectile_lifetimes` в `GameplaySet::Sensors` (до player logic:
///   countdown, запущенный в этом кадре, начнёт тикать со следующего)
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollisionStarted>()
            .add_event::<ProjectileFired>()
            .add_event::<ProjectileExpired>()
            .add_event::<ProjectileHit>();

        app.add_systems(
            Update,
            (
                projectile_collisions.in_set(GameplaySet::Collisions),
                tick_projectile_lifetimes.in_set(GameplaySet::Sensors),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inactive_projectile() -> (Projectile, PhysicsBody, Activation) {
        (Projectile::new(2.0), PhysicsBody::default(), Activation::INACTIVE)
    }

    #[test]
    fn test_activate_places_body_and_resets_countdown() {
        let (mut projectile, mut body, mut activation) = inactive_projectile();

        projectile.activate(&mut body, &mut activation, Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));

        assert!(activation.active);
        assert_eq!(body.position, Vec2::new(1.0, 2.0));
        assert_eq!(body.velocity, Vec2::new(3.0, 4.0));
        assert_eq!(projectile.remaining_secs(), 2.0);
    }

    #[test]
    fn test_expires_exactly_at_ttl() {
        let (mut projectile, mut body, mut activation) = inactive_projectile();
        projectile.activate(&mut body, &mut activation, Vec2::ZERO, Vec2::X);

        assert!(!projectile.tick(Duration::from_secs(1)));
        assert!(!projectile.tick(Duration::from_millis(999)));
        assert!(projectile.tick(Duration::from_millis(1)));
    }

    #[test]
    fn test_reactivation_restarts_countdown() {
        let (mut projectile, mut body, mut activation) = inactive_projectile();
        projectile.activate(&mut body, &mut activation, Vec2::ZERO, Vec2::X);
        assert!(projectile.tick(Duration::from_secs(2)));

        activation.set_active(false);
        projectile.activate(&mut body, &mut activation, Vec2::Y, Vec2::X);

        assert!(!projectile.tick(Duration::from_millis(1500)));
        assert!(projectile.tick(Duration::from_millis(500)));
    }

    #[test]
    fn test_unbounded_ttl_is_clamped() {
        assert_eq!(Projectile::new(1e30).time_to_live(), MAX_TIME_TO_LIVE);
        assert_eq!(Projectile::new(f32::INFINITY).time_to_live(), MAX_TIME_TO_LIVE);
        assert_eq!(Projectile::new(f32::NAN).time_to_live(), MAX_TIME_TO_LIVE);
        assert_eq!(Projectile::new(-1.0).time_to_live(), 0.0);
    }

    fn collision_world() -> (World, Schedule, Entity) {
        let mut world = World::new();
        world.init_resource::<Events<CollisionStarted>>();
        world.init_resource::<Events<ProjectileHit>>();

        let mut schedule = Schedule::default();
        schedule.add_systems(projectile_collisions);

        let mut projectile = Projectile::new(2.0);
        let mut body = PhysicsBody::default();
        let mut activation = Activation::INACTIVE;
        projectile.activate(&mut body, &mut activation, Vec2::ZERO, Vec2::X);
        let entity = world.spawn((projectile, body, activation, ColliderTag::Bullet)).id();

        (world, schedule, entity)
    }

    #[test]
    fn test_player_contact_never_deactivates() {
        let (mut world, mut schedule, projectile) = collision_world();
        let player = world.spawn(ColliderTag::Player).id();

        world.send_event(CollisionStarted { entity: projectile, other: player });
        schedule.run(&mut world);

        assert!(world.get::<Activation>(projectile).unwrap().active);
        assert_eq!(world.resource::<Events<ProjectileHit>>().len(), 0);
    }

    #[test]
    fn test_other_contact_deactivates_before_ttl() {
        let (mut world, mut schedule, projectile) = collision_world();
        let wall = world.spawn_empty().id();
        let enemy = world.spawn(ColliderTag::Enemy).id();

        world.send_event(CollisionStarted { entity: projectile, other: wall });
        world.send_event(CollisionStarted { entity: projectile, other: enemy });
        schedule.run(&mut world);

        assert!(!world.get::<Activation>(projectile).unwrap().active);
        // Второй контакт в том же батче уже не считается
        let hits: Vec<_> = world.resource_mut::<Events<ProjectileHit>>().drain().collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, wall);
        assert_eq!(hits[0].target_tag, ColliderTag::Untagged);
        assert!(world.get::<Projectile>(projectile).unwrap().remaining_secs() > 0.0);
    }
}
