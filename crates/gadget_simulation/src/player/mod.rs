//! Player module
//!
//! Управляемый игроком актор: input → grounded/airborne/dead state,
//! движение, прыжок, выстрел pooled projectile'ом, урон от врагов.
//!
//! Системы:
//! - `player_collisions` (`GameplaySet::Collisions`)
//! - `announce_spawned_players` (`GameplaySet::Sensors`)
//! - `player_logic_tick` (`GameplaySet::Logic`, после overlap poll)

use bevy::prelude::*;

use crate::components::AnimationSignal;
use crate::physics::CollisionStarted;
use crate::projectile::ProjectileFired;
use crate::GameplaySet;

pub mod components;
pub mod events;
pub mod logic;
pub mod systems;


pub use components::{ArmRig, PlayerActor, PlayerState};
pub use events::{LevelCompleted, PlayerDamaged, PlayerDied};
pub use logic::{choose_action, resolve_contact, ContactOutcome, PlayerAction};
pub use systems::{announce_spawned_players, player_collisions, player_logic_tick};

/// Player Plugin
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ButtonInput<KeyCode>>()
            .add_event::<CollisionStarted>()
            .add_event::<AnimationSignal>()
            .add_event::<ProjectileFired>()
            .add_event::<LevelCompleted>()
            .add_event::<PlayerDamaged>()
            .add_event::<PlayerDied>();

        app.add_systems(
            Update,
            (
                player_collisions.in_set(GameplaySet::Collisions),
                announce_spawned_players.in_set(GameplaySet::Sensors),
                player_logic_tick.in_set(GameplaySet::Logic),
            ),
        );
    }
}
