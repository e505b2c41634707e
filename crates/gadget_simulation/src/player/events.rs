//! Player events (ECS → presentation)

use bevy::prelude::*;

/// Event: игрок коснулся финиша
#[derive(Event, Debug, Clone, Copy)]
pub struct LevelCompleted {
    pub player: Entity,
}

/// Event: игрок получил урон, но жив
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDamaged {
    pub player: Entity,
    pub source: Entity,
    pub remaining: u32,
}

/// Event: игрок умер (health = 0)
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDied {
    pub player: Entity,
    pub killer: Entity,
}
