//! Сигналы для animation коллаборатора
//!
//! Fire-and-forget: симуляция пишет события, animation layer
//! (AnimationTree/Animator на стороне движка) их читает. Ответ не нужен.

use bevy::prelude::*;

/// Bool параметр "жив ли актор"
pub const ALIVE_PARAM: &str = "Alive";

/// Trigger параметр прыжка
pub const JUMP_PARAM: &str = "Jump";

/// Event: изменить параметр аниматора
#[derive(Event, Debug, Clone, PartialEq)]
pub enum AnimationSignal {
    /// setBool(param, value)
    SetBool {
        entity: Entity,
        param: &'static str,
        value: bool,
    },

    /// fireTrigger(param)
    Trigger {
        entity: Entity,
        param: &'static str,
    },
}

impl AnimationSignal {
    pub fn entity(&self) -> Entity {
        match self {
            AnimationSignal::SetBool { entity, .. } | AnimationSignal::Trigger { entity, .. } => *entity,
        }
    }
}
