//! Headless симуляция Gadget
//!
//! Запускает демо-уровень без рендера: скриптованный input, физика из
//! `HeadlessPhysicsPlugin`, состояние печатается в лог.
//!
//! Использование: `gadget_simulation [settings.ron]`

use bevy::prelude::*;
use gadget_simulation::{
    create_headless_app, demo_level, log_error, log_info, GameplaySettings, Health, PhysicsBody, PlayerState,
    SimulationPlugin,
};

/// Скрипт нажатий: (кадр, клавиша, нажать/отпустить)
const SCRIPT: &[(u32, KeyCode, bool)] = &[
    (30, KeyCode::KeyF, true),
    (31, KeyCode::KeyF, false),
    (60, KeyCode::KeyD, true),
    (120, KeyCode::Space, true),
    (121, KeyCode::Space, false),
    (400, KeyCode::KeyD, false),
];

const FRAMES: u32 = 600;

fn main() {
    let mut app = create_headless_app();

    let settings = match std::env::args().nth(1) {
        Some(path) => GameplaySettings::load_or_default(path),
        None => GameplaySettings::default(),
    };

    app.add_plugins(SimulationPlugin);
    app.insert_resource(settings.clone());

    let handles = {
        let mut commands = app.world_mut().commands();
        demo_level(&mut commands, &settings)
    };
    app.world_mut().flush();

    let handles = match handles {
        Ok(handles) => handles,
        Err(err) => {
            log_error(&format!("Failed to build demo level: {}", err));
            std::process::exit(1);
        }
    };

    log_info("Starting Gadget headless simulation");

    for frame in 0..FRAMES {
        for &(at, key, pressed) in SCRIPT {
            if at != frame {
                continue;
            }
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            if pressed {
                keys.press(key);
            } else {
                keys.release(key);
            }
        }

        app.update();

        if frame % 60 == 0 {
            let world = app.world();
            let position = world.get::<PhysicsBody>(handles.player).map(|body| body.position);
            let state = world.get::<PlayerState>(handles.player).copied();
            let health = world.get::<Health>(handles.player).map(|health| health.current);
            log_info(&format!(
                "Frame {}: player {:?} at {:?}, health {:?}",
                frame, state, position, health
            ));
        }
    }

    log_info("Simulation complete!");
}
