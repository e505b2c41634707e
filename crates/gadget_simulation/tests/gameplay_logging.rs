//! Логирование gameplay переходов через глобальный sink
//!
//! Logger глобальный на процесс, поэтому здесь ровно один тест: он ставит
//! `MemoryLogger` и владеет им до конца.

use bevy::prelude::*;
use gadget_simulation::logger::MemoryLogger;
use gadget_simulation::{
    create_headless_app, demo_level, set_log_level, set_logger, GameplaySettings, LevelHandles, LogLevel,
    PhysicsBody, SimulationPlugin,
};

fn spawn_demo(app: &mut App) -> LevelHandles {
    let handles = {
        let mut commands = app.world_mut().commands();
        demo_level(&mut commands, &GameplaySettings::default()).unwrap()
    };
    app.world_mut().flush();
    handles
}

fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn keys(app: &mut App) -> Mut<'_, ButtonInput<KeyCode>> {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>()
}

#[test]
fn test_transitions_reach_memory_logger_and_respect_level() {
    let debug_sink = MemoryLogger::new();
    set_logger(Box::new(debug_sink.clone()));
    set_log_level(LogLevel::Debug);

    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);
    let handles = spawn_demo(&mut app);
    run(&mut app, 5);

    keys(&mut app).press(KeyCode::KeyF);
    app.update();
    keys(&mut app).release(KeyCode::KeyF);

    assert!(debug_sink.contains("Demo level spawned"), "{:#?}", debug_sink.lines());
    assert!(debug_sink.contains("spawned"));
    assert!(debug_sink.contains("fired"), "{:#?}", debug_sink.lines());
    assert!(debug_sink.lines().iter().any(|line| line.starts_with("[DEBUG]")));

    // Порог Info: debug строки (выстрелы, overlap, expire) отбрасываются
    let info_sink = MemoryLogger::new();
    set_logger(Box::new(info_sink.clone()));
    set_log_level(LogLevel::Info);

    app.world_mut()
        .get_mut::<PhysicsBody>(handles.player)
        .unwrap()
        .position = Vec2::new(22.0, 1.0);
    keys(&mut app).press(KeyCode::KeyD);
    run(&mut app, 150);

    let lines = info_sink.lines();
    assert!(
        lines.iter().any(|line| line.starts_with("[INFO]") && line.contains("Great Job!")),
        "{:#?}",
        lines
    );
    assert!(lines.iter().all(|line| !line.starts_with("[DEBUG]")), "{:#?}", lines);
    assert!(!info_sink.contains("expired"));

    set_log_level(LogLevel::Debug);
}
