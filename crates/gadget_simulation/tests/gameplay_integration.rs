//! Integration тесты gameplay: headless App + HeadlessPhysicsPlugin
//!
//! Тики считаем с запасом: физика и logic tick синхронизированы по кадрам,
//! но точное число кадров до контакта зависит от геометрии.

use bevy::prelude::*;
use gadget_simulation::level::{spawn_ground, spawn_patrol_enemy, spawn_player, spawn_projectile};
use gadget_simulation::{
    create_headless_app, demo_level, headless_frame, Activation, GameplaySettings, Health, Inert, LevelCompleted,
    LevelHandles, PatrolRoute, PhysicsBody, PlayerState, SimulationPlugin,
};

/// Собирает LevelCompleted (события живут два кадра, копим сами)
#[derive(Resource, Default)]
struct CompletedLog(Vec<Entity>);

fn collect_completed(mut events: EventReader<LevelCompleted>, mut log: ResMut<CompletedLog>) {
    log.0.extend(events.read().map(|event| event.player));
}

fn create_test_app() -> App {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);
    app.init_resource::<CompletedLog>();
    app.add_systems(PostUpdate, collect_completed);
    app
}

fn spawn_demo(app: &mut App, settings: &GameplaySettings) -> LevelHandles {
    let handles = {
        let mut commands = app.world_mut().commands();
        demo_level(&mut commands, settings).unwrap()
    };
    app.world_mut().flush();
    handles
}

fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn press(app: &mut App, key: KeyCode) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
}

fn release(app: &mut App, key: KeyCode) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(key);
}

fn body(app: &App, entity: Entity) -> PhysicsBody {
    *app.world().get::<PhysicsBody>(entity).unwrap()
}

fn is_active(app: &App, entity: Entity) -> bool {
    app.world().get::<Activation>(entity).unwrap().active
}

#[test]
fn test_headless_frame_is_one_fixed_step() {
    assert_eq!(headless_frame(), Time::<Fixed>::from_hz(60.0).timestep());
}

#[test]
fn test_player_settles_grounded() {
    let mut app = create_test_app();
    let handles = spawn_demo(&mut app, &GameplaySettings::default());

    run(&mut app, 30);

    let player = body(&app, handles.player);
    assert!((player.position.y - 1.0).abs() < 0.05, "player y = {}", player.position.y);
    assert_eq!(player.gravity_scale, 2.0);
    assert_eq!(
        app.world().get::<PlayerState>(handles.player),
        Some(&PlayerState::AliveGrounded)
    );
}

#[test]
fn test_jump_lifts_player_once_per_press() {
    let mut app = create_test_app();
    let handles = spawn_demo(&mut app, &GameplaySettings::default());
    run(&mut app, 10);

    press(&mut app, KeyCode::Space);
    app.update();
    assert!(body(&app, handles.player).velocity.y > 10.0);

    // Держим клавишу: взлетели, упали, повторного прыжка нет
    run(&mut app, 120);
    let player = body(&app, handles.player);
    assert!((player.position.y - 1.0).abs() < 0.05, "player y = {}", player.position.y);
    assert!(player.velocity.y.abs() < 0.5);
    assert_eq!(
        app.world().get::<PlayerState>(handles.player),
        Some(&PlayerState::AliveGrounded)
    );
}

#[test]
fn test_projectile_expires_after_ttl() {
    let mut app = create_test_app();
    let handles = spawn_demo(&mut app, &GameplaySettings::default());
    run(&mut app, 5);

    press(&mut app, KeyCode::KeyF);
    app.update();
    release(&mut app, KeyCode::KeyF);
    assert!(is_active(&app, handles.projectile));

    let launched = body(&app, handles.projectile).velocity;
    assert!((launched.length() - 15.0).abs() < 1e-3);

    // 2 секунды = 120 кадров; незадолго до конца ещё летит
    run(&mut app, 110);
    assert!(is_active(&app, handles.projectile));

    // Повторный выстрел, пока летит: no-op
    let before = body(&app, handles.projectile);
    press(&mut app, KeyCode::KeyF);
    app.update();
    release(&mut app, KeyCode::KeyF);
    let after = body(&app, handles.projectile);
    assert_eq!(after.velocity, before.velocity);
    assert!(after.position.x > before.position.x, "projectile was re-placed at the hand");

    run(&mut app, 15);
    assert!(!is_active(&app, handles.projectile));
}

#[test]
fn test_patrol_stays_within_route() {
    let mut app = create_test_app();
    let handles = spawn_demo(&mut app, &GameplaySettings::default());
    let route = *app.world().get::<PatrolRoute>(handles.enemy).unwrap();
    let slack = route.speed() * headless_frame().as_secs_f32() + 0.01;

    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    for _ in 0..600 {
        app.update();
        let x = body(&app, handles.enemy).position.x;
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }

    assert!(min_x >= route.from_point() - slack, "min x = {min_x}");
    assert!(max_x <= route.to_point() + slack, "max x = {max_x}");
    // Маршрут действительно пройден в обе стороны
    assert!(min_x < route.from_point() + 0.5);
    assert!(max_x > route.to_point() - 0.5);
}

#[test]
fn test_bullet_deactivates_enemy() {
    let mut settings = GameplaySettings::default();
    settings.player.arm_angle = 0.0;

    let mut app = create_test_app();
    let handles = spawn_demo(&mut app, &settings);
    run(&mut app, 5);

    press(&mut app, KeyCode::KeyF);
    app.update();
    release(&mut app, KeyCode::KeyF);

    run(&mut app, 90);

    assert!(!is_active(&app, handles.enemy), "enemy survived the shot");
    assert!(!is_active(&app, handles.projectile), "projectile kept flying after the hit");
    // Pooled: entity никуда не делись
    assert!(app.world().get_entity(handles.enemy).is_ok());
    assert!(app.world().get_entity(handles.projectile).is_ok());
}

#[test]
fn test_enemy_contact_hurts_player_and_disables_enemy() {
    let mut settings = GameplaySettings::default();
    settings.player.health = 2;
    settings.patrol.patrol_size = -5.0;

    let mut app = create_test_app();
    let (player, enemy) = {
        let mut commands = app.world_mut().commands();
        spawn_ground(&mut commands, Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.5));
        let projectile = spawn_projectile(&mut commands, &settings.projectile);
        let bindings = settings.controls.bindings().unwrap();
        let player = spawn_player(&mut commands, Vec2::new(-2.0, 1.0), &settings.player, bindings, projectile);
        let enemy = spawn_patrol_enemy(&mut commands, Vec2::new(2.0, 0.9), &settings.patrol);
        (player, enemy)
    };
    app.world_mut().flush();

    run(&mut app, 120);

    assert_eq!(app.world().get::<Health>(player).unwrap().current, 1);
    assert!(app.world().get::<PlayerState>(player).unwrap().is_alive());
    assert!(app.world().get::<Inert>(enemy).is_some());
    // Отключённый враг не разворачивается и продолжает идти
    assert!(body(&app, enemy).velocity.x < 0.0);
    assert!(is_active(&app, enemy));
}

#[test]
fn test_lethal_contact_kills_player() {
    let mut settings = GameplaySettings::default();
    settings.patrol.patrol_size = -5.0;

    let mut app = create_test_app();
    let (player, projectile) = {
        let mut commands = app.world_mut().commands();
        spawn_ground(&mut commands, Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.5));
        let projectile = spawn_projectile(&mut commands, &settings.projectile);
        let bindings = settings.controls.bindings().unwrap();
        let player = spawn_player(&mut commands, Vec2::new(-2.0, 1.0), &settings.player, bindings, projectile);
        spawn_patrol_enemy(&mut commands, Vec2::new(2.0, 0.9), &settings.patrol);
        (player, projectile)
    };
    app.world_mut().flush();

    run(&mut app, 120);

    assert_eq!(app.world().get::<Health>(player).unwrap().current, 0);
    assert_eq!(app.world().get::<PlayerState>(player), Some(&PlayerState::Dead));
    assert!(app.world().get::<Inert>(player).is_some());
    assert_eq!(body(&app, player).gravity_scale, 4.0);

    // Input мёртвому игроку ничего не делает
    let x = body(&app, player).position.x;
    press(&mut app, KeyCode::KeyD);
    press(&mut app, KeyCode::KeyF);
    run(&mut app, 30);
    assert!((body(&app, player).position.x - x).abs() < 1e-4);
    assert!(!is_active(&app, projectile));
}

#[test]
fn test_reaching_goal_completes_level() {
    let mut app = create_test_app();
    let handles = spawn_demo(&mut app, &GameplaySettings::default());
    app.world_mut()
        .get_mut::<PhysicsBody>(handles.player)
        .unwrap()
        .position = Vec2::new(22.0, 1.0);

    press(&mut app, KeyCode::KeyD);
    run(&mut app, 60);

    assert_eq!(app.world().resource::<CompletedLog>().0, vec![handles.player]);
    assert_eq!(app.world().get::<Health>(handles.player).unwrap().current, 1);
}
