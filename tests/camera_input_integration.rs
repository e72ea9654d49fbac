//! Frame-side integration tests: camera look and follow, input events,
//! HUD updates and config reloads. None of these need a window.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::RunSystemOnce;

use firstperson::components::charactercontroller::{CharacterController, ControllerSettings};
use firstperson::components::firstpersoncamera::{CameraSettings, FirstPersonCamera};
use firstperson::components::progressbar::{ProgressBar, SpeedBar};
use firstperson::components::suspended::Suspended;
use firstperson::components::transform3d::Transform3D;
use firstperson::events::input::{
    controller_input_observer, suspend_controller_observer, InputAction, InputEvent,
};
use firstperson::events::reloadconfig::{reload_config_observer, ReloadConfigEvent};
use firstperson::events::switchdebug::switch_debug_observer;
use firstperson::game::{spawn_camera, spawn_speed_bar};
use firstperson::math::{self, Vec2, Vec3};
use firstperson::resources::debugmode::DebugMode;
use firstperson::resources::gameconfig::GameConfig;
use firstperson::resources::input::InputState;
use firstperson::resources::physicsworld::PhysicsWorld;
use firstperson::resources::worldtime::WorldTime;
use firstperson::resources::camera3d::Camera3DRes;
use firstperson::systems::camera::{follow_target, rotate_camera, sync_raylib_camera};
use firstperson::systems::gameconfig::apply_gameplay_settings;
use firstperson::systems::hud::update_speed_bar;
use firstperson::systems::input::dispatch_input_events;

const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    let mut time = WorldTime::default();
    time.delta = 0.5;
    world.insert_resource(time);
    world.insert_resource(InputState::default());
    world
}

fn run_once<M>(world: &mut World, system: impl IntoSystem<(), (), M>) {
    world.run_system_once(system).unwrap();
}

fn spawn_target(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((
            CharacterController::new(ControllerSettings::default()),
            Transform3D::from_translation(position),
        ))
        .id()
}

fn camera(world: &World, entity: Entity) -> &FirstPersonCamera {
    world.get::<FirstPersonCamera>(entity).unwrap()
}

// ==================== CAMERA TESTS ====================

#[test]
fn test_mouse_look_turns_right_and_up() {
    let mut world = make_world();
    let target = spawn_target(&mut world, Vec3::zeros());
    let cam = spawn_camera(&mut world, target, 0.0, CameraSettings::default());
    world.resource_mut::<InputState>().look_delta = Vec2::new(100.0, 50.0);

    run_once(&mut world, rotate_camera);

    // 0.1 degrees per pixel, positive x turns right (negative yaw)
    assert!(approx_eq(camera(&world, cam).yaw, 350.0));
    assert!(approx_eq(camera(&world, cam).pitch, 5.0));
}

#[test]
fn test_rate_look_scales_with_delta() {
    let mut world = make_world();
    let target = spawn_target(&mut world, Vec3::zeros());
    let cam = spawn_camera(&mut world, target, 0.0, CameraSettings::default());
    world.resource_mut::<InputState>().look_rate = Vec2::new(-1.0, -1.0);

    run_once(&mut world, rotate_camera);

    // 120 deg/s * 0.5 s to the left, 90 deg/s * 0.5 s down
    assert!(approx_eq(camera(&world, cam).yaw, 60.0));
    assert!(approx_eq(camera(&world, cam).pitch, -45.0));
}

#[test]
fn test_pitch_is_clamped() {
    let mut world = make_world();
    let target = spawn_target(&mut world, Vec3::zeros());
    let settings = CameraSettings {
        min_pitch: -60.0,
        max_pitch: 60.0,
        ..CameraSettings::default()
    };
    let cam = spawn_camera(&mut world, target, 0.0, settings);

    world.resource_mut::<InputState>().look_delta = Vec2::new(0.0, 10_000.0);
    run_once(&mut world, rotate_camera);
    assert_eq!(camera(&world, cam).pitch, 60.0);

    world.resource_mut::<InputState>().look_delta = Vec2::new(0.0, -20_000.0);
    run_once(&mut world, rotate_camera);
    assert_eq!(camera(&world, cam).pitch, -60.0);
}

#[test]
fn test_released_cursor_ignores_look() {
    let mut world = make_world();
    let target = spawn_target(&mut world, Vec3::zeros());
    let cam = spawn_camera(&mut world, target, 30.0, CameraSettings::default());
    {
        let mut input = world.resource_mut::<InputState>();
        input.cursor_captured = false;
        input.look_delta = Vec2::new(100.0, 100.0);
        input.look_rate = Vec2::new(1.0, 1.0);
    }

    run_once(&mut world, rotate_camera);

    assert_eq!(camera(&world, cam).yaw, 30.0);
    assert_eq!(camera(&world, cam).pitch, 0.0);
}

#[test]
fn test_camera_follows_target_eye() {
    let mut world = make_world();
    let target = spawn_target(&mut world, Vec3::new(3.0, 0.9, -2.0));
    let cam = spawn_camera(&mut world, target, 90.0, CameraSettings::default());

    world.get_mut::<Transform3D>(target).unwrap().translation = Vec3::new(5.0, 1.0, 1.0);
    run_once(&mut world, follow_target);

    let transform = *world.get::<Transform3D>(cam).unwrap();
    assert!(approx_eq(transform.translation.x, 5.0));
    assert!(approx_eq(transform.translation.y, 1.7));
    assert!(approx_eq(transform.translation.z, 1.0));
    // yaw 90 looks down -X
    assert!(approx_eq(transform.forward().x, -1.0));
}

#[test]
fn test_crouching_lowers_the_eye() {
    let mut world = make_world();
    let target = spawn_target(&mut world, Vec3::zeros());
    let cam = spawn_camera(&mut world, target, 0.0, CameraSettings::default());
    world.get_mut::<CharacterController>(target).unwrap().crouch_held = true;

    run_once(&mut world, follow_target);

    let y = world.get::<Transform3D>(cam).unwrap().translation.y;
    assert!(approx_eq(y, 0.3));
}

#[test]
fn test_camera_without_target_keeps_position() {
    let mut world = make_world();
    let start = Vec3::new(1.0, 2.0, 3.0);
    let cam = world
        .spawn((
            FirstPersonCamera::new(CameraSettings::default()).with_yaw(45.0),
            Transform3D::from_translation(start),
        ))
        .id();

    run_once(&mut world, follow_target);

    let transform = world.get::<Transform3D>(cam).unwrap();
    assert_eq!(transform.translation, start);
    assert!(approx_eq(math::yaw_degrees(&transform.rotation), 45.0));
}

#[test]
fn test_raylib_camera_up_follows_pitch() {
    let mut world = make_world();
    world.insert_resource(Camera3DRes::perspective(70.0));
    let target = spawn_target(&mut world, Vec3::zeros());
    let cam = spawn_camera(&mut world, target, 0.0, CameraSettings::default());
    world.get_mut::<FirstPersonCamera>(cam).unwrap().pitch = 90.0;

    run_once(&mut world, follow_target);
    run_once(&mut world, sync_raylib_camera);

    let view = world.resource::<Camera3DRes>().0;
    let look = Vec3::new(
        view.target.x - view.position.x,
        view.target.y - view.position.y,
        view.target.z - view.position.z,
    );
    let up = Vec3::new(view.up.x, view.up.y, view.up.z);
    // looking straight up, the view's up is world +Z and never parallel to the look
    assert!(approx_eq(look.y, 1.0));
    assert!(approx_eq(up.z, 1.0));
    assert!(look.dot(&up).abs() < EPSILON);
}

// ==================== INPUT EVENT TESTS ====================

fn with_input_observer(world: &mut World) {
    world.spawn(Observer::new(controller_input_observer));
    world.spawn(Observer::new(suspend_controller_observer));
    world.flush();
}

fn press(world: &mut World, action: InputAction, pressed: bool) {
    world.trigger(InputEvent { action, pressed });
}

#[test]
fn test_input_events_set_controller_flags() {
    let mut world = make_world();
    with_input_observer(&mut world);
    let player = spawn_target(&mut world, Vec3::zeros());

    world.trigger(InputEvent {
        action: InputAction::Jump,
        pressed: true,
    });
    world.trigger(InputEvent {
        action: InputAction::Run,
        pressed: true,
    });
    {
        let c = world.get::<CharacterController>(player).unwrap();
        assert!(c.jump_request);
        assert!(c.run_held);
        assert!(!c.crouch_held);
    }

    world.trigger(InputEvent {
        action: InputAction::Run,
        pressed: false,
    });
    assert!(!world.get::<CharacterController>(player).unwrap().run_held);
}

#[test]
fn test_suspended_controller_ignores_input_events() {
    let mut world = make_world();
    with_input_observer(&mut world);
    let player = spawn_target(&mut world, Vec3::zeros());
    world.entity_mut(player).insert(Suspended);

    world.trigger(InputEvent {
        action: InputAction::Crouch,
        pressed: true,
    });
    assert!(!world.get::<CharacterController>(player).unwrap().crouch_held);
}

#[test]
fn test_dispatch_triggers_on_key_edges() {
    let mut world = make_world();
    with_input_observer(&mut world);
    let player = spawn_target(&mut world, Vec3::zeros());

    world.resource_mut::<InputState>().jump.update(true);
    run_once(&mut world, dispatch_input_events);
    assert!(world.get::<CharacterController>(player).unwrap().jump_request);

    // holding the key does not retrigger; releasing cancels
    world.resource_mut::<InputState>().jump.update(true);
    run_once(&mut world, dispatch_input_events);
    assert!(world.get::<CharacterController>(player).unwrap().jump_request);
    world.resource_mut::<InputState>().jump.update(false);
    run_once(&mut world, dispatch_input_events);
    assert!(!world.get::<CharacterController>(player).unwrap().jump_request);
}

#[test]
fn test_debug_key_toggles_debug_mode() {
    let mut world = make_world();
    world.spawn(Observer::new(switch_debug_observer));
    world.flush();

    world.resource_mut::<InputState>().mode_debug.update(true);
    run_once(&mut world, dispatch_input_events);
    world.flush();
    assert!(world.contains_resource::<DebugMode>());

    world.resource_mut::<InputState>().mode_debug.update(false);
    world.resource_mut::<InputState>().mode_debug.update(true);
    run_once(&mut world, dispatch_input_events);
    world.flush();
    assert!(!world.contains_resource::<DebugMode>());
}

#[test]
fn test_resumed_controller_does_not_keep_held_input() {
    let mut world = make_world();
    with_input_observer(&mut world);
    let player = spawn_target(&mut world, Vec3::zeros());

    press(&mut world, InputAction::Run, true);
    press(&mut world, InputAction::Jump, true);
    press(&mut world, InputAction::Crouch, true);
    world.entity_mut(player).insert(Suspended);
    world.flush();
    // released while suspended, never seen by the controller
    press(&mut world, InputAction::Run, false);
    press(&mut world, InputAction::Jump, false);
    press(&mut world, InputAction::Crouch, false);
    world.entity_mut(player).remove::<Suspended>();

    let c = world.get::<CharacterController>(player).unwrap();
    assert!(!c.run_held);
    assert!(!c.jump_request);
    assert!(!c.crouch_held);
}

#[test]
fn test_suspending_other_entities_is_harmless() {
    let mut world = make_world();
    with_input_observer(&mut world);
    let player = spawn_target(&mut world, Vec3::zeros());
    let prop = world.spawn(Transform3D::default()).id();

    press(&mut world, InputAction::Run, true);
    world.entity_mut(prop).insert(Suspended);
    world.flush();
    assert!(world.get::<CharacterController>(player).unwrap().run_held);
}

// ==================== HUD TESTS ====================

#[test]
fn test_speed_bar_tracks_speed_fraction() {
    let mut world = make_world();
    let player = spawn_target(&mut world, Vec3::zeros());
    let bar = spawn_speed_bar(&mut world, player, 600);
    world.get_mut::<CharacterController>(player).unwrap().current_speed = 4.0;

    run_once(&mut world, update_speed_bar);
    // run speed is 8
    assert!(approx_eq(world.get::<ProgressBar>(bar).unwrap().fill(), 0.5));

    world.get_mut::<CharacterController>(player).unwrap().current_speed = 20.0;
    run_once(&mut world, update_speed_bar);
    assert_eq!(world.get::<ProgressBar>(bar).unwrap().fill(), 1.0);
}

#[test]
fn test_speed_bar_resets_without_source() {
    let mut world = make_world();
    let player = spawn_target(&mut world, Vec3::zeros());
    let bar = spawn_speed_bar(&mut world, player, 600);
    world.get_mut::<CharacterController>(player).unwrap().current_speed = 8.0;
    run_once(&mut world, update_speed_bar);

    world.despawn(player);
    run_once(&mut world, update_speed_bar);
    assert_eq!(world.get::<ProgressBar>(bar).unwrap().fill(), 0.0);
    assert_eq!(world.get::<SpeedBar>(bar).unwrap().source, player);
}

// ==================== CONFIG TESTS ====================

fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("firstperson_{}_{}.ini", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_gameplay_settings_reach_controllers_and_physics() {
    let mut world = make_world();
    world.insert_resource(PhysicsWorld::default());
    let player = spawn_target(&mut world, Vec3::zeros());
    let cam = spawn_camera(&mut world, player, 0.0, CameraSettings::default());

    let mut config = GameConfig::new();
    config.gravity = -20.0;
    config.fixed_hz = 100.0;
    config.controller.walk_speed = 3.0;
    config.camera.mouse_sensitivity = 0.5;
    world.insert_resource(config);

    run_once(&mut world, apply_gameplay_settings);

    assert_eq!(world.get::<CharacterController>(player).unwrap().settings.walk_speed, 3.0);
    assert_eq!(camera(&world, cam).settings.mouse_sensitivity, 0.5);
    assert!(approx_eq(world.resource::<WorldTime>().fixed_delta, 0.01));
    let physics = world.resource::<PhysicsWorld>();
    assert_eq!(physics.gravity.y, -20.0);
    assert!(approx_eq(physics.timestep(), 0.01));
}

#[test]
fn test_reload_picks_up_file_changes() {
    let path = temp_config("reload", "[controller]\nwalk_speed = 6.5\n\n[physics]\nfixed_hz = 60\n");
    let mut world = make_world();
    world.spawn(Observer::new(reload_config_observer));
    world.flush();
    world.insert_resource(GameConfig::with_path(&path));
    let player = spawn_target(&mut world, Vec3::zeros());

    world.trigger(ReloadConfigEvent {});
    run_once(&mut world, apply_gameplay_settings);

    let config = world.resource::<GameConfig>();
    assert_eq!(config.controller.walk_speed, 6.5);
    assert_eq!(config.fixed_hz, 60.0);
    assert_eq!(world.get::<CharacterController>(player).unwrap().settings.walk_speed, 6.5);
    std::fs::remove_file(path).ok();
}

#[test]
fn test_failed_reload_keeps_current_values() {
    let mut world = make_world();
    world.spawn(Observer::new(reload_config_observer));
    world.flush();
    let mut config = GameConfig::with_path("/nonexistent/firstperson/config.ini");
    config.controller.run_speed = 11.0;
    world.insert_resource(config);

    world.trigger(ReloadConfigEvent {});

    let config = world.resource::<GameConfig>();
    assert_eq!(config.controller.run_speed, 11.0);
    assert_eq!(config.config_path, std::path::PathBuf::from("/nonexistent/firstperson/config.ini"));
}
