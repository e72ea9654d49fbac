//! Game configuration change detection systems.
//!
//! Monitor [`GameConfig`] for changes and push the settings into the running
//! world. Gameplay values (physics, controllers, cameras) and window values
//! are split so the gameplay half runs without a window.

use crate::components::charactercontroller::CharacterController;
use crate::components::firstpersoncamera::FirstPersonCamera;
use crate::resources::gameconfig::GameConfig;
use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::worldtime::WorldTime;
use bevy_ecs::prelude::*;
use log::info;
use raylib::ffi;

/// Apply physics, controller and camera settings when [`GameConfig`] is added
/// or modified.
///
/// # Resource Dependencies
/// - `GameConfig` (optional) - the configuration to monitor
/// - `PhysicsWorld` (optional, mutable) - gravity and timestep
/// - `WorldTime` (mutable) - fixed step rate
pub fn apply_gameplay_settings(
    maybe_config: Option<Res<GameConfig>>,
    physics: Option<ResMut<PhysicsWorld>>,
    mut time: ResMut<WorldTime>,
    mut controllers: Query<&mut CharacterController>,
    mut cameras: Query<&mut FirstPersonCamera>,
) {
    let Some(config) = maybe_config else {
        return;
    };
    if !config.is_changed() {
        return;
    }

    time.set_fixed_hz(config.fixed_hz);
    if let Some(mut physics) = physics {
        physics.set_gravity(config.gravity_vector());
        physics.set_timestep(time.fixed_delta);
    }
    for mut controller in controllers.iter_mut() {
        controller.settings = config.controller.sanitized();
    }
    for mut camera in cameras.iter_mut() {
        camera.apply_settings(config.camera);
    }
    info!(
        "Gameplay settings applied: gravity={}, fixed_hz={}",
        config.gravity, config.fixed_hz
    );
}

/// Apply window settings when [`GameConfig`] is added or modified.
///
/// # Resource Dependencies
/// - `GameConfig` (optional) - the configuration to monitor
/// - `RaylibHandle` (non-send, mutable) - for window operations
pub fn apply_window_settings(
    maybe_config: Option<Res<GameConfig>>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
) {
    let Some(config) = maybe_config else {
        return;
    };
    if !config.is_changed() {
        return;
    }

    let (w, h) = config.window_size();
    if rl.get_screen_width() != w as i32 || rl.get_screen_height() != h as i32 {
        rl.set_window_size(w as i32, h as i32);
    }

    // Apply vsync setting
    unsafe {
        if config.vsync {
            ffi::SetWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        } else {
            ffi::ClearWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        }
    }

    rl.set_target_fps(config.target_fps);
    info!(
        "Window settings applied: {}x{}, fps={}, vsync={}",
        w, h, config.target_fps, config.vsync
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::charactercontroller::ControllerSettings;
    use crate::components::firstpersoncamera::CameraSettings;

    #[test]
    fn test_gameplay_settings_reach_world() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(PhysicsWorld::default());
        let mut config = GameConfig::new();
        config.gravity = -20.0;
        config.fixed_hz = 100.0;
        config.controller.walk_speed = 3.0;
        config.camera.max_pitch = 45.0;
        world.insert_resource(config);

        let controller = world
            .spawn(CharacterController::new(ControllerSettings::default()))
            .id();
        let mut cam = FirstPersonCamera::new(CameraSettings::default());
        cam.pitch = 80.0;
        let camera = world.spawn(cam).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(apply_gameplay_settings);
        schedule.run(&mut world);

        let physics = world.resource::<PhysicsWorld>();
        assert_eq!(physics.gravity.y, -20.0);
        assert!((physics.timestep() - 0.01).abs() < 1e-6);
        assert!((world.resource::<WorldTime>().fixed_delta - 0.01).abs() < 1e-6);
        assert_eq!(
            world.get::<CharacterController>(controller).unwrap().settings.walk_speed,
            3.0
        );
        assert_eq!(world.get::<FirstPersonCamera>(camera).unwrap().pitch, 45.0);
    }

    #[test]
    fn test_unchanged_config_is_not_reapplied() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(GameConfig::new());
        let mut schedule = Schedule::default();
        schedule.add_systems(apply_gameplay_settings);
        schedule.run(&mut world);

        let entity = world
            .spawn(CharacterController::new(ControllerSettings {
                walk_speed: 1.0,
                ..ControllerSettings::default()
            }))
            .id();
        schedule.run(&mut world);
        assert_eq!(
            world.get::<CharacterController>(entity).unwrap().settings.walk_speed,
            1.0
        );
    }
}
