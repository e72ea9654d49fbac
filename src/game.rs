//! Scene setup.
//!
//! Builds the playable scene from a [`Level`]: static blocks, scattered
//! dynamic props, the player capsule, its first-person camera and the speed
//! bar. Every body is created in the [`PhysicsWorld`] resource and linked to
//! its entity through [`PhysicsBody`].

use bevy_ecs::prelude::*;
use log::info;
use rapier3d::na::{Isometry3, Translation3};
use rapier3d::prelude::*;
use raylib::prelude::Color;

use crate::components::block::BlockShape;
use crate::components::capsule::CapsuleShape;
use crate::components::charactercontroller::{CharacterController, ControllerSettings};
use crate::components::firstpersoncamera::{CameraSettings, FirstPersonCamera};
use crate::components::physicsbody::PhysicsBody;
use crate::components::progressbar::{ProgressBar, SpeedBar};
use crate::components::transform3d::Transform3D;
use crate::math::{self, Quat, Vec3};
use crate::resources::gameconfig::GameConfig;
use crate::resources::level::{BlockSpec, Level, PropSpec};
use crate::resources::physicsworld::PhysicsWorld;

/// Player capsule dimensions.
pub const PLAYER_RADIUS: f32 = 0.4;
pub const PLAYER_HEIGHT: f32 = 1.8;

/// Entities created by [`setup_scene`].
#[derive(Debug, Clone, Copy)]
pub struct SceneHandles {
    pub player: Entity,
    pub camera: Entity,
    pub speed_bar: Entity,
}

fn block_rotation(spec: &BlockSpec) -> Quat {
    Quat::from_axis_angle(&Vec3::z_axis(), spec.tilt_z.to_radians())
        * Quat::from_axis_angle(&Vec3::x_axis(), spec.tilt_x.to_radians())
}

fn to_color(c: [u8; 4]) -> Color {
    Color::new(c[0], c[1], c[2], c[3])
}

/// Spawn a fixed box. Needs the [`PhysicsWorld`] resource.
pub fn spawn_block(world: &mut World, spec: &BlockSpec) -> Entity {
    let half = Vec3::from(spec.size) * 0.5;
    let center = Vec3::from(spec.center);
    let rotation = block_rotation(spec);
    let entity = world
        .spawn((
            BlockShape::new(half, to_color(spec.color)),
            Transform3D::new(center, rotation),
        ))
        .id();

    let body = RigidBodyBuilder::fixed()
        .position(Isometry3::from_parts(Translation3::from(center), rotation))
        .build();
    let collider = ColliderBuilder::cuboid(half.x, half.y, half.z).build();
    let handles = world
        .resource_mut::<PhysicsWorld>()
        .spawn_body(entity, body, collider);
    world.entity_mut(entity).insert(handles);
    entity
}

/// Drop `spec.count` dynamic boxes at seeded random positions.
pub fn spawn_props(world: &mut World, spec: &PropSpec) -> Vec<Entity> {
    let mut rng = fastrand::Rng::with_seed(spec.seed);
    let mut spawned = Vec::with_capacity(spec.count as usize);
    for i in 0..spec.count {
        let size = spec.min_size + rng.f32() * (spec.max_size - spec.min_size);
        let half = Vec3::repeat(size * 0.5);
        let position = Vec3::new(
            (rng.f32() * 2.0 - 1.0) * spec.area[0],
            spec.drop_height + i as f32 * spec.max_size,
            (rng.f32() * 2.0 - 1.0) * spec.area[1],
        );
        let rotation = math::yaw_rotation(rng.f32() * 360.0);
        let color = Color::new(rng.u8(90..=230), rng.u8(90..=230), rng.u8(90..=230), 255);

        let entity = world
            .spawn((BlockShape::new(half, color), Transform3D::new(position, rotation)))
            .id();
        let body = RigidBodyBuilder::dynamic()
            .position(Isometry3::from_parts(Translation3::from(position), rotation))
            .build();
        let collider = ColliderBuilder::cuboid(half.x, half.y, half.z)
            .density(0.5)
            .build();
        let handles = world
            .resource_mut::<PhysicsWorld>()
            .spawn_body(entity, body, collider);
        world.entity_mut(entity).insert(handles);
        spawned.push(entity);
    }
    spawned
}

/// Spawn the player capsule at `position` facing `yaw` degrees.
///
/// The body is dynamic with rotations locked; the controller turns it by
/// setting its heading directly.
pub fn spawn_player(world: &mut World, position: Vec3, yaw: f32, settings: ControllerSettings) -> Entity {
    let capsule = CapsuleShape::from_height(PLAYER_RADIUS, PLAYER_HEIGHT);
    let rotation = math::yaw_rotation(yaw);
    let entity = world
        .spawn((
            CharacterController::new(settings),
            capsule,
            Transform3D::new(position, rotation),
        ))
        .id();

    let body = RigidBodyBuilder::dynamic()
        .position(Isometry3::from_parts(Translation3::from(position), rotation))
        .lock_rotations()
        .ccd_enabled(true)
        .can_sleep(false)
        .build();
    let collider = ColliderBuilder::capsule_y(capsule.half_height, capsule.radius).build();
    let handles = world
        .resource_mut::<PhysicsWorld>()
        .spawn_body(entity, body, collider);
    world.entity_mut(entity).insert(handles);
    entity
}

/// Spawn a camera rig on `target` and hand it to the target's controller.
pub fn spawn_camera(world: &mut World, target: Entity, yaw: f32, settings: CameraSettings) -> Entity {
    let camera = FirstPersonCamera::new(settings).with_target(target).with_yaw(yaw);
    let start = world
        .get::<Transform3D>(target)
        .map(|t| t.translation)
        .unwrap_or_else(Vec3::zeros)
        + math::up() * camera.eye_height(false);
    let rotation = camera.rotation();
    let entity = world.spawn((camera, Transform3D::new(start, rotation))).id();

    if let Some(mut controller) = world.get_mut::<CharacterController>(target) {
        controller.camera = Some(entity);
    }
    entity
}

pub fn spawn_speed_bar(world: &mut World, source: Entity, screen_height: i32) -> Entity {
    world
        .spawn((
            ProgressBar::new(0.0, 20, screen_height - 36, 220, 14)
                .with_colors(Color::new(255, 200, 60, 230), Color::new(20, 20, 20, 160))
                .with_label("speed"),
            SpeedBar { source },
        ))
        .id()
}

/// Build the whole scene from `level`.
pub fn setup_scene(world: &mut World, level: &Level, config: &GameConfig) -> SceneHandles {
    for block in &level.blocks {
        spawn_block(world, block);
    }
    let props = level
        .props
        .as_ref()
        .map(|spec| spawn_props(world, spec).len())
        .unwrap_or(0);

    let player = spawn_player(world, level.spawn_point(), level.spawn_yaw, config.controller);
    let camera = spawn_camera(world, player, level.spawn_yaw, config.camera);
    let speed_bar = spawn_speed_bar(world, player, config.window_height as i32);

    info!(
        "Scene '{}' ready: {} blocks, {} props, player {:?}",
        level.name,
        level.blocks.len(),
        props,
        player
    );
    SceneHandles {
        player,
        camera,
        speed_bar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_physics() -> World {
        let mut world = World::new();
        world.insert_resource(PhysicsWorld::default());
        world
    }

    #[test]
    fn test_block_tilt_rotates_collider() {
        let mut world = world_with_physics();
        let spec = BlockSpec {
            center: [0.0, 0.0, 0.0],
            size: [4.0, 0.4, 4.0],
            tilt_x: 20.0,
            tilt_z: 0.0,
            color: [255, 255, 255, 255],
        };
        let entity = spawn_block(&mut world, &spec);
        let handles = *world.get::<PhysicsBody>(entity).unwrap();
        let physics = world.resource::<PhysicsWorld>();
        let (_, rotation) = physics.pose(handles.body).unwrap();
        let up = rotation * math::up();
        assert!((up.y - 20f32.to_radians().cos()).abs() < 1e-4);
        assert_eq!(physics.owner_of(handles.collider), Some(entity));
    }

    #[test]
    fn test_props_are_seeded() {
        let spec = PropSpec {
            count: 5,
            seed: 99,
            area: [5.0, 5.0],
            drop_height: 3.0,
            min_size: 0.5,
            max_size: 1.0,
        };
        let positions = |world: &mut World| -> Vec<Vec3> {
            let entities = spawn_props(world, &spec);
            entities
                .iter()
                .map(|e| world.get::<Transform3D>(*e).unwrap().translation)
                .collect()
        };
        let a = positions(&mut world_with_physics());
        let b = positions(&mut world_with_physics());
        assert_eq!(a.len(), 5);
        assert_eq!(a, b);
        assert!(a.iter().all(|p| p.x.abs() <= 5.0 && p.z.abs() <= 5.0));
    }

    #[test]
    fn test_setup_links_camera_and_speed_bar() {
        let mut world = world_with_physics();
        let handles = setup_scene(&mut world, &Level::builtin(), &GameConfig::new());

        let controller = world.get::<CharacterController>(handles.player).unwrap();
        assert_eq!(controller.camera, Some(handles.camera));
        let camera = world.get::<FirstPersonCamera>(handles.camera).unwrap();
        assert_eq!(camera.target, Some(handles.player));
        let bar = world.get::<SpeedBar>(handles.speed_bar).unwrap();
        assert_eq!(bar.source, handles.player);
        let widget = world.get::<ProgressBar>(handles.speed_bar).unwrap();
        assert_eq!(widget.fill_color, Color::new(255, 200, 60, 230));
        assert_eq!(widget.label.as_deref(), Some("speed"));
        assert!(world.get::<PhysicsBody>(handles.player).is_some());
    }
}
