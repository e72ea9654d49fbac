//! First-person character controller component.
//!
//! [`CharacterController`] holds the tuning knobs ([`ControllerSettings`]) and
//! the transient per-step state the probe and locomotion systems share:
//! grounded flags, the ground contact normal, wall contacts, the smoothed
//! speed and the acceleration applied on the last fixed step.
//!
//! The component never touches the physics world itself. Systems in
//! [`crate::systems::groundcheck`], [`crate::systems::wallcheck`] and
//! [`crate::systems::locomotion`] read and write it around each physics step.

use bevy_ecs::prelude::{Component, Entity};
use rapier3d::prelude::ColliderHandle;
use smallvec::SmallVec;

use crate::components::capsule::CapsuleShape;
use crate::math::{self, Vec3, Vec2};

/// Tuning values for a character controller.
///
/// Defaults match `config.ini` when a key is missing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerSettings {
    /// Apex height of a standing vertical jump, in meters.
    pub jump_height: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub crouch_speed: f32,
    /// Speed multiplier while moving against the body's facing.
    pub backward_speed_factor: f32,
    /// Time constant of the speed smoothing, in seconds.
    pub speed_smooth_time: f32,
    /// Fraction of the move acceleration applied while airborne (0..1).
    pub air_control: f32,
    /// Fraction of the radius the ground probe sphere is shrunk by (0..1).
    pub shell_offset: f32,
    /// Extra distance below the capsule that still counts as ground.
    pub ground_check_distance: f32,
    /// Extra radius around the capsule scanned for walls.
    pub wall_check_radius: f32,
    /// Dot-product threshold for front/back walls; sides use `1 - sector` (0..1).
    pub wall_sector: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            jump_height: 2.0,
            walk_speed: 5.0,
            run_speed: 8.0,
            crouch_speed: 2.5,
            backward_speed_factor: 1.0,
            speed_smooth_time: 0.2,
            air_control: 1.0,
            shell_offset: 0.1,
            ground_check_distance: 0.01,
            wall_check_radius: 0.1,
            wall_sector: 0.5,
        }
    }
}

impl ControllerSettings {
    /// Clamp values that only make sense in a bounded range.
    pub fn sanitized(mut self) -> Self {
        self.shell_offset = self.shell_offset.clamp(0.0, 1.0);
        self.wall_sector = self.wall_sector.clamp(0.0, 1.0);
        self.air_control = self.air_control.clamp(0.0, 1.0);
        self.backward_speed_factor = self.backward_speed_factor.max(0.0);
        self.speed_smooth_time = self.speed_smooth_time.max(0.0);
        self.ground_check_distance = self.ground_check_distance.max(0.0);
        self.wall_check_radius = self.wall_check_radius.max(0.0);
        self.jump_height = self.jump_height.max(0.0);
        self
    }
}

/// A collider found by the wall probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    pub collider: ColliderHandle,
    /// Horizontal unit vector from the wall toward the character.
    pub normal: Vec3,
}

/// Walls around the character, classified relative to its facing.
///
/// A side holds the last collider classified into it on this step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WallContacts {
    pub front: Option<ColliderHandle>,
    pub back: Option<ColliderHandle>,
    pub left: Option<ColliderHandle>,
    pub right: Option<ColliderHandle>,
    pub all: SmallVec<[WallHit; 4]>,
}

impl WallContacts {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Sort one wall into the front/back/left/right slots.
    ///
    /// `to_wall` is the horizontal unit direction from the character to the
    /// wall, `forward` and `right` the character's horizontal axes.
    pub fn classify(
        &mut self,
        collider: ColliderHandle,
        to_wall: &Vec3,
        forward: &Vec3,
        right: &Vec3,
        sector: f32,
    ) {
        let dot_z = forward.dot(to_wall);
        let dot_x = right.dot(to_wall);

        if dot_z > sector {
            self.front = Some(collider);
        }
        if dot_z < -sector {
            self.back = Some(collider);
        }
        if dot_x > 1.0 - sector {
            self.right = Some(collider);
        }
        if dot_x < -(1.0 - sector) {
            self.left = Some(collider);
        }
        self.all.push(WallHit {
            collider,
            normal: -to_wall,
        });
    }
}

/// Result of feeding a new ground probe into the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroundTransition {
    Unchanged,
    Landed,
    Left,
}

/// Sphere-cast parameters derived from the capsule and settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundProbe {
    pub origin: Vec3,
    pub radius: f32,
    pub max_distance: f32,
}

/// Physics-driven first-person character controller.
///
/// # Example
/// ```ignore
/// let controller = CharacterController::new(ControllerSettings::default())
///     .with_camera(camera_entity);
/// commands.entity(player).insert(controller);
/// ```
#[derive(Component, Clone, Debug)]
pub struct CharacterController {
    pub settings: ControllerSettings,
    /// Camera whose heading drives the body rotation and move direction.
    pub camera: Option<Entity>,

    pub grounded: bool,
    pub grounded_previously: bool,
    /// Surface normal under the character, world up while airborne.
    pub ground_normal: Vec3,
    pub walls: WallContacts,

    pub jump_request: bool,
    pub run_held: bool,
    pub crouch_held: bool,

    /// Input rotated by the camera and flattened onto the horizontal plane.
    pub camera_direction: Vec3,
    /// Camera direction projected onto the ground (and walls when airborne).
    pub move_direction: Vec3,
    pub current_speed: f32,
    pub target_speed: f32,
    pub acceleration: f32,
    pub speed_smooth_velocity: f32,
}

impl CharacterController {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            settings: settings.sanitized(),
            camera: None,
            grounded: false,
            grounded_previously: false,
            ground_normal: math::up(),
            walls: WallContacts::default(),
            jump_request: false,
            run_held: false,
            crouch_held: false,
            camera_direction: Vec3::zeros(),
            move_direction: Vec3::zeros(),
            current_speed: 0.0,
            target_speed: 0.0,
            acceleration: 0.0,
            speed_smooth_velocity: 0.0,
        }
    }

    pub fn with_camera(mut self, camera: Entity) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Drop every held input, as if all keys were released.
    pub fn clear_input(&mut self) {
        self.jump_request = false;
        self.run_held = false;
        self.crouch_held = false;
    }

    /// Ground probe for a capsule whose collider is centered at `center`.
    ///
    /// The sphere sits at the bottom hemisphere, shrunk by the shell offset,
    /// and travels the shrunk amount plus the ground check distance.
    pub fn ground_probe(&self, capsule: &CapsuleShape, center: &Vec3) -> GroundProbe {
        let shell = capsule.radius * self.settings.shell_offset;
        GroundProbe {
            origin: capsule.bottom_sphere_center(center),
            radius: capsule.radius - shell,
            max_distance: shell + self.settings.ground_check_distance,
        }
    }

    /// Radius of the wall probe sphere.
    pub fn wall_probe_radius(&self, capsule: &CapsuleShape) -> f32 {
        capsule.radius + self.settings.wall_check_radius
    }

    /// Record this step's ground probe; `None` means nothing was hit.
    pub fn set_ground(&mut self, hit_normal: Option<Vec3>) -> GroundTransition {
        self.grounded_previously = self.grounded;
        self.grounded = hit_normal.is_some();
        self.ground_normal = hit_normal
            .and_then(|n| n.try_normalize(1e-6))
            .filter(|n| n.iter().all(|c| c.is_finite()))
            .unwrap_or_else(math::up);

        match (self.grounded_previously, self.grounded) {
            (false, true) => GroundTransition::Landed,
            (true, false) => GroundTransition::Left,
            _ => GroundTransition::Unchanged,
        }
    }

    /// Launch speed that reaches `jump_height` under `gravity_y` (negative down).
    pub fn jump_speed(&self, gravity_y: f32) -> f32 {
        (-2.0 * gravity_y * self.settings.jump_height).max(0.0).sqrt()
    }

    /// Speed for the current stance, crouch winning over run.
    pub fn stance_speed(&self) -> f32 {
        if self.crouch_held {
            self.settings.crouch_speed
        } else if self.run_held {
            self.settings.run_speed
        } else {
            self.settings.walk_speed
        }
    }

    /// Desired horizontal speed for moving along `direction` while facing `facing`.
    pub fn target_speed_for(&self, direction: &Vec3, facing: &Vec3) -> f32 {
        if direction.norm_squared() < 1e-8 {
            return 0.0;
        }
        let speed = self.stance_speed();
        if direction.dot(facing) < -0.01 {
            speed * self.settings.backward_speed_factor
        } else {
            speed
        }
    }

    /// Velocity-based acceleration toward the smoothed target speed.
    ///
    /// Never negative: when the body already moves faster than the smoothed
    /// target, no force is applied and friction slows it down.
    pub fn update_acceleration(&mut self, horizontal_speed: f32, target_speed: f32, dt: f32) -> f32 {
        self.current_speed = horizontal_speed;
        self.target_speed = math::smooth_damp(
            horizontal_speed,
            target_speed,
            &mut self.speed_smooth_velocity,
            self.settings.speed_smooth_time,
            dt,
        );

        self.acceleration = if dt <= 0.0 || self.current_speed > self.target_speed {
            0.0
        } else {
            (self.target_speed - self.current_speed) / dt
        };
        if !self.grounded {
            self.acceleration *= self.settings.air_control;
        }
        self.acceleration
    }
}

/// Camera direction for a move input, rotated by `view` and flattened.
///
/// The input's y axis is forward (local -Z). Zero input yields zero.
pub fn camera_direction(input: &Vec2, view: &math::Quat) -> Vec3 {
    let local = Vec3::new(input.x, 0.0, -input.y);
    let world = view * local;
    math::normalize_or_zero(&math::project_on_plane(&world, &math::up()))
}
