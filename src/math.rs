//! Small vector helpers shared by the camera and locomotion systems.
//!
//! All math runs on the nalgebra types re-exported by rapier so values can be
//! handed to the physics world without conversion. The world is right-handed
//! with +Y up and -Z forward (the raylib convention).

use rapier3d::na::{UnitQuaternion, Vector2, Vector3};

pub type Vec2 = Vector2<f32>;
pub type Vec3 = Vector3<f32>;
pub type Quat = UnitQuaternion<f32>;

const EPSILON: f32 = 1e-6;

/// World up axis.
pub fn up() -> Vec3 {
    Vec3::y()
}

/// Forward axis of `rotation` (local -Z).
pub fn forward(rotation: &Quat) -> Vec3 {
    rotation * -Vec3::z()
}

/// Right axis of `rotation` (local +X).
pub fn right(rotation: &Quat) -> Vec3 {
    rotation * Vec3::x()
}

/// Remove the component of `v` along `normal`.
///
/// A degenerate normal leaves `v` untouched.
pub fn project_on_plane(v: &Vec3, normal: &Vec3) -> Vec3 {
    let sqr = normal.norm_squared();
    if sqr < EPSILON {
        return *v;
    }
    v - normal * (v.dot(normal) / sqr)
}

pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    v.try_normalize(EPSILON).unwrap_or_else(Vec3::zeros)
}

/// Magnitude of the horizontal (XZ) part of `v`.
pub fn horizontal_length(v: &Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Rotation about world up by `degrees`.
///
/// Positive angles turn left (counter-clockwise seen from above).
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::y_axis(), degrees.to_radians())
}

/// Look rotation built from pitch then yaw, roll is always zero.
///
/// Positive pitch looks up.
pub fn look_rotation(pitch_degrees: f32, yaw_degrees: f32) -> Quat {
    yaw_rotation(yaw_degrees) * Quat::from_axis_angle(&Vec3::x_axis(), pitch_degrees.to_radians())
}

/// Heading of `rotation` about world up, in degrees within `(-180, 180]`.
///
/// Read from the right axis, which pitch does not move, so a camera looking
/// straight up or down still has a well defined heading.
pub fn yaw_degrees(rotation: &Quat) -> f32 {
    let r = right(rotation);
    (-r.z).atan2(r.x).to_degrees()
}

/// Critically damped spring toward `target`.
///
/// Same integration as the common game-engine `SmoothDamp`: `velocity` is the
/// caller-owned rate of change and is updated in place. Never overshoots.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// Convert to the raylib vector type used by drawing calls.
pub fn to_raylib(v: &Vec3) -> raylib::prelude::Vector3 {
    raylib::prelude::Vector3::new(v.x, v.y, v.z)
}
