//! Rigid-body physics host.
//!
//! [`PhysicsWorld`] owns the rapier pipeline, the body and collider sets and
//! the query pipeline the ground and wall probes run against. It also keeps a
//! reverse map from collider to owning entity so probe hits can be reported
//! in ECS terms.
//!
//! Forces follow a velocity-level model: an acceleration is turned into a
//! velocity change of `a * dt` for the coming step, so a controller that
//! writes accelerations before [`PhysicsWorld::step`] sees them integrated on
//! that same step.

use bevy_ecs::prelude::{Entity, Resource};
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::components::physicsbody::PhysicsBody;
use crate::math::{self, Quat, Vec3};

/// Result of a sphere cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastHit {
    pub collider: ColliderHandle,
    /// Entity that registered the collider, if any.
    pub entity: Option<Entity>,
    /// Distance traveled by the sphere before touching.
    pub distance: f32,
    /// Contact point on the hit collider.
    pub point: Vec3,
    /// Surface normal at the contact, pointing toward the caster.
    pub normal: Vec3,
}

#[derive(Resource)]
pub struct PhysicsWorld {
    pub gravity: Vector<Real>,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,

    owners: FxHashMap<ColliderHandle, Entity>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, -9.81, 0.0), 1.0 / 50.0)
    }
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3, dt: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt,
            ..IntegrationParameters::default()
        };
        Self {
            gravity,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            owners: FxHashMap::default(),
        }
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    pub fn set_timestep(&mut self, dt: f32) {
        if dt > 0.0 {
            self.integration_parameters.dt = dt;
        }
    }

    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Advance the simulation by one fixed step.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Rebuild the query acceleration structure after bodies moved or spawned
    /// outside of [`PhysicsWorld::step`].
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Insert a body with one collider and register `entity` as its owner.
    pub fn spawn_body(&mut self, entity: Entity, body: RigidBody, collider: Collider) -> PhysicsBody {
        let body = self.rigid_body_set.insert(body);
        let collider =
            self.collider_set
                .insert_with_parent(collider, body, &mut self.rigid_body_set);
        self.owners.insert(collider, entity);
        self.refresh_queries();
        PhysicsBody { body, collider }
    }

    /// Remove a body, its colliders and their owner entries.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        let Some(body) = self.rigid_body_set.get(handle) else {
            return false;
        };
        for collider in body.colliders() {
            self.owners.remove(collider);
        }
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        self.refresh_queries();
        true
    }

    pub fn owner_of(&self, collider: ColliderHandle) -> Option<Entity> {
        self.owners.get(&collider).copied()
    }

    pub fn linear_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(handle).map(|b| *b.linvel())
    }

    /// Apply `acceleration` over the current timestep, ignoring mass.
    pub fn add_acceleration(&mut self, handle: RigidBodyHandle, acceleration: Vec3) {
        let dt = self.integration_parameters.dt;
        self.add_velocity_change(handle, acceleration * dt);
    }

    /// Instant velocity change, ignoring mass.
    pub fn add_velocity_change(&mut self, handle: RigidBodyHandle, delta: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            if body.is_dynamic() {
                let v = *body.linvel() + delta;
                body.set_linvel(v, true);
            }
        }
    }

    /// Replace the body rotation with a heading about world up.
    pub fn set_yaw_rotation(&mut self, handle: RigidBodyHandle, yaw: Quat) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_rotation(yaw, true);
            body.set_angvel(Vec3::zeros(), true);
        }
    }

    pub fn pose(&self, handle: RigidBodyHandle) -> Option<(Vec3, Quat)> {
        self.rigid_body_set
            .get(handle)
            .map(|b| (*b.translation(), *b.rotation()))
    }

    /// Sweep a sphere from `origin` along `direction` up to `max_distance`.
    ///
    /// Colliders attached to `exclude` and sensors are ignored. A sphere that
    /// starts touching something reports a hit at distance zero.
    pub fn sphere_cast(
        &self,
        origin: &Vec3,
        radius: f32,
        direction: &Vec3,
        max_distance: f32,
        exclude: Option<RigidBodyHandle>,
    ) -> Option<CastHit> {
        let dir = direction.try_normalize(1e-6)?;
        if radius <= 0.0 || max_distance < 0.0 {
            return None;
        }
        let ball = Ball::new(radius);
        let start = Isometry::translation(origin.x, origin.y, origin.z);
        let options = ShapeCastOptions {
            max_time_of_impact: max_distance,
            stop_at_penetration: true,
            ..ShapeCastOptions::default()
        };

        let (collider, hit) = self.query_pipeline.cast_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &start,
            &dir,
            &ball,
            options,
            self.filter(exclude),
        )?;

        let distance = hit.time_of_impact;
        let center = origin + dir * distance;
        let (point, normal) = self.contact_at(collider, &center, hit.normal1.into_inner());

        Some(CastHit {
            collider,
            entity: self.owner_of(collider),
            distance,
            point,
            normal,
        })
    }

    /// Collect colliders overlapping a sphere, excluding `exclude` and sensors.
    pub fn overlap_sphere(
        &self,
        center: &Vec3,
        radius: f32,
        exclude: Option<RigidBodyHandle>,
    ) -> SmallVec<[ColliderHandle; 4]> {
        let mut out = SmallVec::new();
        if radius <= 0.0 {
            return out;
        }
        let ball = Ball::new(radius);
        let pos = Isometry::translation(center.x, center.y, center.z);
        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &pos,
            &ball,
            self.filter(exclude),
            |handle| {
                out.push(handle);
                true
            },
        );
        out
    }

    /// Closest point on `collider` to `point`, `point` itself when inside.
    pub fn closest_point(&self, collider: ColliderHandle, point: &Vec3) -> Option<Vec3> {
        let co = self.collider_set.get(collider)?;
        let proj = co
            .shape()
            .project_point(co.position(), &Point::from(*point), true);
        Some(proj.point.coords)
    }

    fn filter(&self, exclude: Option<RigidBodyHandle>) -> QueryFilter<'static> {
        let filter = QueryFilter::default().exclude_sensors();
        match exclude {
            Some(handle) => filter.exclude_rigid_body(handle),
            None => filter,
        }
    }

    /// Contact point and normal for a sphere centered at `center` touching
    /// `collider`. Falls back to `cast_normal`, then world up, when the center
    /// sits on or inside the surface.
    fn contact_at(&self, collider: ColliderHandle, center: &Vec3, cast_normal: Vec3) -> (Vec3, Vec3) {
        let Some(co) = self.collider_set.get(collider) else {
            return (*center, math::up());
        };
        let proj = co
            .shape()
            .project_point(co.position(), &Point::from(*center), false);
        let point = proj.point.coords;

        let from_projection = (!proj.is_inside)
            .then(|| (center - point).try_normalize(1e-5))
            .flatten();
        let normal = from_projection
            .or_else(|| cast_normal.try_normalize(1e-5))
            .filter(|n| n.iter().all(|c| c.is_finite()))
            .unwrap_or_else(math::up);
        (point, normal)
    }
}
