//! Rapier-based query world for level geometry.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-focused: the world only answers line probes and pose lookups; there is no dynamics
//!   step. Moving solids are kinematic bodies whose poses [`QueryWorld::advance`] integrates.
//! - Non-owning handles: removing a solid invalidates its handles, and lookups return `None`.

// Re-export Rapier so downstream crates can use Rapier macros/types without depending on
// `rapier2d` directly.
pub use rapier2d;

use log::debug;
use rapier2d::{na::UnitComplex, prelude::*};

use crate::{
    collision::{
        GeometryProbe, Iso2, LayerMask, Point2, ProbeHit, RayCastHit, SurfaceLookup, Vec2,
        double_line_cast, layers::user_data_in_mask,
    },
    rapier::{SolidDef, body_from_def, collider_from_def},
};

/// In-memory rapier structures needed for scene queries against the level.
pub struct QueryWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    islands: IslandManager,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    collision_pipeline: CollisionPipeline,
}

impl Default for QueryWorld {
    fn default() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            islands: IslandManager::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            collision_pipeline: CollisionPipeline::new(),
        }
    }
}

impl QueryWorld {
    /// Build a query world from a list of solid definitions.
    ///
    /// The input is sorted by `id` before insertion; invalid definitions should be rejected by
    /// the caller (see [`SolidDef::validate`]).
    pub fn build(mut defs: Vec<SolidDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut world = Self::default();
        for def in &defs {
            world.insert(def);
        }
        world.refresh();
        world
    }

    /// Insert one solid as a body plus attached collider. Call [`Self::refresh`] before querying.
    pub fn insert(&mut self, def: &SolidDef) -> ColliderHandle {
        let rb_handle = self.bodies.insert(body_from_def(def));
        self.colliders
            .insert_with_parent(collider_from_def(def), rb_handle, &mut self.bodies)
    }

    /// Remove a solid and its body. Returns false if the handle was already stale.
    pub fn remove(&mut self, collider: ColliderHandle) -> bool {
        let Some(parent) = self.colliders.get(collider).map(|c| c.parent()) else {
            return false;
        };
        match parent {
            Some(body) => {
                self.bodies.remove(
                    body,
                    &mut self.islands,
                    &mut self.colliders,
                    &mut self.impulse_joints,
                    &mut self.multibody_joints,
                    true,
                );
            }
            None => {
                self.colliders
                    .remove(collider, &mut self.islands, &mut self.bodies, true);
            }
        }
        debug!("removed solid {collider:?}");
        self.refresh();
        true
    }

    /// Change the velocity of a moving solid (units/second, radians/second).
    pub fn set_solid_velocity(&mut self, collider: ColliderHandle, linvel: Vec2, angvel: f32) {
        let Some(body) = self.colliders.get(collider).and_then(|c| c.parent()) else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(body).filter(|rb| rb.is_kinematic()) {
            rb.set_linvel(linvel, true);
            rb.set_angvel(angvel, true);
        }
    }

    /// Move every kinematic solid by its velocity over `dt` seconds and refresh the queries.
    pub fn advance(&mut self, dt: f32) {
        for (_, rb) in self.bodies.iter_mut() {
            if !rb.is_kinematic() {
                continue;
            }
            let pos = *rb.position();
            let next = Iso2::from_parts(
                (pos.translation.vector + rb.linvel() * dt).into(),
                UnitComplex::new(rb.angvel() * dt) * pos.rotation,
            );
            rb.set_position(next, true);

            for &handle in rb.colliders() {
                if let Some(collider) = self.colliders.get_mut(handle) {
                    let local = collider
                        .position_wrt_parent()
                        .copied()
                        .unwrap_or_else(Iso2::identity);
                    collider.set_position(next * local);
                }
            }
        }
        self.refresh();
    }

    /// Bring the broad-phase BVH in line with the current collider poses.
    ///
    /// Uses the collision-only pipeline: no dynamics, default hooks and events.
    pub fn refresh(&mut self) {
        self.collision_pipeline.step(
            0.0,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &(),
            &(),
        );
    }

    /// Create a borrowed `QueryPipeline` view suitable for scene queries.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    /// Velocity of a non-fixed body at `point` (units/second).
    fn body_velocity_at(&self, body: RigidBodyHandle, point: Point2) -> Option<Vec2> {
        let rb = self.bodies.get(body).filter(|rb| !rb.is_fixed())?;
        let r = point.coords - rb.translation();
        Some(rb.linvel() + Vec2::new(-r.y, r.x) * rb.angvel())
    }
}

impl GeometryProbe for QueryWorld {
    fn probe(&self, a: Point2, b: Point2, mask: LayerMask) -> Option<ProbeHit> {
        let predicate = |_: ColliderHandle, c: &Collider| user_data_in_mask(c.user_data, mask);
        let query = self.query_pipeline(QueryFilter::default().predicate(&predicate));

        double_line_cast(a, b, |origin, dir| {
            let ray = Ray::new(origin, dir);
            let (collider, hit) = query.cast_ray_and_get_normal(&ray, 1.0, true)?;
            let body = self.colliders.get(collider).and_then(|c| c.parent());
            let point = ray.point_at(hit.time_of_impact);
            Some(RayCastHit {
                time_of_impact: hit.time_of_impact,
                normal: hit.normal,
                collider,
                body,
                surface_velocity: body.and_then(|rb| self.body_velocity_at(rb, point)),
            })
        })
    }
}

impl SurfaceLookup for QueryWorld {
    fn surface_pose(&self, collider: ColliderHandle) -> Option<Iso2> {
        self.colliders.get(collider).map(|c| *c.position())
    }
}
