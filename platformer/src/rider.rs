//! Concrete [`Rider`] that carries the character along a solid's surface.
//!
//! The anchor point and normal are stored in the collider's local frame, so translating or
//! rotating the solid moves the character with it. Running along the surface moves the anchor
//! along the surface tangent.

use log::trace;
use rapier2d::prelude::ColliderHandle;

use crate::{
    attachment::{RideUpdate, Rider},
    collision::{
        AttachContact, COLLISION_LAYER_MASK, Footprint, GeometryProbe, Point2, SurfaceLookup,
        Vec2, is_wall,
        settings::{
            HORIZONTAL_PROBE_ROWS, RIDE_PROBE_DEPTH, RIDE_PROBE_LIFT, VERTICAL_PROBE_OFFSETS,
        },
    },
};

#[derive(Clone, Copy, Debug, PartialEq)]
struct RideLink {
    collider: ColliderHandle,
    local_anchor: Point2,
    local_normal: Vec2,
}

#[derive(Clone, Debug)]
pub struct SurfaceRider {
    footprint: Footprint,
    link: Option<RideLink>,
    position: Point2,
    velocity: Vec2,
}

impl SurfaceRider {
    pub fn new(footprint: Footprint) -> Self {
        Self {
            footprint,
            link: None,
            position: Point2::origin(),
            velocity: Vec2::zeros(),
        }
    }

    fn not_standing(&mut self) -> RideUpdate {
        self.velocity = Vec2::zeros();
        RideUpdate {
            solid_wall_collision: false,
            still_standing: false,
        }
    }
}

impl Rider for SurfaceRider {
    fn attach<W: SurfaceLookup>(&mut self, world: &W, contact: AttachContact) {
        self.position = contact.point;
        self.velocity = contact.velocity;
        self.link = world.surface_pose(contact.collider).map(|pose| RideLink {
            collider: contact.collider,
            local_anchor: pose.inverse_transform_point(&contact.point),
            local_normal: pose.inverse_transform_vector(&contact.normal),
        });
    }

    fn detach(&mut self) {
        self.link = None;
    }

    fn update_position<W: GeometryProbe + SurfaceLookup>(
        &mut self,
        world: &W,
        vx: f32,
        is_ground: fn(Vec2) -> bool,
    ) -> RideUpdate {
        let Some(link) = self.link else {
            return self.not_standing();
        };
        let Some(pose) = world.surface_pose(link.collider) else {
            trace!("anchor collider {:?} vanished", link.collider);
            return self.not_standing();
        };

        let fp = self.footprint;
        let normal = pose * link.local_normal;
        let carried = pose * link.local_anchor;
        let tangent = Vec2::new(normal.y, -normal.x);
        let mut target = carried + tangent * vx;

        // Wall rows match the free-movement wall pass at rest.
        let solid_wall_collision = vx != 0.0 && {
            let (low, high) = (fp.inset_y, fp.height - fp.inset_y);
            let half = Vec2::new(fp.half_width, 0.0);
            HORIZONTAL_PROBE_ROWS.iter().any(|&row| {
                let at = target + Vec2::new(0.0, low + row * (high - low));
                world
                    .probe(at - half, at + half, COLLISION_LAYER_MASK)
                    .is_some_and(|h| !h.embedded && is_wall(h.normal) && h.normal.x * vx < 0.0)
            })
        };
        if solid_wall_collision {
            target = carried;
        }

        // Footing: the anchor surface must still face up and still be under one of the feet probes.
        let edge = fp.half_width - fp.inset_x;
        let footing = if is_ground(normal) {
            VERTICAL_PROBE_OFFSETS.iter().find_map(|&scale| {
                let offset = tangent * (scale * edge);
                let base = target + offset;
                world
                    .probe(
                        base + normal * RIDE_PROBE_LIFT,
                        base - normal * RIDE_PROBE_DEPTH,
                        COLLISION_LAYER_MASK,
                    )
                    .filter(|h| !h.embedded && h.collider == link.collider && is_ground(h.normal))
                    .map(|h| (h.point - offset, h.normal))
            })
        } else {
            None
        };

        let Some((anchor, ground_normal)) = footing else {
            return RideUpdate {
                solid_wall_collision,
                ..self.not_standing()
            };
        };

        self.link = Some(RideLink {
            collider: link.collider,
            local_anchor: pose.inverse_transform_point(&anchor),
            local_normal: pose.inverse_transform_vector(&ground_normal),
        });
        self.velocity = anchor - self.position;
        self.position = anchor;

        RideUpdate {
            solid_wall_collision,
            still_standing: true,
        }
    }

    fn current_position(&self) -> Point2 {
        self.position
    }

    fn estimated_velocity(&self) -> Vec2 {
        self.velocity
    }

    fn is_active(&self) -> bool {
        self.link.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collision::is_ground, testing::BoxWorld};

    fn close(a: Point2, b: Point2) -> bool {
        (a - b).norm() < 1.0e-5
    }

    fn contact(collider: ColliderHandle, point: Point2) -> AttachContact {
        AttachContact {
            collider,
            body: None,
            point,
            normal: Vec2::y(),
            velocity: Vec2::zeros(),
        }
    }

    fn attached(world: &BoxWorld, collider: ColliderHandle, point: Point2) -> SurfaceRider {
        let mut rider = SurfaceRider::new(Footprint::default());
        rider.attach(world, contact(collider, point));
        assert!(rider.is_active());
        rider
    }

    #[test]
    fn stationary_surface_keeps_the_character_in_place() {
        let mut world = BoxWorld::default();
        let floor = world.add_static(Point2::new(-5.0, -1.0), Point2::new(5.0, 0.0));
        let mut rider = attached(&world, floor, Point2::new(1.0, 0.0));

        for _ in 0..5 {
            let update = rider.update_position(&world, 0.0, is_ground);
            assert!(update.still_standing);
            assert!(!update.solid_wall_collision);
        }
        assert!(close(rider.current_position(), Point2::new(1.0, 0.0)));
        assert_eq!(rider.estimated_velocity(), Vec2::zeros());
    }

    #[test]
    fn moving_surface_carries_the_character() {
        let mut world = BoxWorld::default();
        let platform = world.add_moving(
            Point2::new(-2.0, -1.0),
            Point2::new(2.0, 0.0),
            Vec2::new(5.0, 2.5),
        );
        let mut rider = attached(&world, platform, Point2::new(0.0, 0.0));

        world.translate(platform, Vec2::new(0.1, 0.05));
        let update = rider.update_position(&world, 0.0, is_ground);
        assert!(update.still_standing);
        assert!(close(rider.current_position(), Point2::new(0.1, 0.05)));
        assert!((rider.estimated_velocity() - Vec2::new(0.1, 0.05)).norm() < 1.0e-5);
    }

    #[test]
    fn running_moves_along_the_surface() {
        let mut world = BoxWorld::default();
        let floor = world.add_static(Point2::new(-5.0, -1.0), Point2::new(5.0, 0.0));
        let mut rider = attached(&world, floor, Point2::new(0.0, 0.0));

        let update = rider.update_position(&world, 0.2, is_ground);
        assert!(update.still_standing);
        assert!(close(rider.current_position(), Point2::new(0.2, 0.0)));
        assert!((rider.estimated_velocity().x - 0.2).abs() < 1.0e-5);
    }

    #[test]
    fn wall_blocks_the_move_and_is_reported() {
        let mut world = BoxWorld::default();
        let floor = world.add_static(Point2::new(-5.0, -1.0), Point2::new(5.0, 0.0));
        world.add_static(Point2::new(1.0, 0.0), Point2::new(2.0, 5.0));
        let mut rider = attached(&world, floor, Point2::new(0.5, 0.0));

        let update = rider.update_position(&world, 0.2, is_ground);
        assert!(update.solid_wall_collision);
        assert!(update.still_standing);
        assert!(close(rider.current_position(), Point2::new(0.5, 0.0)));

        // Walking away from the wall is not blocked.
        let update = rider.update_position(&world, -0.2, is_ground);
        assert!(!update.solid_wall_collision);
        assert!(close(rider.current_position(), Point2::new(0.3, 0.0)));
    }

    #[test]
    fn low_step_blocks_like_a_wall() {
        let mut world = BoxWorld::default();
        let floor = world.add_static(Point2::new(-5.0, -1.0), Point2::new(5.0, 0.0));
        // Lower than half the body height: only the bottom row reaches it.
        world.add_static(Point2::new(1.0, 0.0), Point2::new(2.0, 0.3));
        let mut rider = attached(&world, floor, Point2::new(0.5, 0.0));

        let update = rider.update_position(&world, 0.2, is_ground);
        assert!(update.solid_wall_collision);
        assert!(update.still_standing);
        assert!(close(rider.current_position(), Point2::new(0.5, 0.0)));
    }

    #[test]
    fn feet_probes_keep_footing_until_the_ledge_is_passed() {
        let mut world = BoxWorld::default();
        let ledge = world.add_static(Point2::new(-5.0, -1.0), Point2::new(0.0, 0.0));
        let mut rider = attached(&world, ledge, Point2::new(-0.5, 0.0));

        // Center is past the edge; the trailing foot probe at -0.25 still touches.
        let update = rider.update_position(&world, 0.6, is_ground);
        assert!(update.still_standing);
        assert!(close(rider.current_position(), Point2::new(0.1, 0.0)));

        let update = rider.update_position(&world, 0.4, is_ground);
        assert!(!update.still_standing);
    }

    #[test]
    fn stepping_onto_another_collider_loses_the_anchor() {
        let mut world = BoxWorld::default();
        let a = world.add_static(Point2::new(-5.0, -1.0), Point2::new(0.0, 0.0));
        world.add_static(Point2::new(0.0, -1.0), Point2::new(5.0, 0.0));
        let mut rider = attached(&world, a, Point2::new(-0.1, 0.0));

        let update = rider.update_position(&world, 1.0, is_ground);
        assert!(!update.still_standing);
    }

    #[test]
    fn vanished_anchor_is_not_standing() {
        let mut world = BoxWorld::default();
        let platform = world.add_static(Point2::new(-2.0, -1.0), Point2::new(2.0, 0.0));
        let mut rider = attached(&world, platform, Point2::new(0.0, 0.0));

        world.remove(platform);
        let update = rider.update_position(&world, 0.3, is_ground);
        assert!(!update.still_standing);
        assert!(!update.solid_wall_collision);

        rider.detach();
        assert!(!rider.is_active());
    }
}
