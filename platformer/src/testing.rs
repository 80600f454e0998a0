//! Lightweight collaborators for unit tests.
//!
//! `BoxWorld` is an axis-aligned box scene with an exact slab ray cast, so resolver and controller
//! tests can assert exact positions without building a rapier world.

use std::cell::{Cell, RefCell};

use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

use crate::{
    attachment::{RideUpdate, Rider},
    collision::{
        AttachContact, GeometryProbe, Iso2, LayerMask, Point2, ProbeHit, RayCastHit,
        SurfaceLookup, Vec2, double_line_cast,
    },
};

#[derive(Clone, Copy, Debug)]
struct TestBox {
    min: Point2,
    max: Point2,
    velocity: Option<Vec2>,
}

#[derive(Default)]
pub struct BoxWorld {
    boxes: Vec<Option<TestBox>>,
}

impl BoxWorld {
    pub fn add_static(&mut self, min: Point2, max: Point2) -> ColliderHandle {
        self.push(TestBox {
            min,
            max,
            velocity: None,
        })
    }

    pub fn add_moving(&mut self, min: Point2, max: Point2, velocity: Vec2) -> ColliderHandle {
        self.push(TestBox {
            min,
            max,
            velocity: Some(velocity),
        })
    }

    pub fn translate(&mut self, handle: ColliderHandle, delta: Vec2) {
        if let Some(Some(b)) = self.boxes.get_mut(handle.into_raw_parts().0 as usize) {
            b.min += delta;
            b.max += delta;
        }
    }

    pub fn remove(&mut self, handle: ColliderHandle) {
        if let Some(slot) = self.boxes.get_mut(handle.into_raw_parts().0 as usize) {
            *slot = None;
        }
    }

    fn push(&mut self, b: TestBox) -> ColliderHandle {
        self.boxes.push(Some(b));
        ColliderHandle::from_raw_parts(self.boxes.len() as u32 - 1, 0)
    }

    fn get(&self, handle: ColliderHandle) -> Option<&TestBox> {
        self.boxes
            .get(handle.into_raw_parts().0 as usize)
            .and_then(Option::as_ref)
    }

    fn cast(&self, origin: Point2, dir: Vec2) -> Option<RayCastHit> {
        self.boxes
            .iter()
            .enumerate()
            .filter_map(|(i, b)| {
                let b = b.as_ref()?;
                let (toi, normal) = ray_box(origin, dir, b)?;
                Some(RayCastHit {
                    time_of_impact: toi,
                    normal,
                    collider: ColliderHandle::from_raw_parts(i as u32, 0),
                    body: b
                        .velocity
                        .map(|_| RigidBodyHandle::from_raw_parts(i as u32, 0)),
                    surface_velocity: b.velocity,
                })
            })
            .min_by(|a, b| a.time_of_impact.total_cmp(&b.time_of_impact))
    }
}

/// Slab test over `t ∈ [0, 1]`; an origin inside (or on) the box hits at `t = 0`.
fn ray_box(origin: Point2, dir: Vec2, b: &TestBox) -> Option<(f32, Vec2)> {
    let inside = (0..2).all(|i| origin[i] >= b.min[i] && origin[i] <= b.max[i]);
    if inside {
        return Some((0.0, Vec2::zeros()));
    }

    let mut t_enter = 0.0f32;
    let mut t_exit = 1.0f32;
    let mut normal = Vec2::zeros();
    for i in 0..2 {
        if dir[i] == 0.0 {
            if origin[i] < b.min[i] || origin[i] > b.max[i] {
                return None;
            }
            continue;
        }
        let t1 = (b.min[i] - origin[i]) / dir[i];
        let t2 = (b.max[i] - origin[i]) / dir[i];
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if near > t_enter {
            t_enter = near;
            normal = Vec2::zeros();
            normal[i] = -dir[i].signum();
        }
        t_exit = t_exit.min(far);
    }

    (t_enter <= t_exit && normal != Vec2::zeros()).then_some((t_enter, normal))
}

impl GeometryProbe for BoxWorld {
    fn probe(&self, a: Point2, b: Point2, _mask: LayerMask) -> Option<ProbeHit> {
        double_line_cast(a, b, |origin, dir| self.cast(origin, dir))
    }
}

impl SurfaceLookup for BoxWorld {
    fn surface_pose(&self, collider: ColliderHandle) -> Option<Iso2> {
        let b = self.get(collider)?;
        let center = na_center(b);
        Some(Iso2::translation(center.x, center.y))
    }
}

fn na_center(b: &TestBox) -> Point2 {
    nalgebra::center(&b.min, &b.max)
}

/// Wraps a probe and counts `probe` calls.
pub struct CountingProbe<'a, P> {
    inner: &'a P,
    calls: Cell<usize>,
}

impl<'a, P: GeometryProbe> CountingProbe<'a, P> {
    pub fn new(inner: &'a P) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.calls.get()
    }
}

impl<P: GeometryProbe> GeometryProbe for CountingProbe<'_, P> {
    fn probe(&self, a: Point2, b: Point2, mask: LayerMask) -> Option<ProbeHit> {
        self.calls.set(self.calls.get() + 1);
        self.inner.probe(a, b, mask)
    }
}

/// Rider that replays queued update results and records every call.
#[derive(Default)]
pub struct ScriptedRider {
    pub contact: Option<AttachContact>,
    pub position: Point2,
    pub updates: RefCell<Vec<RideUpdate>>,
    pub vx_seen: Vec<f32>,
    pub detach_count: usize,
}

impl ScriptedRider {
    /// Queue results returned by subsequent updates (front first); an empty queue means
    /// "standing, no wall".
    pub fn queue(&self, update: RideUpdate) {
        self.updates.borrow_mut().push(update);
    }
}

impl Rider for ScriptedRider {
    fn attach<W: SurfaceLookup>(&mut self, _world: &W, contact: AttachContact) {
        self.position = contact.point;
        self.contact = Some(contact);
    }

    fn detach(&mut self) {
        self.contact = None;
        self.detach_count += 1;
    }

    fn update_position<W: GeometryProbe + SurfaceLookup>(
        &mut self,
        _world: &W,
        vx: f32,
        _is_ground: fn(Vec2) -> bool,
    ) -> RideUpdate {
        self.vx_seen.push(vx);
        let mut queue = self.updates.borrow_mut();
        let update = if queue.is_empty() {
            RideUpdate {
                solid_wall_collision: false,
                still_standing: true,
            }
        } else {
            queue.remove(0)
        };
        if update.still_standing && !update.solid_wall_collision {
            self.position.x += vx;
        }
        update
    }

    fn current_position(&self) -> Point2 {
        self.position
    }

    fn estimated_velocity(&self) -> Vec2 {
        Vec2::zeros()
    }

    fn is_active(&self) -> bool {
        self.contact.is_some()
    }
}
