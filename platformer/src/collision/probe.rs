use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

use super::{
    layers::LayerMask,
    settings::DIST_EPS,
    types::{Iso2, Point2, ProbeHit, Vec2},
};

/// Line-segment query against the solid world.
pub trait GeometryProbe {
    /// Return the hit of the segment `a`–`b` closest to validity, considering only colliders
    /// whose layer is in `mask`.
    ///
    /// See [`double_line_cast`] for the selection rules.
    fn probe(&self, a: Point2, b: Point2, mask: LayerMask) -> Option<ProbeHit>;
}

/// Pose lookup for colliders referenced by handle.
///
/// Handles are non-owning: the lookup returns `None` once the collider was removed.
pub trait SurfaceLookup {
    fn surface_pose(&self, collider: ColliderHandle) -> Option<Iso2>;
}

/// A single ray hit as reported by the backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayCastHit {
    /// Fraction of the cast direction where the hit occurred; `0.0` means the origin is inside.
    pub time_of_impact: f32,
    pub normal: Vec2,
    pub collider: ColliderHandle,
    pub body: Option<RigidBodyHandle>,
    pub surface_velocity: Option<Vec2>,
}

/// Cast the segment `a`–`b` as two coincident rays, `a → b` then `b → a`.
///
/// `cast(origin, dir)` must return the nearest hit along `origin + t * dir` for `t ∈ [0, 1]`.
///
/// Selection:
/// - the forward hit if it did not start inside geometry,
/// - else the backward hit if it did not start inside geometry,
/// - else an `embedded` hit if either ray started inside geometry,
/// - else `None`.
pub fn double_line_cast(
    a: Point2,
    b: Point2,
    cast: impl Fn(Point2, Vec2) -> Option<RayCastHit>,
) -> Option<ProbeHit> {
    let ab = b - a;
    if ab.norm_squared() <= DIST_EPS * DIST_EPS {
        return None;
    }

    let forward = cast(a, ab);
    if let Some(hit) = forward.filter(|h| h.time_of_impact > 0.0) {
        return Some(to_probe_hit(a, ab, hit));
    }

    let backward = cast(b, -ab);
    if let Some(hit) = backward.filter(|h| h.time_of_impact > 0.0) {
        return Some(to_probe_hit(b, -ab, hit));
    }

    forward
        .map(|h| (a, h))
        .or(backward.map(|h| (b, h)))
        .map(|(origin, h)| ProbeHit {
            point: origin,
            normal: Vec2::zeros(),
            embedded: true,
            collider: h.collider,
            body: h.body,
            surface_velocity: h.surface_velocity,
        })
}

#[inline]
fn to_probe_hit(origin: Point2, dir: Vec2, hit: RayCastHit) -> ProbeHit {
    ProbeHit {
        point: origin + dir * hit.time_of_impact,
        normal: hit.normal,
        embedded: false,
        collider: hit.collider,
        body: hit.body,
        surface_velocity: hit.surface_velocity,
    }
}
