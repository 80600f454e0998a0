use log::trace;
use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

use super::{
    layers::COLLISION_LAYER_MASK,
    probe::GeometryProbe,
    settings::{HORIZONTAL_PROBE_ROWS, VERTICAL_PROBE_OFFSETS},
    surface::{SurfaceKind, classify, is_wall},
    types::{Footprint, Point2, ProbeHit, Vec2},
};

/// Parameters for one free-movement resolution.
#[derive(Clone, Copy, Debug)]
pub struct ResolveRequest {
    /// Tentative position for this tick (`position + velocity`).
    pub position: Point2,
    /// Velocity after the motion models ran (units/tick).
    pub velocity: Vec2,
    pub footprint: Footprint,
    /// Whether a ground hit may start an attachment (re-attach cooldown elapsed).
    pub can_attach: bool,
    /// Length of one tick in seconds, used to convert body velocities to units/tick.
    pub tick_seconds: f32,
}

/// Ground contact eligible for attachment, found by the vertical pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landing {
    pub collider: ColliderHandle,
    pub body: Option<RigidBodyHandle>,
    pub normal: Vec2,
}

/// Corrected state after both passes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolveResult {
    pub position: Point2,
    pub velocity: Vec2,
    /// Set when the vertical pass landed on ground while attaching was allowed.
    pub landing: Option<Landing>,
}

/// Resolve a tentative free-movement position against solid geometry.
///
/// Algorithm:
/// - Vertical pass: probe the character's column top to bottom at the center, then at the right
///   and left inset edges; the first non-embedded hit is resolved (ground lands, roof blocks).
/// - Horizontal pass: probe three rows across the full width between heights that the vertical
///   motion of this tick cannot have swept past; wall hits push the character out.
pub fn resolve_free_motion(probe: &impl GeometryProbe, req: ResolveRequest) -> ResolveResult {
    let mut position = req.position;
    let mut velocity = req.velocity;

    let landing = vertical_pass(probe, &req, &mut position, &mut velocity);
    horizontal_pass(probe, &req.footprint, &mut position, &mut velocity);

    ResolveResult {
        position,
        velocity,
        landing,
    }
}

fn vertical_pass(
    probe: &impl GeometryProbe,
    req: &ResolveRequest,
    position: &mut Point2,
    velocity: &mut Vec2,
) -> Option<Landing> {
    let fp = &req.footprint;
    let edge = fp.half_width - fp.inset_x;

    let hit = VERTICAL_PROBE_OFFSETS.iter().find_map(|&scale| {
        let offset = Vec2::new(scale * edge, 0.0);
        let top = *position + Vec2::new(0.0, fp.height) + offset;
        let bottom = *position + offset;
        probe
            .probe(top, bottom, COLLISION_LAYER_MASK)
            .filter(|h| !h.embedded)
    })?;

    react_to_vertical_hit(req, &hit, position, velocity)
}

fn react_to_vertical_hit(
    req: &ResolveRequest,
    hit: &ProbeHit,
    position: &mut Point2,
    velocity: &mut Vec2,
) -> Option<Landing> {
    match classify(hit.normal) {
        SurfaceKind::Ground => {
            velocity.y = 0.0;
            position.y = hit.point.y;
            req.can_attach.then_some(Landing {
                collider: hit.collider,
                body: hit.body,
                normal: hit.normal,
            })
        }
        SurfaceKind::Roof => {
            if velocity.y > 0.0 {
                velocity.y = 0.0;
            }
            position.y = hit.point.y - req.footprint.height;

            // Riding a descending ceiling: take its downward speed for this tick.
            if let Some(v) = hit.surface_velocity.filter(|v| v.y < 0.0) {
                velocity.y = v.y * req.tick_seconds;
                position.y += velocity.y;
            }
            trace!("roof hit at {:?}, vy = {}", hit.point, velocity.y);
            None
        }
        SurfaceKind::Wall => None,
    }
}

fn horizontal_pass(
    probe: &impl GeometryProbe,
    fp: &Footprint,
    position: &mut Point2,
    velocity: &mut Vec2,
) {
    let vy = velocity.y;
    let first_y = (if vy < 0.0 { -vy } else { 0.0 }).max(fp.inset_y);
    let last_y = (if vy > 0.0 { fp.height - vy } else { fp.height }).min(fp.height - fp.inset_y);
    if last_y < first_y {
        return;
    }

    for &row in &HORIZONTAL_PROBE_ROWS {
        let lift = Vec2::new(0.0, first_y + row * (last_y - first_y));
        let left = *position + lift - Vec2::new(fp.half_width, 0.0);
        let right = *position + lift + Vec2::new(fp.half_width, 0.0);

        let Some(hit) = probe
            .probe(left, right, COLLISION_LAYER_MASK)
            .filter(|h| !h.embedded && is_wall(h.normal))
        else {
            continue;
        };

        position.x = hit.point.x + hit.normal.x.signum() * fp.half_width;
        if hit.normal.x * velocity.x < 0.0 {
            velocity.x = 0.0;
        }
        trace!("wall hit at {:?}, x = {}", hit.point, position.x);
    }
}
