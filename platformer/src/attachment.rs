//! Attachment state and the rider interface.
//!
//! A character is either [`Attachment::Free`] (integrating its own velocity against the
//! resolver) or [`Attachment::Attached`] to a surface, in which case a [`Rider`] carries it along
//! with that surface. The transitions themselves live in the controller, which is the only
//! writer of this state.

use crate::collision::{AttachContact, GeometryProbe, Point2, SurfaceLookup, Vec2};

/// Outcome of one attached tick reported by the rider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RideUpdate {
    /// The move along the surface was blocked by a wall.
    pub solid_wall_collision: bool,
    /// The character still stands on its anchor surface.
    pub still_standing: bool,
}

/// Carries an attached character along a (possibly moving or rotating) surface.
///
/// The rider only holds handles to the surface; a surface that disappeared from the world must
/// be reported as "not standing" rather than treated as a fault.
pub trait Rider {
    fn attach<W: SurfaceLookup>(&mut self, world: &W, contact: AttachContact);

    fn detach(&mut self);

    /// Advance one tick: move `vx` along the surface and report wall contact and footing.
    fn update_position<W: GeometryProbe + SurfaceLookup>(
        &mut self,
        world: &W,
        vx: f32,
        is_ground: fn(Vec2) -> bool,
    ) -> RideUpdate;

    fn current_position(&self) -> Point2;

    /// Velocity of the character implied by the ride (units/tick).
    fn estimated_velocity(&self) -> Vec2;

    fn is_active(&self) -> bool;
}

/// Whether the character is snapped to a surface, and to which one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Attachment {
    #[default]
    Free,
    Attached(AttachContact),
}

impl Attachment {
    #[inline]
    pub fn is_attached(&self) -> bool {
        matches!(self, Attachment::Attached(_))
    }

    /// Contact captured when the current attachment started.
    #[inline]
    pub fn contact(&self) -> Option<&AttachContact> {
        match self {
            Attachment::Free => None,
            Attachment::Attached(contact) => Some(contact),
        }
    }
}

/// State change performed during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Attached,
    Detached,
}
