/*!
Core collision types and math aliases shared by the collision submodules.

This module intentionally contains no algorithms. It defines the data types
exchanged between:
- the geometry probe (double line casts against the solid world)
- the collision resolver (vertical and horizontal sweep passes)
- the attachment state machine and the surface rider
*/

use nalgebra as na;
use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};
use serde::{Deserialize, Serialize};

/// Common math aliases for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;
pub type Point2 = na::Point2<f32>;
pub type Iso2 = na::Isometry2<f32>;

/// Immutable per-character geometry used to place probe segments.
///
/// The character's origin is the bottom center of its box: the box spans
/// `[-half_width, half_width]` horizontally and `[0, height]` vertically.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footprint {
    pub half_width: f32,
    pub height: f32,
    /// Horizontal inset of the side vertical probes from the box edge.
    pub inset_x: f32,
    /// Vertical inset of the lowest and highest horizontal probes.
    pub inset_y: f32,
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            half_width: 0.4,
            height: 1.2,
            inset_x: 0.05,
            inset_y: 0.05,
        }
    }
}

impl Footprint {
    /// Checks the construction-time preconditions the resolver relies on.
    pub fn validate(&self) -> Result<(), &'static str> {
        let values = [self.half_width, self.height, self.inset_x, self.inset_y];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("Footprint values must be finite");
        }
        if self.half_width <= 0.0 || self.height <= 0.0 {
            return Err("Footprint size must be positive");
        }
        if self.inset_x < 0.0 || self.inset_y < 0.0 {
            return Err("Footprint insets must not be negative");
        }
        if self.inset_x >= self.half_width {
            return Err("Footprint inset_x must be smaller than half_width");
        }
        if self.inset_y * 2.0 >= self.height {
            return Err("Footprint inset_y must leave room between the top and bottom probes");
        }
        Ok(())
    }
}

/// Nearest solid surface found by a line probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeHit {
    /// World-space contact point.
    pub point: Point2,
    /// World-space unit surface normal at the contact (zero when `embedded`).
    pub normal: Vec2,
    /// The probe started inside solid geometry; callers must not react to it.
    pub embedded: bool,
    /// Collider that was hit.
    pub collider: ColliderHandle,
    /// Rigid body owning the collider, if any.
    pub body: Option<RigidBodyHandle>,
    /// Velocity of a non-fixed body at the contact point (units/second).
    pub surface_velocity: Option<Vec2>,
}

/// Data captured when the character attaches to a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttachContact {
    pub collider: ColliderHandle,
    pub body: Option<RigidBodyHandle>,
    /// Character origin on the surface (world space).
    pub point: Point2,
    /// Surface normal at the anchor (world space).
    pub normal: Vec2,
    /// Character velocity at the moment of attachment (units/tick).
    pub velocity: Vec2,
}
