use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collision::{CollisionLayer, Iso2, Point2, Vec2};

/// Schema-agnostic definition of one level solid.
///
/// Level files map onto this type directly; [`QueryWorld::build`](crate::rapier_world::QueryWorld::build)
/// turns a list of them into rapier bodies and colliders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolidDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space translation.
    pub translation: [f32; 2],
    /// Counter-clockwise rotation in degrees.
    #[serde(default)]
    pub rotation_deg: f32,
    pub shape: SolidShapeDef,
    #[serde(default)]
    pub layer: CollisionLayer,
    /// Present for moving solids (kinematic bodies); absent for fixed ones.
    #[serde(default)]
    pub motion: Option<SolidMotion>,
}

/// Supported solid shapes, in the solid's local frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SolidShapeDef {
    Cuboid { half_extents: [f32; 2] },
    Ball { radius: f32 },
    /// Y-aligned capsule.
    CapsuleY { radius: f32, half_height: f32 },
    /// One-sided thin line, e.g. a slope or a rope span.
    Segment { a: [f32; 2], b: [f32; 2] },
}

/// Constant velocity of a moving solid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SolidMotion {
    /// Units/second.
    #[serde(default)]
    pub linvel: [f32; 2],
    /// Degrees/second, counter-clockwise.
    #[serde(default)]
    pub angvel_deg: f32,
}

impl SolidDef {
    pub fn pose(&self) -> Iso2 {
        Iso2::new(
            Vec2::new(self.translation[0], self.translation[1]),
            self.rotation_deg.to_radians(),
        )
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        let finite = |v: &[f32]| v.iter().all(|x| x.is_finite());
        if !finite(&self.translation) || !self.rotation_deg.is_finite() {
            return Err("Solid pose must be finite");
        }
        if let Some(m) = &self.motion {
            if !finite(&m.linvel) || !m.angvel_deg.is_finite() {
                return Err("Solid motion must be finite");
            }
        }
        match &self.shape {
            SolidShapeDef::Cuboid { half_extents } => {
                if !finite(half_extents) || half_extents.iter().any(|h| *h <= 0.0) {
                    return Err("Cuboid half extents must be positive");
                }
            }
            SolidShapeDef::Ball { radius } => {
                if !radius.is_finite() || *radius <= 0.0 {
                    return Err("Ball radius must be positive");
                }
            }
            SolidShapeDef::CapsuleY {
                radius,
                half_height,
            } => {
                if !radius.is_finite() || !half_height.is_finite() || *radius <= 0.0 {
                    return Err("Capsule radius must be positive");
                }
                if *half_height < 0.0 {
                    return Err("Capsule half height must not be negative");
                }
            }
            SolidShapeDef::Segment { a, b } => {
                if !finite(a) || !finite(b) {
                    return Err("Segment endpoints must be finite");
                }
                if a == b {
                    return Err("Segment endpoints must differ");
                }
            }
        }
        Ok(())
    }
}

/// Build the rigid body carrying a solid: fixed, or velocity-based kinematic when it moves.
pub fn body_from_def(def: &SolidDef) -> RigidBody {
    match def.motion {
        None => RigidBodyBuilder::fixed().pose(def.pose()).build(),
        Some(m) => RigidBodyBuilder::kinematic_velocity_based()
            .pose(def.pose())
            .linvel(Vec2::new(m.linvel[0], m.linvel[1]))
            .angvel(m.angvel_deg.to_radians())
            .build(),
    }
}

/// Build a rapier collider from a `SolidDef`.
///
/// The pose lives on the parent body, so the collider has an identity local transform.
/// The collision layer is stored in `user_data`.
pub fn collider_from_def(def: &SolidDef) -> Collider {
    let builder = match &def.shape {
        SolidShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents[0], half_extents[1])
        }
        SolidShapeDef::Ball { radius } => ColliderBuilder::ball(*radius),
        SolidShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius),
        SolidShapeDef::Segment { a, b } => {
            ColliderBuilder::segment(Point2::new(a[0], a[1]), Point2::new(b[0], b[1]))
        }
    };
    builder.user_data(def.layer.to_user_data()).build()
}
