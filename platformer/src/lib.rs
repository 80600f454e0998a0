pub mod attachment;
pub mod bitmask_flags;
pub mod collision;
pub mod config;
pub mod constants;
pub mod controller;
pub mod input;
pub mod motion;
pub mod rapier;
pub mod rapier_world;
pub mod rider;
pub mod ticker;

#[cfg(test)]
mod testing;

pub use attachment::{Attachment, RideUpdate, Rider, Transition};
pub use collision::{
    AttachContact, COLLISION_LAYER_MASK, CollisionLayer, Footprint, GeometryProbe, Iso2, Point2,
    SurfaceLookup, Vec2,
};
pub use config::{LevelConfig, LevelConfigError, ScriptEntry};
pub use controller::{CharacterController, KinematicState};
pub use input::{HeldDirections, InputSource, PayloadGate};
pub use rapier::{SolidDef, SolidMotion, SolidShapeDef};
pub use rapier_world::QueryWorld;
pub use rider::SurfaceRider;
pub use ticker::{FixedTicker, PoseInterpolator, TickDriver};
