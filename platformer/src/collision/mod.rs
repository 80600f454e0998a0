/*!
Collision root module.

This module re-exports the submodules that resolve a character's free movement
against solid geometry through directional line probes. The code is split for
clarity:

- types:    shared data types (Footprint, ProbeHit, AttachContact, math aliases)
- settings: slope threshold, probe sample sets and tolerances
- layers:   collision layers and the movement layer mask
- surface:  ground / wall / roof classification of contact normals
- probe:    the geometry query seam and the double line cast
- resolver: vertical then horizontal correction passes
*/

pub mod layers;
pub mod probe;
pub mod resolver;
pub mod settings;
pub mod surface;
pub mod types;

// Re-export commonly used types and functions.
pub use layers::{COLLISION_LAYER_MASK, CollisionLayer, LayerMask};
pub use probe::{GeometryProbe, RayCastHit, SurfaceLookup, double_line_cast};
pub use resolver::{Landing, ResolveRequest, ResolveResult, resolve_free_motion};
pub use surface::{SurfaceKind, classify, is_ground, is_roof, is_wall};
pub use types::{AttachContact, Footprint, Iso2, Point2, ProbeHit, Vec2};
