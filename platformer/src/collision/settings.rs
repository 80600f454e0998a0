/*!
Collision tolerances and fixed sampling patterns.

These constants centralize the parameters used by the resolver passes and the
surface rider. The sample sets are fixed, small arrays so the number of probes
per tick is bounded and easy to enumerate in tests.
*/

/// Cosine of the 60° slope threshold separating ground, wall and roof normals.
///
/// `cos(π/3)` is exactly one half.
pub const SLOPE_LIMIT_COS: f32 = 0.5;

/// Horizontal offsets of the vertical probes, in units of `half_width - inset_x`.
///
/// Tried in order; the first non-embedded hit wins.
pub const VERTICAL_PROBE_OFFSETS: [f32; 3] = [0.0, 1.0, -1.0];

/// Relative heights of the horizontal probe rows between the first and last sample height.
pub const HORIZONTAL_PROBE_ROWS: [f32; 3] = [0.0, 0.5, 1.0];

/// How far below the anchor the rider looks for its surface (units).
pub const RIDE_PROBE_DEPTH: f32 = 0.05;

/// How far above the anchor the rider's standing probe starts (units).
pub const RIDE_PROBE_LIFT: f32 = 0.05;

/// Practical small distance for comparisons (units).
pub const DIST_EPS: f32 = 1.0e-6;
