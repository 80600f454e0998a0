use super::{settings::SLOPE_LIMIT_COS, types::Vec2};

/// Slope class of a contact surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    Ground,
    Wall,
    Roof,
}

/// Normals within 60° of straight up.
#[inline]
pub fn is_ground(n: Vec2) -> bool {
    n.y >= SLOPE_LIMIT_COS
}

/// Normals within 60° of straight down.
#[inline]
pub fn is_roof(n: Vec2) -> bool {
    n.y <= -SLOPE_LIMIT_COS
}

#[inline]
pub fn is_wall(n: Vec2) -> bool {
    !is_ground(n) && !is_roof(n)
}

/// Classify a unit surface normal.
#[inline]
pub fn classify(n: Vec2) -> SurfaceKind {
    if is_ground(n) {
        SurfaceKind::Ground
    } else if is_roof(n) {
        SurfaceKind::Roof
    } else {
        SurfaceKind::Wall
    }
}
