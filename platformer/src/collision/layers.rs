//! Collision layers and the solid-probe layer mask.
//!
//! Every collider in the query world is tagged with exactly one layer (stored in the collider's
//! `user_data`). Probes carry a [`LayerMask`] and skip colliders whose layer is not in it.

use serde::{Deserialize, Serialize};

use crate::bitmask_flags::{BitmaskFlags, FlagBitmask};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CollisionLayer {
    #[default]
    Solid,
    /// Moving or static platforms the character can ride.
    Platform,
    TriggerObject,
    TriggerDetect,
    Rope,
}

impl FlagBitmask for CollisionLayer {
    type Storage = u32;

    fn bit_index(&self) -> u8 {
        *self as u8
    }
}

/// Set of collision layers a probe may hit.
pub type LayerMask = BitmaskFlags<u32>;

/// Layers that never block movement.
pub const NON_PHYSICAL_LAYERS: [CollisionLayer; 3] = [
    CollisionLayer::TriggerObject,
    CollisionLayer::TriggerDetect,
    CollisionLayer::Rope,
];

/// Mask used by every movement probe: everything except [`NON_PHYSICAL_LAYERS`].
pub const COLLISION_LAYER_MASK: LayerMask = LayerMask::new(!layer_bits(&NON_PHYSICAL_LAYERS));

const fn layer_bits(layers: &[CollisionLayer]) -> u32 {
    let mut bits = 0;
    let mut i = 0;
    while i < layers.len() {
        bits |= 1 << layers[i] as u32;
        i += 1;
    }
    bits
}

impl CollisionLayer {
    pub const ALL: [CollisionLayer; 5] = [
        CollisionLayer::Solid,
        CollisionLayer::Platform,
        CollisionLayer::TriggerObject,
        CollisionLayer::TriggerDetect,
        CollisionLayer::Rope,
    ];

    /// Value stored in a collider's `user_data` for this layer.
    #[inline]
    pub fn to_user_data(self) -> u128 {
        self.bit_index() as u128
    }

    /// Decode a layer from collider `user_data`; unknown values yield `None`.
    #[inline]
    pub fn from_user_data(data: u128) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.to_user_data() == data)
    }
}

/// Returns true if a collider with `user_data` is selected by `mask`.
///
/// Colliders with an unknown layer tag are treated as [`CollisionLayer::Solid`].
#[inline]
pub fn user_data_in_mask(data: u128, mask: LayerMask) -> bool {
    mask.has(CollisionLayer::from_user_data(data).unwrap_or(CollisionLayer::Solid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_mask_excludes_exactly_the_non_physical_layers() {
        for layer in CollisionLayer::ALL {
            let expected = !NON_PHYSICAL_LAYERS.contains(&layer);
            assert_eq!(COLLISION_LAYER_MASK.has(layer), expected, "{layer:?}");
        }
        assert!(COLLISION_LAYER_MASK.has(CollisionLayer::Solid));
        assert!(COLLISION_LAYER_MASK.has(CollisionLayer::Platform));
    }

    #[test]
    fn user_data_round_trips_and_unknown_tags_count_as_solid() {
        for layer in CollisionLayer::ALL {
            assert_eq!(
                CollisionLayer::from_user_data(layer.to_user_data()),
                Some(layer)
            );
        }
        assert_eq!(CollisionLayer::from_user_data(999), None);
        assert!(user_data_in_mask(999, COLLISION_LAYER_MASK));
        assert!(!user_data_in_mask(
            CollisionLayer::Rope.to_user_data(),
            COLLISION_LAYER_MASK
        ));
    }
}
