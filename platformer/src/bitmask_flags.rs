use num_traits::{One, PrimInt};

/// Trait implemented by flag enums.
///
/// The enum's discriminant (via `#[repr(u8)]`) determines the bit index.
/// The backing integer type is chosen via the associated `Storage`.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A plain bitmask container over a primitive integer.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub const fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, tag: U) -> bool {
        (self.bits & tag.mask()) != T::zero()
    }
}
