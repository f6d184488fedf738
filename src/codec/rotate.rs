//! 90-degree bit rotations matching the hardware's row/bit addressing.
//!
//! There are two directions and they stay separate functions: tile mode uses
//! [`rotate_forward`], sprite graphic and mask planes use [`rotate_reverse`].
//! Each is the other's inverse.

use super::Plane;

/// Rotate a tile-mode plane.
///
/// Source bit `r` of byte `c` moves to bit `c` of byte `7 - r`.
pub fn rotate_forward(src: &Plane) -> Plane {
    let mut out = [0u8; 8];
    for row in 0..8 {
        for bit in 0..8 {
            if src[bit] & (1 << row) != 0 {
                out[7 - row] |= 1 << bit;
            }
        }
    }
    out
}

/// Rotate a sprite graphic or mask plane.
///
/// Source bit `r` of byte `7 - c` moves to bit `c` of byte `r`.
pub fn rotate_reverse(src: &Plane) -> Plane {
    let mut out = [0u8; 8];
    for row in 0..8 {
        for bit in 0..8 {
            if src[7 - bit] & (1 << row) != 0 {
                out[row] |= 1 << bit;
            }
        }
    }
    out
}
