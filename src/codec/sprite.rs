//! Interleaving mask and graphic planes into hardware sprite records.

use super::{CodecError, Plane};

/// Number of tiles in one sprite cell.
const TILES_PER_SPRITE: usize = 4;

/// Interleave rotated graphic and mask planes, four tiles at a time.
///
/// Each group of tiles `t..t + 4` emits:
///
/// ```text
/// mask[t]      mask[t + 2]
/// graphic[t]   graphic[t + 2]
/// mask[t + 1]  mask[t + 3]
/// graphic[t + 1] graphic[t + 3]
/// ```
///
/// The output is always twice as long as `graphic`.
pub fn build_sprite(graphic: &[Plane], mask: &[Plane]) -> Result<Vec<Plane>, CodecError> {
    if graphic.len() != mask.len() || graphic.len() % TILES_PER_SPRITE != 0 {
        return Err(CodecError::SpriteLayout { graphic: graphic.len(), mask: mask.len() });
    }

    let mut sprite = Vec::with_capacity(graphic.len() * 2);
    for (g, m) in graphic.chunks_exact(TILES_PER_SPRITE).zip(mask.chunks_exact(TILES_PER_SPRITE)) {
        sprite.extend_from_slice(&[m[0], m[2], g[0], g[2], m[1], m[3], g[1], g[3]]);
    }
    Ok(sprite)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: u8, count: usize) -> Vec<Plane> {
        (0..count).map(|i| [tag | i as u8; 8]).collect()
    }

    #[test]
    fn test_single_sprite_order() {
        let graphic = tagged(0x10, 4);
        let mask = tagged(0x20, 4);
        let sprite = build_sprite(&graphic, &mask).unwrap();
        let firsts: Vec<u8> = sprite.iter().map(|p| p[0]).collect();
        assert_eq!(firsts, vec![0x20, 0x22, 0x10, 0x12, 0x21, 0x23, 0x11, 0x13]);
    }

    #[test]
    fn test_two_sprites_order() {
        let graphic = tagged(0x10, 8);
        let mask = tagged(0x20, 8);
        let sprite = build_sprite(&graphic, &mask).unwrap();
        let firsts: Vec<u8> = sprite.iter().map(|p| p[0]).collect();
        assert_eq!(
            firsts,
            vec![
                0x20, 0x22, 0x10, 0x12, 0x21, 0x23, 0x11, 0x13, //
                0x24, 0x26, 0x14, 0x16, 0x25, 0x27, 0x15, 0x17,
            ]
        );
    }

    #[test]
    fn test_output_doubles_plane_count() {
        for count in [0, 4, 8, 16, 36] {
            let sprite = build_sprite(&tagged(0, count), &tagged(0x40, count)).unwrap();
            assert_eq!(sprite.len(), count * 2);
        }
    }

    #[test]
    fn test_rejects_partial_sprite() {
        for count in [1, 2, 3, 5, 6] {
            let err = build_sprite(&tagged(0, count), &tagged(0x40, count)).unwrap_err();
            assert_eq!(err, CodecError::SpriteLayout { graphic: count, mask: count });
        }
    }

    #[test]
    fn test_rejects_mismatched_counts() {
        let err = build_sprite(&tagged(0, 4), &tagged(0x40, 8)).unwrap_err();
        assert_eq!(err, CodecError::SpriteLayout { graphic: 4, mask: 8 });
    }
}
