use serde::Deserialize;

/// Horizontal flip flag (bit 31 of a raw GID).
pub const FLIP_H: u32 = 0x8000_0000;
/// Vertical flip flag (bit 30 of a raw GID).
pub const FLIP_V: u32 = 0x4000_0000;
/// Diagonal flip flag (bit 29 of a raw GID).
pub const FLIP_D: u32 = 0x2000_0000;
/// Mask keeping the 29-bit tile index, dropping the flip flags.
pub const GID_MASK: u32 = 0x0FFF_FFFF;

/// A global tile identifier: three orientation-flip bits layered on top
/// of a 29-bit tile index. Zero means "no tile".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Gid(pub u32);

impl Gid {
    /// The empty cell.
    pub const NONE: Gid = Gid(0);

    /// Full 32-bit value, flip flags included.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Tile index with the flip flags masked off.
    #[inline]
    pub fn clean(self) -> u32 {
        self.0 & GID_MASK
    }

    /// Whether the tile is flipped horizontally.
    #[inline]
    pub fn flip_h(self) -> bool {
        (self.0 & FLIP_H) != 0
    }

    /// Whether the tile is flipped vertically.
    #[inline]
    pub fn flip_v(self) -> bool {
        (self.0 & FLIP_V) != 0
    }

    /// Whether the tile is flipped along the diagonal.
    #[inline]
    pub fn flip_d(self) -> bool {
        (self.0 & FLIP_D) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_every_flip_flag() {
        let gid = Gid(150 | FLIP_H | FLIP_V | FLIP_D);
        assert_eq!(gid.clean(), 150);
        assert!(gid.flip_h());
        assert!(gid.flip_v());
        assert!(gid.flip_d());
    }

    #[test]
    fn plain_gid_has_no_flags() {
        let gid = Gid(42);
        assert_eq!(gid.clean(), 42);
        assert!(!gid.flip_h() && !gid.flip_v() && !gid.flip_d());
    }
}
