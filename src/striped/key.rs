//! 9-bit neighborhood keys and their rolling updates.
//!
//! A key packs a cell's 3x3 neighborhood, MSB first:
//!
//! ```text
//! bits 8..=6  north row: west, center, east
//! bits 5..=3  middle row: west, self, east
//! bits 2..=0  south row: west, center, east
//! ```
//!
//! Bit 4 is the cell itself; the other eight bits are its neighbors. The key
//! indexes the 512-entry rule table. Keys are never recomputed from scratch in
//! the hot loop: stepping one row south shifts the north row out and a fresh
//! south row in, and a group of four adjacent columns derives all four keys
//! from one six-sample row window.

pub(crate) const KEY_BITS: u32 = 9;
pub(crate) const KEY_COUNT: usize = 1 << KEY_BITS;
const KEY_MASK: u16 = (KEY_COUNT - 1) as u16;
const ROW_MASK: u16 = 0b111;
const SELF_BIT: u16 = 1 << 4;

/// Packed 3x3 neighborhood of one cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub(crate) struct NeighborKey(u16);

impl NeighborKey {
    #[inline(always)]
    pub fn from_index(index: u16) -> Self {
        debug_assert!((index as usize) < KEY_COUNT);
        Self(index & KEY_MASK)
    }

    /// Build a key from three rows of cell samples, each `[west, center, east]`.
    pub fn from_neighborhood(north: [u8; 3], middle: [u8; 3], south: [u8; 3]) -> Self {
        let mut key = Self::default();
        for row in [north, middle, south] {
            let segment =
                (((row[0] & 1) as u16) << 2) | (((row[1] & 1) as u16) << 1) | ((row[2] & 1) as u16);
            key = key.shift_south(segment);
        }
        key
    }

    /// Move the window one row south: discard the north row, shift the middle
    /// and south rows up, and bring `segment` in as the new south row.
    #[inline(always)]
    pub fn shift_south(self, segment: u16) -> Self {
        debug_assert!(segment <= ROW_MASK);
        Self(((self.0 << 3) | segment) & KEY_MASK)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn self_alive(self) -> bool {
        self.0 & SELF_BIT != 0
    }

    #[inline(always)]
    pub fn neighbor_count(self) -> u8 {
        (self.0 & !SELF_BIT).count_ones() as u8
    }
}

/// Six consecutive column samples of one row, covering a four-column group
/// plus its west and east wrap columns. Bit 5 is the west wrap, bit 0 the
/// east wrap. Adjacent columns' 3-bit row segments overlap by two samples, so
/// one window feeds all four keys of a group.
#[derive(Clone, Copy)]
pub(crate) struct RowWindow(u16);

impl RowWindow {
    #[inline(always)]
    pub fn new(samples: [u8; 6]) -> Self {
        let mut window = 0u16;
        for sample in samples {
            window = (window << 1) | (sample & 1) as u16;
        }
        Self(window)
    }

    /// 3-bit row segment centred on the group's `m`-th column.
    #[inline(always)]
    pub fn segment(self, m: usize) -> u16 {
        debug_assert!(m < 4);
        (self.0 >> (3 - m)) & ROW_MASK
    }
}

/// The four rolling keys of a four-column group.
#[derive(Default)]
pub(crate) struct KeyQuad {
    keys: [NeighborKey; 4],
}

impl KeyQuad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift all four keys one row south, pulling their segments out of the
    /// shared window.
    #[inline(always)]
    pub fn shift_in(&mut self, window: RowWindow) {
        for (m, key) in self.keys.iter_mut().enumerate() {
            *key = key.shift_south(window.segment(m));
        }
    }

    #[inline(always)]
    pub fn key(&self, m: usize) -> NeighborKey {
        self.keys[m]
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyQuad, NeighborKey, RowWindow};

    #[test]
    fn bit_layout_matches_hand_computed_neighborhood() {
        // D D A
        // D D D
        // A A D
        let key = NeighborKey::from_neighborhood([0, 0, 1], [0, 0, 0], [1, 1, 0]);
        assert_eq!(key.index(), 0b001_000_110);
        assert_eq!(key.neighbor_count(), 3);
        assert!(!key.self_alive());
    }

    #[test]
    fn self_bit_is_bit_four() {
        let key = NeighborKey::from_neighborhood([0, 0, 0], [0, 1, 0], [0, 0, 0]);
        assert_eq!(key.index(), 1 << 4);
        assert!(key.self_alive());
        assert_eq!(key.neighbor_count(), 0);
    }

    #[test]
    fn full_neighborhood_is_all_ones() {
        let key = NeighborKey::from_neighborhood([1, 1, 1], [1, 1, 1], [1, 1, 1]);
        assert_eq!(key.index(), 0b111_111_111);
        assert_eq!(key.neighbor_count(), 8);
        assert!(key.self_alive());
    }

    #[test]
    fn shift_south_slides_the_window_one_row() {
        let north = [1, 0, 0];
        let middle = [0, 1, 1];
        let south = [1, 1, 0];
        let fresh = [0, 0, 1];

        let key = NeighborKey::from_neighborhood(north, middle, south);
        let shifted = key.shift_south(0b001);
        assert_eq!(shifted, NeighborKey::from_neighborhood(middle, south, fresh));
    }

    #[test]
    fn row_window_segments_overlap_by_two_samples() {
        // west | c0 c1 c2 c3 | east
        let window = RowWindow::new([1, 0, 1, 1, 0, 1]);
        assert_eq!(window.segment(0), 0b101);
        assert_eq!(window.segment(1), 0b011);
        assert_eq!(window.segment(2), 0b110);
        assert_eq!(window.segment(3), 0b101);
    }

    #[test]
    fn key_quad_agrees_with_per_cell_construction() {
        let north = [1u8, 0, 1, 1, 0, 0];
        let middle = [0u8, 1, 1, 0, 0, 1];
        let south = [1u8, 1, 0, 0, 1, 0];

        let mut quad = KeyQuad::new();
        quad.shift_in(RowWindow::new(north));
        quad.shift_in(RowWindow::new(middle));
        quad.shift_in(RowWindow::new(south));

        for m in 0..4 {
            let expected = NeighborKey::from_neighborhood(
                [north[m], north[m + 1], north[m + 2]],
                [middle[m], middle[m + 1], middle[m + 2]],
                [south[m], south[m + 1], south[m + 2]],
            );
            assert_eq!(quad.key(m), expected, "column {m}");
        }
    }
}
