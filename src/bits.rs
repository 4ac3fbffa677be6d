use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of board cells packed into the low nine bits of a `u16`.
///
/// Cell `i` (row-major, top-left is 0) is bit `1 << i`. The set only records which cells are
/// occupied, never by whom.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Bits(u16);

/// Cell 0.
pub const TOP_LEFT: Bits = Bits(1 << 0);
/// Cell 1.
pub const TOP_CENTER: Bits = Bits(1 << 1);
/// Cell 2.
pub const TOP_RIGHT: Bits = Bits(1 << 2);
/// Cell 3.
pub const MIDDLE_LEFT: Bits = Bits(1 << 3);
/// Cell 4.
pub const CENTER: Bits = Bits(1 << 4);
/// Cell 5.
pub const MIDDLE_RIGHT: Bits = Bits(1 << 5);
/// Cell 6.
pub const BOTTOM_LEFT: Bits = Bits(1 << 6);
/// Cell 7.
pub const BOTTOM_CENTER: Bits = Bits(1 << 7);
/// Cell 8.
pub const BOTTOM_RIGHT: Bits = Bits(1 << 8);

/// Every cell in canonical index order.
pub const CELLS: [Bits; 9] = [
    TOP_LEFT,
    TOP_CENTER,
    TOP_RIGHT,
    MIDDLE_LEFT,
    CENTER,
    MIDDLE_RIGHT,
    BOTTOM_LEFT,
    BOTTOM_CENTER,
    BOTTOM_RIGHT,
];

/// No cell occupied.
pub const EMPTY: Bits = Bits(0);

/// All nine cells occupied.
pub const FULL: Bits = Bits(0b1_1111_1111);

/// The eight lines that win the game: rows, columns, then diagonals.
pub const WINNING_LINES: [Bits; 8] = [
    TOP_LEFT.union(TOP_CENTER).union(TOP_RIGHT),
    MIDDLE_LEFT.union(CENTER).union(MIDDLE_RIGHT),
    BOTTOM_LEFT.union(BOTTOM_CENTER).union(BOTTOM_RIGHT),
    TOP_LEFT.union(MIDDLE_LEFT).union(BOTTOM_LEFT),
    TOP_CENTER.union(CENTER).union(BOTTOM_CENTER),
    TOP_RIGHT.union(MIDDLE_RIGHT).union(BOTTOM_RIGHT),
    TOP_LEFT.union(CENTER).union(BOTTOM_RIGHT),
    TOP_RIGHT.union(CENTER).union(BOTTOM_LEFT),
];

/// Returns the bit for cell `index`, or `None` if the index is off the board.
pub fn index_to_bit(index: usize) -> Option<Bits> {
    CELLS.get(index).copied()
}

/// Returns the index of the first cell of `bits` in canonical order.
///
/// Only meaningful for a single-cell mask. Returns `None` if `bits` holds no cell.
pub fn bit_to_index(bits: Bits) -> Option<usize> {
    CELLS.iter().position(|&cell| bits.intersects(cell))
}

impl Bits {
    /// Builds a set from raw bits, dropping anything above the ninth cell.
    pub const fn from_raw(raw: u16) -> Self {
        Bits(raw & FULL.0)
    }

    /// The raw bit pattern.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Cells in either set, usable in `const` context.
    pub const fn union(self, other: Bits) -> Bits {
        Bits(self.0 | other.0)
    }

    /// Number of cells in the set.
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns `true` if no cell is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every cell of `other` is in `self`.
    pub const fn contains(self, other: Bits) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if `self` and `other` share at least one cell.
    pub const fn intersects(self, other: Bits) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterates over the indices of the cells in the set, in canonical order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..CELLS.len()).filter(move |&i| self.intersects(CELLS[i]))
    }
}

impl BitOr for Bits {
    type Output = Bits;

    fn bitor(self, rhs: Bits) -> Bits {
        self.union(rhs)
    }
}

impl BitOrAssign for Bits {
    fn bitor_assign(&mut self, rhs: Bits) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Bits {
    type Output = Bits;

    fn bitand(self, rhs: Bits) -> Bits {
        Bits(self.0 & rhs.0)
    }
}

impl fmt::Display for Bits {
    /// Formats the set as a list of cell indices, e.g. `[0, 4, 8]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::bits::*;

    #[test]
    fn index_and_bit_convert_both_ways() {
        for (i, &cell) in CELLS.iter().enumerate() {
            assert_eq!(index_to_bit(i), Some(cell));
            assert_eq!(bit_to_index(cell), Some(i));
        }
        assert_eq!(index_to_bit(9), None);
        assert_eq!(bit_to_index(EMPTY), None);
    }

    #[test]
    fn full_is_every_cell() {
        let all = CELLS.iter().fold(EMPTY, |acc, &cell| acc | cell);
        assert_eq!(all, FULL);
        assert_eq!(FULL.len(), 9);
        assert_eq!(Bits::from_raw(0xFFFF), FULL);
    }

    #[test]
    fn winning_lines_are_distinct_triples() {
        for (i, line) in WINNING_LINES.iter().enumerate() {
            assert_eq!(line.len(), 3);
            for other in &WINNING_LINES[i + 1..] {
                assert_ne!(line, other);
            }
        }
        assert_eq!(WINNING_LINES[0], Bits::from_raw(0b000_000_111));
        assert_eq!(WINNING_LINES[7].iter().collect::<Vec<_>>(), vec![2, 4, 6]);
    }

    #[test]
    fn set_operations() {
        let corners = TOP_LEFT | TOP_RIGHT | BOTTOM_LEFT | BOTTOM_RIGHT;
        assert!(corners.contains(TOP_RIGHT));
        assert!(!corners.contains(TOP_RIGHT | CENTER));
        assert!(corners.intersects(TOP_RIGHT | CENTER));
        assert_eq!(corners & (TOP_LEFT | CENTER), TOP_LEFT);
        assert_eq!(corners.to_string(), "[0, 2, 6, 8]");
    }
}
