//! Sequential reference implementation.
//!
//! One cell at a time, toroidal wraparound via explicit index checks, one
//! full-board pass per generation. This defines ground truth for the striped
//! engine and handles boards too small to be worth parallelizing.

/// B3/S23: alive next generation iff three live neighbors, or two live
/// neighbors around an already-live cell.
#[inline(always)]
pub fn is_alive(neighbor_count: u8, self_alive: bool) -> bool {
    neighbor_count == 3 || (self_alive && neighbor_count == 2)
}

/// Advance `inboard` by `gens_max` generations, double-buffering against
/// `outboard`. Boards are column-major: cell (i, j) lives at `i + rows * j`.
/// Returns the buffer holding the final state; the other buffer's contents
/// are unspecified afterwards.
pub fn sequential_game_of_life<'a>(
    outboard: &'a mut [u8],
    inboard: &'a mut [u8],
    rows: usize,
    cols: usize,
    gens_max: u64,
) -> &'a mut [u8] {
    let mut cur = inboard;
    let mut next = outboard;
    for _ in 0..gens_max {
        step(cur, next, rows, cols);
        std::mem::swap(&mut cur, &mut next);
    }
    cur
}

fn step(cur: &[u8], next: &mut [u8], rows: usize, cols: usize) {
    for j in 0..cols {
        let jwest = if j == 0 { cols - 1 } else { j - 1 };
        let jeast = if j + 1 == cols { 0 } else { j + 1 };
        for i in 0..rows {
            let inorth = if i == 0 { rows - 1 } else { i - 1 };
            let isouth = if i + 1 == rows { 0 } else { i + 1 };
            let neighbors = cur[inorth + rows * jwest]
                + cur[inorth + rows * j]
                + cur[inorth + rows * jeast]
                + cur[i + rows * jwest]
                + cur[i + rows * jeast]
                + cur[isouth + rows * jwest]
                + cur[isouth + rows * j]
                + cur[isouth + rows * jeast];
            next[i + rows * j] = is_alive(neighbors, cur[i + rows * j] == 1) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_alive, sequential_game_of_life};

    #[test]
    fn alive_predicate_matches_b3_s23() {
        for count in 0u8..=8 {
            assert_eq!(is_alive(count, true), count == 2 || count == 3);
            assert_eq!(is_alive(count, false), count == 3);
        }
    }

    #[test]
    fn zero_generations_returns_inboard_untouched() {
        let mut inboard = vec![0u8; 64];
        inboard[3 + 8 * 3] = 1;
        let expected = inboard.clone();
        let mut outboard = vec![0u8; 64];

        let result = sequential_game_of_life(&mut outboard, &mut inboard, 8, 8, 0);
        assert_eq!(result, expected.as_slice());
    }

    #[test]
    fn lone_cell_dies_in_one_generation() {
        let mut inboard = vec![0u8; 64];
        inboard[4 + 8 * 4] = 1;
        let mut outboard = vec![0u8; 64];

        let result = sequential_game_of_life(&mut outboard, &mut inboard, 8, 8, 1);
        assert!(result.iter().all(|&c| c == 0));
    }

    #[test]
    fn block_is_stable() {
        let rows = 8;
        let mut inboard = vec![0u8; rows * rows];
        for (i, j) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
            inboard[i + rows * j] = 1;
        }
        let expected = inboard.clone();
        let mut outboard = vec![0u8; rows * rows];

        let result = sequential_game_of_life(&mut outboard, &mut inboard, rows, rows, 5);
        assert_eq!(result, expected.as_slice());
    }

    #[test]
    fn blinker_wraps_across_the_column_seam() {
        let rows = 8;
        // Horizontal blinker centred on column 0: columns 7, 0, 1 of row 3.
        let mut inboard = vec![0u8; rows * rows];
        for j in [7, 0, 1] {
            inboard[3 + rows * j] = 1;
        }
        let original = inboard.clone();
        let mut outboard = vec![0u8; rows * rows];

        let result = sequential_game_of_life(&mut outboard, &mut inboard, rows, rows, 1);
        // Vertical phase: rows 2, 3, 4 of column 0.
        let mut vertical = vec![0u8; rows * rows];
        for i in [2, 3, 4] {
            vertical[i] = 1;
        }
        assert_eq!(result, vertical.as_slice());

        let mut inboard = original.clone();
        let mut outboard = vec![0u8; rows * rows];
        let result = sequential_game_of_life(&mut outboard, &mut inboard, rows, rows, 2);
        assert_eq!(result, original.as_slice());
    }
}
