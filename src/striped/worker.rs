//! Per-stripe worker loop.
//!
//! Each worker owns a disjoint column range of the board for the whole run.
//! Within a generation it reads freely (including the neighbor columns of
//! adjacent stripes) but writes only its own columns, so writes never race.
//! Cross-stripe reads are only ordered by the generation barrier: every worker
//! waits after finishing a generation, which makes all generation-k writes
//! visible to every stripe before generation k+1 reads them. Skipping the wait
//! would let a stripe-edge key pick up a neighbor's previous-generation cell.

use std::ops::Range;
use std::sync::Barrier;

use super::key::{KeyQuad, RowWindow};
use super::table::RuleTable;

/// Columns advanced per key quad.
pub(crate) const COLUMN_UNROLL: usize = 4;

/// Raw board pointer that may cross thread boundaries.
///
/// Safety rests on the stripe partition: every worker receives the same two
/// pointers but writes disjoint column ranges, and the barrier orders reads
/// against the previous generation's writes.
pub(crate) struct SendPtr {
    inner: *mut u8,
}
unsafe impl Send for SendPtr {}
unsafe impl Sync for SendPtr {}
impl Copy for SendPtr {}
impl Clone for SendPtr {
    fn clone(&self) -> Self {
        *self
    }
}
impl SendPtr {
    #[inline(always)]
    pub fn new(ptr: *mut u8) -> Self {
        Self { inner: ptr }
    }
    #[inline(always)]
    pub fn get(&self) -> *mut u8 {
        self.inner
    }
}

/// Everything one worker needs for its run. Built by the orchestrator before
/// spawn, immutable for the worker's lifetime.
pub(crate) struct WorkerContext<'a> {
    pub stripe: Range<usize>,
    pub rows: usize,
    pub cols: usize,
    pub generations: u64,
    pub table: &'a RuleTable,
    pub barrier: &'a Barrier,
}

/// Column base offsets for one four-column group, with the toroidal west and
/// east wrap columns resolved once instead of per cell.
struct ColumnGroup {
    west: usize,
    base: [usize; 4],
    east: usize,
}

impl ColumnGroup {
    fn new(start: usize, rows: usize, cols: usize) -> Self {
        debug_assert!(start % COLUMN_UNROLL == 0 && start + COLUMN_UNROLL <= cols);
        let west_col = if start == 0 { cols - 1 } else { start - 1 };
        let east_col = if start + COLUMN_UNROLL == cols {
            0
        } else {
            start + COLUMN_UNROLL
        };
        Self {
            west: rows * west_col,
            base: [
                rows * start,
                rows * (start + 1),
                rows * (start + 2),
                rows * (start + 3),
            ],
            east: rows * east_col,
        }
    }
}

/// Sample one row of the group's six columns.
///
/// # Safety
/// `src` must be valid for reads of `rows * cols` bytes and `row` must be in
/// bounds; every `group` offset was derived from the same dimensions.
#[inline(always)]
unsafe fn row_window(src: *const u8, row: usize, group: &ColumnGroup) -> RowWindow {
    unsafe {
        RowWindow::new([
            *src.add(row + group.west),
            *src.add(row + group.base[0]),
            *src.add(row + group.base[1]),
            *src.add(row + group.base[2]),
            *src.add(row + group.base[3]),
            *src.add(row + group.east),
        ])
    }
}

/// Advance the worker's stripe by one generation, reading `src` and writing
/// the stripe's columns of `dst`.
///
/// Per four-column group: seed the key quad from the north wrap row and row 0,
/// then walk every row shifting in its south row (wrapping to row 0 at the
/// bottom) and writing the four table lookups. Two board reads per cell per
/// row transition instead of nine.
///
/// # Safety
/// `src` and `dst` must each be valid for `rows * cols` bytes. No other
/// thread may write the stripe's columns of `dst` during the call, and all
/// writes to `src` from the previous generation must be ordered before it.
pub(crate) unsafe fn advance_stripe(src: *const u8, dst: *mut u8, ctx: &WorkerContext<'_>) {
    let rows = ctx.rows;
    debug_assert!(ctx.stripe.len() % COLUMN_UNROLL == 0);
    debug_assert!(rows >= 2);

    let mut group_start = ctx.stripe.start;
    while group_start < ctx.stripe.end {
        let group = ColumnGroup::new(group_start, rows, ctx.cols);

        let mut quad = KeyQuad::new();
        unsafe {
            quad.shift_in(row_window(src, rows - 1, &group));
            quad.shift_in(row_window(src, 0, &group));
        }

        for row in 0..rows {
            let south = if row + 1 == rows { 0 } else { row + 1 };
            unsafe {
                quad.shift_in(row_window(src, south, &group));
                for (m, base) in group.base.iter().enumerate() {
                    *dst.add(row + base) = ctx.table.lookup(quad.key(m));
                }
            }
        }

        group_start += COLUMN_UNROLL;
    }
}

/// Run the full generation loop for one stripe.
///
/// `boards[0]` is the caller's inboard, `boards[1]` its outboard; the source
/// for generation k is `boards[k & 1]`, so the buffers' roles flip once per
/// generation without any pointer renaming. The barrier wait after every
/// generation, the last included, is mandatory (see module docs).
///
/// # Safety
/// Both boards must be valid for `rows * cols` bytes, stripes must partition
/// the columns disjointly, and every participating worker must share the same
/// barrier.
pub(crate) unsafe fn run_generations(ctx: &WorkerContext<'_>, boards: [SendPtr; 2]) {
    for generation in 0..ctx.generations {
        let parity = (generation & 1) as usize;
        let src = boards[parity].get() as *const u8;
        let dst = boards[parity ^ 1].get();
        unsafe { advance_stripe(src, dst, ctx) };
        ctx.barrier.wait();
    }
}
