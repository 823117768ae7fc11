//! Orchestrator: validation, stripe partitioning, worker pool, result parity.

use std::sync::Barrier;

use thiserror::Error;

use super::table::RuleTable;
use super::worker::{COLUMN_UNROLL, SendPtr, WorkerContext, run_generations};
use crate::sequential::sequential_game_of_life;

/// Matches the reference partition the engine was tuned against.
const DEFAULT_WORKER_COUNT: usize = 4;
/// Below this side length, parallel overhead dominates; delegate to the
/// sequential reference.
const PARALLEL_MIN_SIDE: usize = 32;

/// A dimension precondition the engine refuses to run with.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum InvalidDimensions {
    #[error("board must be square, got {rows} rows by {cols} columns")]
    NotSquare { rows: usize, cols: usize },
    #[error("board side must be a power of two and at least 1, got {side}")]
    NotPowerOfTwo { side: usize },
    #[error("buffer holds {len} cells, expected {rows} x {cols}")]
    BufferMismatch { len: usize, rows: usize, cols: usize },
    #[error(
        "{cols} columns cannot be split into {workers} stripes of width divisible by {unroll}"
    )]
    IndivisibleStripes {
        cols: usize,
        workers: usize,
        unroll: usize,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(#[from] InvalidDimensions),
    #[error("failed to allocate worker pool: {0}")]
    ResourceExhaustion(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a [`StripedLife`] engine instance.
#[derive(Clone, Debug, Default)]
pub struct StripedLifeConfig {
    /// Number of workers, one column stripe each. `None` means the default
    /// of 4. Fixed for the engine's lifetime.
    pub worker_count: Option<usize>,
}

impl StripedLifeConfig {
    /// Set an explicit worker count.
    pub fn worker_count(mut self, n: usize) -> Self {
        self.worker_count = Some(n.max(1));
        self
    }
}

/// Stripe-parallel Game of Life engine.
///
/// Owns a fixed-size worker pool; each call advances a caller-owned board
/// pair in place and returns the buffer holding the final state.
pub struct StripedLife {
    pool: rayon::ThreadPool,
    worker_count: usize,
}

impl StripedLife {
    pub fn new() -> Result<Self, Error> {
        Self::with_config(StripedLifeConfig::default())
    }

    /// Create an engine with explicit configuration. Pool allocation failure
    /// is reported, never retried.
    pub fn with_config(config: StripedLifeConfig) -> Result<Self, Error> {
        let worker_count = config.worker_count.unwrap_or(DEFAULT_WORKER_COUNT).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("stripe-life-{i}"))
            .build()?;
        Ok(Self { pool, worker_count })
    }

    /// Advance `inboard` by `gens_max` generations on a toroidal `rows` x
    /// `cols` board, double-buffering against `outboard`.
    ///
    /// Both buffers are column-major, one byte per cell. Returns the buffer
    /// holding the final state: `outboard` iff `gens_max` is odd, since the
    /// buffers' roles flip once per generation. The other buffer's contents
    /// are unspecified afterwards. The call blocks until every generation is
    /// complete; there are no partial results.
    pub fn compute_generations<'a>(
        &self,
        outboard: &'a mut [u8],
        inboard: &'a mut [u8],
        rows: usize,
        cols: usize,
        gens_max: u64,
    ) -> Result<&'a mut [u8], Error> {
        validate_board(rows, cols, outboard.len(), inboard.len())?;

        if rows < PARALLEL_MIN_SIDE {
            tracing::debug!(rows, cols, "board below parallel threshold, running sequential");
            return Ok(sequential_game_of_life(outboard, inboard, rows, cols, gens_max));
        }

        let stripe_width = stripe_width(cols, self.worker_count)?;
        tracing::debug!(
            rows,
            cols,
            gens_max,
            workers = self.worker_count,
            stripe_width,
            "advancing board with striped workers"
        );

        let table = RuleTable::new();
        let barrier = Barrier::new(self.worker_count);
        let boards = [
            SendPtr::new(inboard.as_mut_ptr()),
            SendPtr::new(outboard.as_mut_ptr()),
        ];

        self.pool.broadcast(|broadcast| {
            let start = broadcast.index() * stripe_width;
            let ctx = WorkerContext {
                stripe: start..start + stripe_width,
                rows,
                cols,
                generations: gens_max,
                table: &table,
                barrier: &barrier,
            };
            // Safety: the stripes partition the columns disjointly, both
            // boards are rows * cols bytes (validated above), and all workers
            // share `barrier`.
            unsafe { run_generations(&ctx, boards) };
        });

        if gens_max % 2 == 1 {
            Ok(outboard)
        } else {
            Ok(inboard)
        }
    }
}

/// Advance a board with a default-configuration engine.
pub fn game_of_life<'a>(
    outboard: &'a mut [u8],
    inboard: &'a mut [u8],
    rows: usize,
    cols: usize,
    gens_max: u64,
) -> Result<&'a mut [u8], Error> {
    StripedLife::new()?.compute_generations(outboard, inboard, rows, cols, gens_max)
}

fn validate_board(
    rows: usize,
    cols: usize,
    out_len: usize,
    in_len: usize,
) -> Result<(), InvalidDimensions> {
    if rows != cols {
        return Err(InvalidDimensions::NotSquare { rows, cols });
    }
    if !rows.is_power_of_two() {
        return Err(InvalidDimensions::NotPowerOfTwo { side: rows });
    }
    for len in [out_len, in_len] {
        if len != rows * cols {
            return Err(InvalidDimensions::BufferMismatch { len, rows, cols });
        }
    }
    Ok(())
}

fn stripe_width(cols: usize, workers: usize) -> Result<usize, InvalidDimensions> {
    let indivisible = InvalidDimensions::IndivisibleStripes {
        cols,
        workers,
        unroll: COLUMN_UNROLL,
    };
    if cols % workers != 0 {
        return Err(indivisible);
    }
    let width = cols / workers;
    if width % COLUMN_UNROLL != 0 {
        return Err(indivisible);
    }
    Ok(width)
}
