pub mod aggregate;
pub mod bitmap;
pub mod boxed;
pub mod config;
pub mod error;
pub mod grid;
pub mod region;
pub mod rng;
pub mod sweep;
pub mod window;

use std::time::Instant;

pub use boxed::{rect_boxed_avg, rect_boxed_sum, row_sum_cache};
pub use config::{BoxOptions, CancelToken, Params};
pub use error::{Axis, GridError, Result};
pub use grid::Grid;
pub use region::Rect;
pub use sweep::rect_boxed_algo;
pub use window::{WindowLayout, calculate_window_params};

use rng::Rng;

/// Output of one demo run.
pub struct Report {
    pub source: Grid<f64>,
    pub naive_avg: Grid<f64>,
    pub cached_avg: Grid<f64>,
    pub cached_sum: Grid<f64>,
    /// Largest |naive - cached| over all average cells.
    pub max_abs_diff: f64,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Random integer-valued grid, reproducible from `seed`.
pub fn random_grid(rows: usize, cols: usize, seed: u64, lo: i64, hi: i64) -> Grid<f64> {
    let mut rng = Rng::new(seed);
    Grid::from_fn(rows, cols, || rng.range_i64(lo, hi) as f64)
}

/// Populate a grid, then box-average it both the naive way and through the row cache.
pub fn run(params: &Params) -> Result<(Report, Vec<Timing>)> {
    let mut timings = Vec::new();
    let total_start = Instant::now();
    let opts = params.box_options();

    // 1. Source grid
    let t = Instant::now();
    let source = random_grid(
        params.rows,
        params.cols,
        params.seed,
        params.min_value,
        params.max_value,
    );
    timings.push(Timing {
        name: "populate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Naive windowed mean (copies every window)
    let t = Instant::now();
    let naive_avg = rect_boxed_algo(
        &source,
        params.box_rows,
        params.box_cols,
        |_, _, w| w.average(|v| *v).unwrap_or(0.0),
        &opts,
    )?;
    timings.push(Timing {
        name: "boxed_algo_avg",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Cached mean
    let t = Instant::now();
    let cached_avg = rect_boxed_avg(&source, params.box_rows, params.box_cols, |v| *v, &opts)?;
    timings.push(Timing {
        name: "boxed_avg",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 4. Cached sum
    let t = Instant::now();
    let cached_sum = rect_boxed_sum(&source, params.box_rows, params.box_cols, |v| *v, &opts)?;
    timings.push(Timing {
        name: "boxed_sum",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let max_abs_diff = naive_avg
        .flat()
        .zip(cached_avg.flat())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    let report = Report {
        source,
        naive_avg,
        cached_avg,
        cached_sum,
        max_abs_diff,
    };

    Ok((report, timings))
}
