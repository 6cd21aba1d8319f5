use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::BoxOptions;
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::region::Rect;
use crate::window::{WindowLayout, calculate_window_params};

/// Fill `out` (shape `remaining_rows` x `remaining_cols`) by evaluating
/// `cell(center_row, center_col)` for every window centre in `layout`.
///
/// One output row is one unit of work. Given a `pool`, rows are spread over its
/// threads; columns within a row stay sequential.
/// Cancellation is checked before each row starts, running rows finish.
pub(crate) fn sweep_rows<F>(
    layout: &WindowLayout,
    opts: &BoxOptions,
    pool: Option<&ThreadPool>,
    out: &mut Grid<f64>,
    cell: F,
) -> Result<()>
where
    F: Fn(usize, usize) -> Result<f64> + Sync,
{
    debug_assert_eq!((out.rows, out.cols), (layout.remaining_rows, layout.remaining_cols));
    let width = out.cols;

    let row_sweep = |out_row: usize, row: &mut [f64]| -> Result<()> {
        opts.check_cancelled()?;
        let i = layout.center_row(out_row);
        for (out_col, slot) in row.iter_mut().enumerate() {
            *slot = cell(i, layout.center_col(out_col))?;
        }
        Ok(())
    };

    match pool {
        Some(pool) => pool.install(|| {
            out.data
                .par_chunks_mut(width)
                .enumerate()
                .try_for_each(|(out_row, row)| row_sweep(out_row, row))
        }),
        None => out
            .data
            .chunks_mut(width)
            .enumerate()
            .try_for_each(|(out_row, row)| row_sweep(out_row, row)),
    }
}

#[cfg(test)]
thread_local! {
    pub(crate) static POOLS_BUILT: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Dedicated pool of `opts.parallelism` threads, or `None` for the sequential path.
/// Built once per call and shared by every pass of that call.
pub(crate) fn pool_for(opts: &BoxOptions) -> Result<Option<ThreadPool>> {
    if opts.parallelism <= 1 {
        return Ok(None);
    }
    #[cfg(test)]
    POOLS_BUILT.with(|n| n.set(n.get() + 1));
    ThreadPoolBuilder::new()
        .num_threads(opts.parallelism)
        .build()
        .map(Some)
        .map_err(|e| GridError::ThreadPool(e.to_string()))
}

/// Slide a `rows` x `cols` window over `grid` and reduce each window with
/// `reducer(center_row, center_col, window)`.
///
/// The window is copied out of `grid` for every centre, so the cost per output cell
/// is O(rows * cols). Prefer [`rect_boxed_sum`](crate::boxed::rect_boxed_sum) or
/// [`rect_boxed_avg`](crate::boxed::rect_boxed_avg) for plain sums and means.
pub fn rect_boxed_algo<T, F>(
    grid: &Grid<T>,
    rows: usize,
    cols: usize,
    reducer: F,
    opts: &BoxOptions,
) -> Result<Grid<f64>>
where
    T: Clone + Send + Sync,
    F: Fn(usize, usize, &Grid<T>) -> f64 + Sync,
{
    let layout = calculate_window_params(grid, rows, cols, opts.y_stride, opts.x_stride)?;
    opts.check_parallelism()?;

    let pool = pool_for(opts)?;
    let mut out = Grid::<f64>::new(layout.remaining_rows, layout.remaining_cols);
    sweep_rows(&layout, opts, pool.as_ref(), &mut out, |i, j| {
        let rect = Rect::from_center(i as isize, j as isize, rows, cols)?;
        let window = grid.get_rect(&rect)?;
        Ok(reducer(i, j, &window))
    })?;
    Ok(out)
}
