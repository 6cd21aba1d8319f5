use rayon::ThreadPool;
use rayon::prelude::*;

use crate::config::BoxOptions;
use crate::error::Result;
use crate::grid::Grid;
use crate::sweep::{pool_for, sweep_rows};
use crate::window::calculate_window_params;

/// Vertical partial sums: cell (i, j) holds the sum of `selector` over rows
/// `i - row_offset ..= i + row_offset` in column `j`.
///
/// Only rows in `row_offset .. rows - row_offset` are filled; the border rows stay 0.
/// Built once per call so every horizontal window position can reuse it.
pub fn row_sum_cache<T, S>(
    grid: &Grid<T>,
    row_offset: usize,
    selector: &S,
    opts: &BoxOptions,
) -> Result<Grid<f64>>
where
    T: Sync,
    S: Fn(&T) -> f64 + Sync,
{
    let pool = pool_for(opts)?;
    fill_row_sum_cache(grid, row_offset, selector, opts, pool.as_ref())
}

fn fill_row_sum_cache<T, S>(
    grid: &Grid<T>,
    row_offset: usize,
    selector: &S,
    opts: &BoxOptions,
    pool: Option<&ThreadPool>,
) -> Result<Grid<f64>>
where
    T: Sync,
    S: Fn(&T) -> f64 + Sync,
{
    let rows = grid.rows;
    let cols = grid.cols;
    let mut cache = Grid::<f64>::new(rows, cols);
    if cols == 0 || rows < 2 * row_offset + 1 {
        return Ok(cache);
    }

    let fill_row = |i: usize, row: &mut [f64]| -> Result<()> {
        if i < row_offset || i >= rows - row_offset {
            return Ok(());
        }
        opts.check_cancelled()?;
        for (j, slot) in row.iter_mut().enumerate() {
            for r in i - row_offset..=i + row_offset {
                *slot += selector(grid.get(r, j));
            }
        }
        Ok(())
    };

    match pool {
        Some(pool) => pool.install(|| {
            cache
                .data
                .par_chunks_mut(cols)
                .enumerate()
                .try_for_each(|(i, row)| fill_row(i, row))
        })?,
        None => cache
            .data
            .chunks_mut(cols)
            .enumerate()
            .try_for_each(|(i, row)| fill_row(i, row))?,
    }
    Ok(cache)
}

/// Shared body of the cached reductions: returns the raw window sums.
fn cached_box_sums<T, S>(
    grid: &Grid<T>,
    rows: usize,
    cols: usize,
    selector: S,
    opts: &BoxOptions,
) -> Result<Grid<f64>>
where
    T: Sync,
    S: Fn(&T) -> f64 + Sync,
{
    let layout = calculate_window_params(grid, rows, cols, opts.y_stride, opts.x_stride)?;
    opts.check_parallelism()?;

    let pool = pool_for(opts)?;
    let cache = fill_row_sum_cache(grid, layout.row_offset, &selector, opts, pool.as_ref())?;
    let col_offset = layout.col_offset;

    let mut out = Grid::<f64>::new(layout.remaining_rows, layout.remaining_cols);
    sweep_rows(&layout, opts, pool.as_ref(), &mut out, |i, j| {
        let cached = &cache.row(i)[j - col_offset..=j + col_offset];
        let mut sum = 0.0;
        for v in cached {
            sum += v;
        }
        Ok(sum)
    })?;
    Ok(out)
}

/// Sum of `selector` over every `rows` x `cols` window.
///
/// Same output as [`rect_boxed_algo`](crate::sweep::rect_boxed_algo) with a summing
/// reducer, at O(cols) per output cell after an O(grid * rows) cache build.
pub fn rect_boxed_sum<T, S>(
    grid: &Grid<T>,
    rows: usize,
    cols: usize,
    selector: S,
    opts: &BoxOptions,
) -> Result<Grid<f64>>
where
    T: Sync,
    S: Fn(&T) -> f64 + Sync,
{
    cached_box_sums(grid, rows, cols, selector, opts)
}

/// Mean of `selector` over every `rows` x `cols` window.
pub fn rect_boxed_avg<T, S>(
    grid: &Grid<T>,
    rows: usize,
    cols: usize,
    selector: S,
    opts: &BoxOptions,
) -> Result<Grid<f64>>
where
    T: Sync,
    S: Fn(&T) -> f64 + Sync,
{
    let mut out = cached_box_sums(grid, rows, cols, selector, opts)?;
    let space = (rows * cols) as f64;
    for v in out.data.iter_mut() {
        *v /= space;
    }
    Ok(out)
}
