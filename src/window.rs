use crate::error::{Axis, GridError, Result, check_odd, check_range};
use crate::grid::Grid;

/// Validated sliding-window geometry for one grid.
///
/// Window centres run from `row_offset` to `grid_rows - row_offset - 1` in steps of
/// `y_stride` (same for columns), and centre (i, j) lands in output cell
/// `((i - row_offset) / y_stride, (j - col_offset) / x_stride)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowLayout {
    pub rows: usize,
    pub cols: usize,
    pub y_stride: usize,
    pub x_stride: usize,
    pub row_offset: usize,
    pub col_offset: usize,
    /// Output grid rows.
    pub remaining_rows: usize,
    /// Output grid columns.
    pub remaining_cols: usize,
}

impl WindowLayout {
    /// Grid row of the window centre feeding output row `out_row`.
    #[inline]
    pub fn center_row(&self, out_row: usize) -> usize {
        self.row_offset + out_row * self.y_stride
    }

    /// Grid column of the window centre feeding output column `out_col`.
    #[inline]
    pub fn center_col(&self, out_col: usize) -> usize {
        self.col_offset + out_col * self.x_stride
    }
}

/// Validate a `rows` x `cols` window with the given strides against `grid` and
/// derive its offsets and output shape.
///
/// Checks run in a fixed order and the first violation wins:
/// parity, window extent, stride positivity, stride vs window, stride divisibility.
pub fn calculate_window_params<T>(
    grid: &Grid<T>,
    rows: usize,
    cols: usize,
    y_stride: usize,
    x_stride: usize,
) -> Result<WindowLayout> {
    check_odd("rows", rows)?;
    check_odd("columns", cols)?;

    check_range("columns", cols, Some(0), Some(grid.cols))?;
    check_range("rows", rows, Some(0), Some(grid.rows))?;

    check_range("x_stride", x_stride, Some(0), None)?;
    check_range("y_stride", y_stride, Some(0), None)?;

    if y_stride > rows {
        return Err(GridError::StrideExceedsWindow {
            axis: Axis::Rows,
            stride: y_stride,
            window: rows,
        });
    }
    if x_stride > cols {
        return Err(GridError::StrideExceedsWindow {
            axis: Axis::Columns,
            stride: x_stride,
            window: cols,
        });
    }

    let row_offset = (rows - 1) / 2;
    let col_offset = (cols - 1) / 2;

    // rows < grid.rows, so this cannot underflow
    let remaining_rows = grid.rows - 2 * row_offset;
    let remaining_cols = grid.cols - 2 * col_offset;

    if remaining_rows % y_stride != 0 {
        return Err(GridError::StrideNotDivisible {
            axis: Axis::Rows,
            remaining: remaining_rows,
            stride: y_stride,
        });
    }
    if remaining_cols % x_stride != 0 {
        return Err(GridError::StrideNotDivisible {
            axis: Axis::Columns,
            remaining: remaining_cols,
            stride: x_stride,
        });
    }

    Ok(WindowLayout {
        rows,
        cols,
        y_stride,
        x_stride,
        row_offset,
        col_offset,
        remaining_rows: remaining_rows / y_stride,
        remaining_cols: remaining_cols / x_stride,
    })
}
