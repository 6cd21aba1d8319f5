use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::region::Rect;

/// Row-major flat grid. No per-cell objects.
/// Cells that may be absent are modelled as `Grid<Option<T>>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub rows: usize,
    pub cols: usize,
}

impl<T: Clone + Default> Grid<T> {
    /// Every cell starts as `T::default()` (`None` for optional cells).
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::default())
    }
}

impl<T: Clone> Grid<T> {
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Copy a 2-D literal. All rows must have the same length.
    pub fn from_rows<R: AsRef<[T]>>(src: &[R]) -> Result<Self> {
        let rows = src.len();
        let cols = src.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows * cols);
        for row in src {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::SizeMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, rows, cols })
    }

    /// Deep copy; the source is left untouched.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            data.extend(self.col(c).cloned());
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Copy the cells covered by `rect`. The whole rectangle must lie inside the grid.
    pub fn get_rect(&self, rect: &Rect) -> Result<Self> {
        if rect.top < 0 || rect.left < 0 {
            return Err(self.out_of_bounds(rect.top, rect.left));
        }
        if rect.bottom() > self.rows as isize || rect.right() > self.cols as isize {
            return Err(self.out_of_bounds(rect.bottom() - 1, rect.right() - 1));
        }

        let top = rect.top as usize;
        let left = rect.left as usize;
        if rect.width == 0 {
            return Ok(Self {
                data: Vec::new(),
                rows: rect.height,
                cols: 0,
            });
        }
        let mut data = Vec::with_capacity(rect.height * rect.width);
        for r in top..top + rect.height {
            let start = self.idx(r, left);
            data.extend_from_slice(&self.data[start..start + rect.width]);
        }
        Ok(Self {
            data,
            rows: rect.height,
            cols: rect.width,
        })
    }

    /// Copy an odd-sized rectangle centred on (`row`, `col`).
    pub fn get_rect_centered(
        &self,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> Result<Self> {
        let rect = Rect::from_center(row as isize, col as isize, height, width)?;
        self.get_rect(&rect)
    }

    /// Square `size` x `size` box centred on (`row`, `col`).
    pub fn get_box(&self, row: usize, col: usize, size: usize) -> Result<Self> {
        self.get_rect_centered(row, col, size, size)
    }

    /// Surround the grid with `filler`. Sides are given clockwise from the top.
    pub fn pad(&self, top: usize, right: usize, bottom: usize, left: usize, filler: T) -> Self {
        let rows = self.rows + top + bottom;
        let cols = self.cols + left + right;
        let mut out = Self::filled(rows, cols, filler);
        if self.cols == 0 {
            return out;
        }
        for r in 0..self.rows {
            let dst = out.idx(r + top, left);
            out.data[dst..dst + self.cols].clone_from_slice(self.row(r));
        }
        out
    }

    pub fn pad_uniform(&self, n: usize, filler: T) -> Self {
        self.pad(n, n, n, n, filler)
    }
}

impl<T> Grid<T> {
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Call `f` once per cell, row-major.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut() -> T) -> Self {
        Self::from_fn_indexed(rows, cols, |_, _| f())
    }

    /// Call `f(row, col)` once per cell, row-major.
    pub fn from_fn_indexed(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { data, rows, cols }
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        let i = self.idx(row, col);
        &mut self.data[i]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: T) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    /// Checked access with signed coordinates.
    pub fn try_get(&self, row: isize, col: isize) -> Result<&T> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return Err(self.out_of_bounds(row, col));
        }
        Ok(self.get(row as usize, col as usize))
    }

    pub fn above(&self, row: usize, col: usize) -> Result<&T> {
        self.try_get(row as isize - 1, col as isize)
    }

    pub fn below(&self, row: usize, col: usize) -> Result<&T> {
        self.try_get(row as isize + 1, col as isize)
    }

    pub fn left(&self, row: usize, col: usize) -> Result<&T> {
        self.try_get(row as isize, col as isize - 1)
    }

    pub fn right(&self, row: usize, col: usize) -> Result<&T> {
        self.try_get(row as isize, col as isize + 1)
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn col(&self, col: usize) -> impl Iterator<Item = &T> {
        debug_assert!(col < self.cols);
        self.data.iter().skip(col).step_by(self.cols.max(1))
    }

    /// Row-major view of every cell.
    pub fn flat(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn out_of_bounds(&self, row: isize, col: isize) -> GridError {
        GridError::IndexOutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        self.get(row, col)
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        self.get_mut(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_by_three() -> Grid<i32> {
        Grid::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap()
    }

    #[test]
    fn indexed_access() {
        let g = three_by_three();
        assert_eq!(g[(0, 0)], 1);
        assert_eq!(g[(0, 2)], 3);
        assert_eq!(*g.get(1, 1), 5);
        assert_eq!(g[(2, 2)], 9);
    }

    #[test]
    fn neighbours() {
        let g = three_by_three();
        assert_eq!(g.above(1, 1), Ok(&2));
        assert_eq!(g.below(1, 1), Ok(&8));
        assert_eq!(g.left(1, 1), Ok(&4));
        assert_eq!(g.right(1, 1), Ok(&6));
    }

    #[test]
    fn neighbours_past_the_edge() {
        let g = three_by_three();
        assert!(matches!(g.above(0, 0), Err(GridError::IndexOutOfBounds { row: -1, .. })));
        assert!(matches!(g.below(2, 2), Err(GridError::IndexOutOfBounds { row: 3, .. })));
        assert!(matches!(g.left(0, 0), Err(GridError::IndexOutOfBounds { col: -1, .. })));
        assert!(matches!(g.right(2, 2), Err(GridError::IndexOutOfBounds { col: 3, .. })));
    }

    #[test]
    fn row_col_and_flat_views() {
        let g = three_by_three();
        assert_eq!(g.row(1), &[4, 5, 6]);
        assert_eq!(g.col(1).copied().collect::<Vec<_>>(), vec![2, 5, 8]);
        assert_eq!(
            g.flat().copied().collect::<Vec<_>>(),
            (1..=9).collect::<Vec<_>>()
        );
    }

    #[test]
    fn transpose_swaps_axes() {
        let g = three_by_three().transpose();
        assert_eq!(
            g.flat().copied().collect::<Vec<_>>(),
            vec![1, 4, 7, 2, 5, 8, 3, 6, 9]
        );

        let wide = Grid::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap().transpose();
        assert_eq!((wide.rows, wide.cols), (3, 2));
        assert_eq!(wide.row(2), &[3, 6]);
    }

    #[test]
    fn duplicate_is_independent() {
        let g = three_by_three();
        let mut d = g.duplicate();
        assert_eq!(g, d);
        d.set(0, 0, 42);
        assert_eq!(g[(0, 0)], 1);
        assert_ne!(g, d);
    }

    #[test]
    fn ragged_literal_rejected() {
        let rows: Vec<Vec<i32>> = vec![vec![1, 2], vec![3]];
        assert_eq!(
            Grid::from_rows(&rows),
            Err(GridError::SizeMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(Grid::from_vec(2, 2, vec![1, 2, 3, 4]).is_ok());
        assert_eq!(
            Grid::from_vec(2, 2, vec![1, 2, 3]),
            Err(GridError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn square_check() {
        assert!(!Grid::<i32>::new(6, 5).is_square());
        assert!(Grid::<i32>::new(5, 5).is_square());
    }
}
