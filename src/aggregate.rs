use crate::grid::Grid;

/// Whole-grid reductions over a scalar projection of each cell.
impl<T> Grid<T> {
    pub fn sum(&self, selector: impl Fn(&T) -> f64) -> f64 {
        self.data.iter().map(selector).sum()
    }

    /// `None` for an empty grid.
    pub fn average(&self, selector: impl Fn(&T) -> f64) -> Option<f64> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.sum(selector) / self.data.len() as f64)
    }

    pub fn min(&self, selector: impl Fn(&T) -> f64) -> Option<f64> {
        self.data.iter().map(selector).reduce(f64::min)
    }

    pub fn max(&self, selector: impl Fn(&T) -> f64) -> Option<f64> {
        self.data.iter().map(selector).reduce(f64::max)
    }

    /// Run `f(cell, row, col)` on every cell, row-major.
    pub fn for_each_cell(&mut self, mut f: impl FnMut(&mut T, usize, usize)) {
        let cols = self.cols;
        for (i, cell) in self.data.iter_mut().enumerate() {
            f(cell, i / cols, i % cols);
        }
    }
}
