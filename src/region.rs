use serde::{Deserialize, Serialize};

use crate::error::{Result, check_odd};

/// Axis-aligned rectangle in grid coordinates. `top`/`left` may be negative
/// for rectangles that hang off the grid; extraction rejects those.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub top: isize,
    pub left: isize,
    pub height: usize,
    pub width: usize,
}

impl Rect {
    pub fn from_top_left(top: isize, left: isize, height: usize, width: usize) -> Self {
        Self {
            top,
            left,
            height,
            width,
        }
    }

    /// Rectangle centred on (`row`, `col`). Both sizes must be odd so the
    /// centre is a whole cell; odd also rules out 0.
    pub fn from_center(row: isize, col: isize, height: usize, width: usize) -> Result<Self> {
        check_odd("height", height)?;
        check_odd("width", width)?;

        let half_h = ((height - 1) / 2) as isize;
        let half_w = ((width - 1) / 2) as isize;
        Ok(Self::from_top_left(row - half_h, col - half_w, height, width))
    }

    /// Exclusive.
    #[inline]
    pub fn bottom(&self) -> isize {
        self.top + self.height as isize
    }

    /// Exclusive.
    #[inline]
    pub fn right(&self) -> isize {
        self.left + self.width as isize
    }

    /// Middle cell, rounding down for even sizes.
    pub fn center(&self) -> (isize, isize) {
        (
            self.top + (self.height / 2) as isize,
            self.left + (self.width / 2) as isize,
        )
    }

    pub fn is_height_even(&self) -> bool {
        self.height % 2 == 0
    }

    pub fn is_width_even(&self) -> bool {
        self.width % 2 == 0
    }

    pub fn is_even(&self) -> bool {
        self.is_height_even() && self.is_width_even()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn top_left_borders() {
        let r = Rect::from_top_left(0, 1, 10, 5);
        assert_eq!(r.top, 0);
        assert_eq!(r.left, 1);
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 10);
        assert_eq!((r.height, r.width), (10, 5));
    }

    #[test]
    fn center_borders() {
        let r = Rect::from_center(5, 10, 3, 7).unwrap();
        assert_eq!(r.top, 4);
        assert_eq!(r.left, 7);
        assert_eq!(r.bottom(), 7);
        assert_eq!(r.right(), 14);
        assert_eq!(r.center(), (5, 10));
    }

    #[test]
    fn single_cell_is_valid() {
        let r = Rect::from_center(2, 3, 1, 1).unwrap();
        assert_eq!((r.top, r.left, r.height, r.width), (2, 3, 1, 1));
    }

    #[test]
    fn center_may_hang_off_the_grid() {
        let r = Rect::from_center(0, 0, 5, 5).unwrap();
        assert_eq!((r.top, r.left), (-2, -2));
    }

    #[test]
    fn even_sizes_rejected() {
        assert!(matches!(
            Rect::from_center(5, 5, 4, 3),
            Err(GridError::EvenDimension { name: "height", value: 4 })
        ));
        assert!(matches!(
            Rect::from_center(5, 5, 3, 8),
            Err(GridError::EvenDimension { name: "width", value: 8 })
        ));
        assert!(matches!(
            Rect::from_center(5, 5, 0, 3),
            Err(GridError::EvenDimension { name: "height", .. })
        ));
        assert!(matches!(
            Rect::from_center(5, 5, 1, 0),
            Err(GridError::EvenDimension { name: "width", value: 0 })
        ));
    }

    #[test]
    fn parity_flags() {
        let r = Rect::from_top_left(5, 5, 5, 6);
        assert!(!r.is_height_even());
        assert!(r.is_width_even());
        assert!(!r.is_even());

        let r = Rect::from_top_left(5, 5, 6, 6);
        assert!(r.is_even());
    }
}
