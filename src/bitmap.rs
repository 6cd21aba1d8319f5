use image::{GrayImage, Luma, Rgba, RgbaImage};
use rayon::prelude::*;

use crate::grid::Grid;

/// Grey-scale rendering of `selector` over the grid: larger values are darker.
/// Grey level is `255 - value * 255 / span`, where `span` covers `|max|` plus `|min|`
/// when the minimum is negative.
pub fn to_luma<T: Sync>(grid: &Grid<T>, selector: impl Fn(&T) -> f64 + Sync) -> GrayImage {
    let w = grid.cols;
    let mut img = GrayImage::from_pixel(w as u32, grid.rows as u32, Luma([255]));
    let (Some(lo), Some(hi)) = (grid.min(&selector), grid.max(&selector)) else {
        return img;
    };

    let span = hi.abs() + if lo < 0.0 { lo.abs() } else { 0.0 };
    let delta = if span > 0.0 { 255.0 / span } else { 0.0 };

    img.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, px) in row.iter_mut().enumerate() {
            let v = 255.0 - delta * selector(grid.get(y, x));
            *px = v.clamp(0.0, 255.0) as u8;
        }
    });
    img
}

/// Colour every cell with `color(row, col, cell)`.
pub fn to_rgba<T: Sync>(
    grid: &Grid<T>,
    color: impl Fn(usize, usize, &T) -> Rgba<u8> + Sync,
) -> RgbaImage {
    let w = grid.cols;
    let mut img = RgbaImage::new(w as u32, grid.rows as u32);
    if w > 0 {
        img.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
            for x in 0..w {
                let Rgba(c) = color(y, x, grid.get(y, x));
                row[x * 4..x * 4 + 4].copy_from_slice(&c);
            }
        });
    }
    img
}

/// Read an image into a grid, converting each pixel with `convert(row, col, pixel)`.
pub fn from_rgba<T>(img: &RgbaImage, mut convert: impl FnMut(usize, usize, Rgba<u8>) -> T) -> Grid<T> {
    let (w, h) = img.dimensions();
    Grid::from_fn_indexed(h as usize, w as usize, |r, c| {
        convert(r, c, *img.get_pixel(c as u32, r as u32))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn luma_size_follows_grid() {
        let g = Grid::filled(10, 15, 1);
        let img = to_luma(&g, |&v| v as f64);
        assert_eq!(img.height(), 10);
        assert_eq!(img.width(), 15);
    }

    #[test]
    fn luma_darkens_with_value() {
        let g = Grid::from_rows(&[[0.0, 5.0, 10.0]]).unwrap();
        let img = to_luma(&g, |v| *v);
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        assert_eq!(img.get_pixel(2, 0).0, [0]);
        assert!(img.get_pixel(1, 0).0[0] > 0 && img.get_pixel(1, 0).0[0] < 255);
    }

    #[test]
    fn luma_of_all_zero_grid_is_white() {
        let g = Grid::<f64>::new(2, 2);
        let img = to_luma(&g, |v| *v);
        assert!(img.pixels().all(|p| p.0 == [255]));
    }

    #[test]
    fn empty_grids_render_empty_images() {
        let g = Grid::<f64>::new(0, 0);
        assert_eq!(to_luma(&g, |v| *v).dimensions(), (0, 0));
        assert_eq!(to_rgba(&g, |_, _, _| BLACK).dimensions(), (0, 0));

        let g = Grid::<f64>::new(3, 0);
        assert_eq!(to_luma(&g, |v| *v).dimensions(), (0, 3));
        assert_eq!(to_rgba(&g, |_, _, _| RED).dimensions(), (0, 3));
    }

    #[test]
    fn rgba_by_value() {
        let g = Grid::from_fn_indexed(10, 15, |row, _| row);
        let img = to_rgba(&g, |_, _, &v| if v > 5 { RED } else { BLACK });
        assert_eq!(*img.get_pixel(0, 0), BLACK);
        assert_eq!(*img.get_pixel(0, 6), RED);
    }

    #[test]
    fn rgba_by_position() {
        let g = Grid::filled(10, 15, 1);
        let img = to_rgba(&g, |_, c, _| if c > 5 { RED } else { BLACK });
        assert_eq!(*img.get_pixel(0, 0), BLACK);
        assert_eq!(*img.get_pixel(6, 0), RED);
    }

    #[test]
    fn rgba_round_trip_through_grid() {
        let g = Grid::from_fn_indexed(3, 4, |r, c| (r * 4 + c) as u8);
        let img = to_rgba(&g, |_, _, &v| Rgba([v, v, v, 255]));
        let back = from_rgba(&img, |_, _, px| px.0[0]);
        assert_eq!(back, g);
    }
}
