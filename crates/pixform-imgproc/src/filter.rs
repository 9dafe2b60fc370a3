//! Filter operations
//!
//! Neighborhood averaging backed by a summed-area table so the cost per
//! pixel does not depend on the window size.

use pixform_image::{Image, ImageError};

use crate::error::ImgprocError;
use crate::parallel;

/// Summed-area table of an 8-bit image, one plane per channel.
///
/// Entry `(x, y, c)` holds the sum of channel `c` over every pixel strictly
/// above and to the left of `(x, y)`, so the table is one row and one
/// column larger than the image.
pub struct IntegralImage<const C: usize> {
    data: Vec<u64>,
    stride: usize,
}

impl<const C: usize> IntegralImage<C> {
    /// Build the table from an image.
    pub fn new(src: &Image<u8, C>) -> Self {
        let (rows, cols) = (src.rows(), src.cols());
        let stride = (cols + 1) * C;
        let mut data = vec![0u64; (rows + 1) * stride];

        for (y, src_row) in src.as_slice().chunks_exact(cols * C).enumerate() {
            let mut row_acc = [0u64; C];
            for (x, pixel) in src_row.chunks_exact(C).enumerate() {
                for ch in 0..C {
                    row_acc[ch] += pixel[ch] as u64;
                    let above = data[y * stride + (x + 1) * C + ch];
                    data[(y + 1) * stride + (x + 1) * C + ch] = above + row_acc[ch];
                }
            }
        }

        Self { data, stride }
    }

    /// Sum of channel `ch` over the half-open window `[x0, x1) x [y0, y1)`.
    pub fn window_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize, ch: usize) -> u64 {
        let at = |x: usize, y: usize| self.data[y * self.stride + x * C + ch];
        at(x1, y1) + at(x0, y0) - at(x0, y1) - at(x1, y0)
    }
}

/// Offsets covered by a centered window of side `size`: `size / 2` samples
/// before the center and `(size - 1) / 2` after it.
fn window_extent(size: usize) -> (usize, usize) {
    (size / 2, (size - 1) / 2)
}

/// Replace each sample by the mean of a square window centered on it.
///
/// The window is truncated at the image border and the mean is taken over
/// the samples that remain, rounded to the nearest integer with halves
/// rounding up. Channels are averaged independently.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `neighborhood_size` - The side of the averaging window, at least 1.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
///
/// # Example
///
/// ```
/// use pixform_image::Image;
/// use pixform_imgproc::filter::box_average;
///
/// let image = Image::<u8, 1>::new([3, 1].into(), vec![0, 30, 90]).unwrap();
/// let mut out = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// box_average(&image, &mut out, 3).unwrap();
/// assert_eq!(out.as_slice(), &[15, 40, 60]);
/// ```
pub fn box_average<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    neighborhood_size: usize,
) -> Result<(), ImgprocError> {
    if neighborhood_size == 0 {
        return Err(ImgprocError::InvalidNeighborhoodSize(neighborhood_size));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    if neighborhood_size == 1 {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let integral = IntegralImage::new(src);
    let (rows, cols) = (src.rows(), src.cols());
    let (before, after) = window_extent(neighborhood_size);

    parallel::par_iter_rows_mut(dst, |y, dst_row| {
        let y0 = y.saturating_sub(before);
        let y1 = (y + after).min(rows - 1) + 1;
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let x0 = x.saturating_sub(before);
            let x1 = (x + after).min(cols - 1) + 1;
            let count = ((y1 - y0) * (x1 - x0)) as u64;
            for (ch, out) in dst_pixel.iter_mut().enumerate() {
                let sum = integral.window_sum(x0, y0, x1, y1, ch);
                *out = ((sum + count / 2) / count) as u8;
            }
        }
    });

    Ok(())
}
