use pixform_image::{Image, ImageError, ImageSize};

use crate::error::ImgprocError;
use crate::parallel;

/// Compute the size of an image decimated by square blocks.
///
/// Each dimension becomes `ceil(dim / block_size)`.
///
/// # Example
///
/// ```
/// use pixform_image::ImageSize;
/// use pixform_imgproc::decimate::decimated_size;
///
/// let size = decimated_size([10, 7].into(), 3).unwrap();
/// assert_eq!(size, ImageSize { width: 4, height: 3 });
/// ```
pub fn decimated_size(size: ImageSize, block_size: usize) -> Result<ImageSize, ImgprocError> {
    if block_size == 0 {
        return Err(ImgprocError::InvalidBlockSize(block_size));
    }
    Ok(ImageSize {
        width: size.width.div_ceil(block_size),
        height: size.height.div_ceil(block_size),
    })
}

/// Reduce the resolution of an image by averaging non-overlapping blocks.
///
/// The image is padded with zeros on the bottom and right so both
/// dimensions become multiples of `block_size`. Every output pixel is the
/// mean of one `block_size x block_size` tile, padding included, so tiles
/// along the bottom and right edges come out darker. The mean is truncated
/// toward zero and channels are averaged independently.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image, sized with [`decimated_size`].
/// * `block_size` - The side of the tiles, at least 1.
///
/// # Example
///
/// ```
/// use pixform_image::Image;
/// use pixform_imgproc::decimate::{block_average, decimated_size};
///
/// let image = Image::<u8, 1>::new([3, 1].into(), vec![10, 20, 90]).unwrap();
/// let size = decimated_size(image.size(), 2).unwrap();
/// let mut out = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// block_average(&image, &mut out, 2).unwrap();
/// assert_eq!(out.as_slice(), &[7, 22]);
/// ```
pub fn block_average<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    block_size: usize,
) -> Result<(), ImgprocError> {
    let expected = decimated_size(src.size(), block_size)?;
    if dst.size() != expected {
        return Err(ImageError::InvalidImageSize(
            expected.width,
            expected.height,
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    if block_size == 1 {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let (rows, cols) = (src.rows(), src.cols());
    let src_data = src.as_slice();
    // padding samples are zero, so they only show up in the divisor
    let area = block_size as u128 * block_size as u128;

    parallel::par_iter_rows_mut(dst, |block_row, dst_row| {
        let mut acc = vec![0u64; dst_row.len()];

        let y_start = block_row * block_size;
        let y_end = y_start.saturating_add(block_size).min(rows);
        for src_row in src_data[y_start * cols * C..y_end * cols * C].chunks_exact(cols * C) {
            for (x, pixel) in src_row.chunks_exact(C).enumerate() {
                let base = (x / block_size) * C;
                for (ch, &v) in pixel.iter().enumerate() {
                    acc[base + ch] += v as u64;
                }
            }
        }

        dst_row
            .iter_mut()
            .zip(acc)
            .for_each(|(out, sum)| *out = (sum as u128 / area) as u8);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<const C: usize>(
        src: &Image<u8, C>,
        block_size: usize,
    ) -> Result<Image<u8, C>, ImgprocError> {
        let size = decimated_size(src.size(), block_size)?;
        let mut dst = Image::from_size_val(size, 0)?;
        block_average(src, &mut dst, block_size)?;
        Ok(dst)
    }

    #[test]
    fn decimated_size_rounds_up() -> Result<(), ImgprocError> {
        assert_eq!(decimated_size([4, 4].into(), 2)?, [2, 2].into());
        assert_eq!(decimated_size([5, 4].into(), 2)?, [3, 2].into());
        assert_eq!(decimated_size([1, 1].into(), 7)?, [1, 1].into());
        assert_eq!(
            decimated_size([3, 3].into(), usize::MAX)?,
            [1, 1].into()
        );
        assert_eq!(
            decimated_size([3, 3].into(), 0),
            Err(ImgprocError::InvalidBlockSize(0))
        );
        Ok(())
    }

    #[test]
    fn block_average_exact_tiles() -> Result<(), ImgprocError> {
        let data = (0..16).map(|i| i * 10).collect();
        let image = Image::<u8, 1>::new([4, 4].into(), data)?;

        let out = run(&image, 2)?;
        assert_eq!(out.size(), [2, 2].into());
        // mean(0, 10, 40, 50) = 25
        assert_eq!(out.as_slice(), &[25, 45, 105, 125]);

        Ok(())
    }

    #[test]
    fn block_average_identity() -> Result<(), ImgprocError> {
        let image = Image::<u8, 3>::new([3, 2].into(), (0..18).collect())?;
        let out = run(&image, 1)?;
        assert_eq!(out, image);
        Ok(())
    }

    #[test]
    fn block_average_includes_padding() -> Result<(), ImgprocError> {
        let image = Image::<u8, 1>::from_size_val([5, 5].into(), 90)?;

        let out = run(&image, 3)?;
        assert_eq!(out.size(), [2, 2].into());
        // full tile, right tile 6/9, bottom tile 6/9, corner tile 4/9
        assert_eq!(out.as_slice(), &[90, 60, 60, 40]);

        Ok(())
    }

    #[test]
    fn block_average_truncates() -> Result<(), ImgprocError> {
        let image = Image::<u8, 1>::new([2, 1].into(), vec![0, 3])?;
        let out = run(&image, 2)?;
        // (0 + 3 + 0 + 0) / 4 = 0.75
        assert_eq!(out.as_slice(), &[0]);
        Ok(())
    }

    #[test]
    fn block_average_channels_are_independent() -> Result<(), ImgprocError> {
        let data = [[200, 0, 40], [100, 0, 40], [0, 255, 40], [100, 255, 40]]
            .into_iter()
            .flatten()
            .collect();
        let image = Image::<u8, 3>::new([2, 2].into(), data)?;

        let out = run(&image, 2)?;
        assert_eq!(out.as_slice(), &[100, 127, 40]);

        Ok(())
    }

    #[test]
    fn block_average_block_larger_than_image() -> Result<(), ImgprocError> {
        let image = Image::<u8, 1>::from_size_val([2, 2].into(), 255)?;
        let out = run(&image, 4)?;
        // 4 * 255 / 16
        assert_eq!(out.as_slice(), &[63]);
        Ok(())
    }

    #[test]
    fn block_average_wrong_destination() -> Result<(), ImgprocError> {
        let image = Image::<u8, 1>::from_size_val([4, 4].into(), 0)?;
        let mut dst = Image::<u8, 1>::from_size_val([4, 4].into(), 0)?;

        let res = block_average(&image, &mut dst, 2);
        assert_eq!(
            res,
            Err(ImgprocError::Image(ImageError::InvalidImageSize(2, 2, 4, 4)))
        );

        Ok(())
    }
}
