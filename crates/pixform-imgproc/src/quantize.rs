use pixform_image::{Image, ImageError};

use crate::error::ImgprocError;
use crate::parallel;

/// Validate a number of quantization levels and return the bin width.
///
/// The levels must be a power of two in `[2, 256]`. The bin width is
/// `255 / (levels - 1)` with integer division, so 256 levels give a step of
/// one and 2 levels a step of 255.
///
/// # Example
///
/// ```
/// use pixform_imgproc::quantize::quantization_step;
///
/// assert_eq!(quantization_step(4).unwrap(), 85);
/// assert_eq!(quantization_step(256).unwrap(), 1);
/// assert!(quantization_step(5).is_err());
/// ```
pub fn quantization_step(levels: usize) -> Result<u8, ImgprocError> {
    if !(2..=256).contains(&levels) || !levels.is_power_of_two() {
        return Err(ImgprocError::InvalidQuantizationLevels(levels));
    }
    Ok((255 / (levels - 1)) as u8)
}

/// Reduce the number of intensity levels of a grayscale image.
///
/// Each sample `v` becomes `(v / step) * step`, so values only ever round
/// down and the output holds at most `levels` distinct values.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output grayscale image.
/// * `levels` - The number of output levels, a power of two in `[2, 256]`.
///
/// PRECONDITION: `src` and `dst` must have the same size.
///
/// # Example
///
/// ```
/// use pixform_image::Image;
/// use pixform_imgproc::quantize::quantize_levels;
///
/// let image = Image::<u8, 1>::new([4, 1].into(), vec![0, 84, 85, 255]).unwrap();
/// let mut out = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// quantize_levels(&image, &mut out, 4).unwrap();
/// assert_eq!(out.as_slice(), &[0, 0, 85, 255]);
/// ```
pub fn quantize_levels(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    levels: usize,
) -> Result<(), ImgprocError> {
    let step = quantization_step(levels)?;

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    parallel::par_iter_rows_val(src, dst, |&v, out| {
        *out = (v / step) * step;
    });

    Ok(())
}
