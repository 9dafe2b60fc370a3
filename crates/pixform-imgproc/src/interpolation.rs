//! Pixel interpolation methods for geometric transformations.
//!
//! - **Nearest**: uses the nearest pixel value, output bytes are always
//!   copies of input bytes
//! - **Bilinear**: weighted mean of the four surrounding pixels

use pixform_image::Image;

/// Interpolation mode for resampling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    #[default]
    Nearest,
    /// Bilinear interpolation
    Bilinear,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// Coordinates outside the image are clamped to the border.
///
/// # Returns
///
/// The interpolated pixel, one value per channel.
pub fn interpolate_pixel<const C: usize>(
    image: &Image<u8, C>,
    u: f64,
    v: f64,
    interpolation: InterpolationMode,
) -> [u8; C] {
    match interpolation {
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
    }
}

fn nearest_neighbor_interpolation<const C: usize>(image: &Image<u8, C>, u: f64, v: f64) -> [u8; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let iu = (u.round().max(0.0) as usize).min(cols - 1);
    let iv = (v.round().max(0.0) as usize).min(rows - 1);

    let base = (iv * cols + iu) * C;

    let mut pixel = [0u8; C];
    pixel.copy_from_slice(&image.as_slice()[base..base + C]);
    pixel
}

fn bilinear_interpolation<const C: usize>(image: &Image<u8, C>, u: f64, v: f64) -> [u8; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let u = u.clamp(0.0, (cols - 1) as f64);
    let v = v.clamp(0.0, (rows - 1) as f64);

    let iu0 = u.floor() as usize;
    let iv0 = v.floor() as usize;
    let iu1 = (iu0 + 1).min(cols - 1);
    let iv1 = (iv0 + 1).min(rows - 1);

    let frac_u = u - iu0 as f64;
    let frac_v = v - iv0 as f64;

    let w00 = (1.0 - frac_u) * (1.0 - frac_v);
    let w01 = frac_u * (1.0 - frac_v);
    let w10 = (1.0 - frac_u) * frac_v;
    let w11 = frac_u * frac_v;

    let data = image.as_slice();
    let p00 = &data[(iv0 * cols + iu0) * C..][..C];
    let p01 = &data[(iv0 * cols + iu1) * C..][..C];
    let p10 = &data[(iv1 * cols + iu0) * C..][..C];
    let p11 = &data[(iv1 * cols + iu1) * C..][..C];

    let mut pixel = [0u8; C];
    for (k, out) in pixel.iter_mut().enumerate() {
        let val = p00[k] as f64 * w00
            + p01[k] as f64 * w01
            + p10[k] as f64 * w10
            + p11[k] as f64 * w11;
        *out = val.round().clamp(0.0, 255.0) as u8;
    }

    pixel
}
