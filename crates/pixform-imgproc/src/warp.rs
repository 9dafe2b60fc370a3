use pixform_image::{Image, ImageError, ImageSize};

use crate::error::ImgprocError;
use crate::interpolation::{interpolate_pixel, InterpolationMode};
use crate::parallel;

// Slack used when sizing the expanded canvas so exact quarter turns do not
// gain a row or column from floating point noise.
const CANVAS_EPS: f64 = 1e-6;

/// How the output canvas of a rotation is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CanvasPolicy {
    /// Grow the canvas so no rotated content is clipped.
    #[default]
    Expand,
    /// Keep the input size and clip the rotated content.
    Crop,
}

/// Options for rotation operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RotateOptions {
    /// Sampling applied to the source image.
    pub interpolation: InterpolationMode,
    /// Sample value written where the canvas has no source pixel.
    pub fill: u8,
    /// Output canvas sizing.
    pub canvas: CanvasPolicy,
}

impl RotateOptions {
    /// Set the interpolation mode.
    pub fn interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set the fill value.
    pub fn fill(mut self, fill: u8) -> Self {
        self.fill = fill;
        self
    }

    /// Set the canvas policy.
    pub fn canvas(mut self, canvas: CanvasPolicy) -> Self {
        self.canvas = canvas;
        self
    }
}

/// Inverts a 2x3 affine transformation matrix.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix. A singular matrix yields
/// the zero matrix.
pub fn invert_affine_transform(m: &[f64; 6]) -> [f64; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// With the y axis pointing down, a positive angle turns the image
/// counter-clockwise as displayed.
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use pixform_imgproc::warp::get_rotation_matrix2d;
///
/// let m = get_rotation_matrix2d((0.0, 0.0), 90.0, 1.0);
/// assert!((m[1] - 1.0).abs() < 1e-12);
/// assert!((m[3] + 1.0).abs() < 1e-12);
/// ```
pub fn get_rotation_matrix2d(center: (f64, f64), angle: f64, scale: f64) -> [f64; 6] {
    let angle = angle.to_radians();
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Applies an affine transformation to a point.
fn transform_point(x: f64, y: f64, m: &[f64; 6]) -> (f64, f64) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Size of the smallest canvas that holds an image rotated by `angle` degrees.
///
/// Each side keeps the parity of the source side it is closest to in
/// orientation, so the canvas center lands on the same sub-pixel offset as
/// the source center and no source pixel is skipped by nearest sampling.
///
/// # Example
///
/// ```
/// use pixform_image::ImageSize;
/// use pixform_imgproc::warp::rotated_size;
///
/// assert_eq!(rotated_size([4, 2].into(), 90.0), ImageSize { width: 2, height: 4 });
/// assert_eq!(rotated_size([4, 4].into(), 45.0), ImageSize { width: 6, height: 6 });
/// ```
pub fn rotated_size(size: ImageSize, angle: f64) -> ImageSize {
    let angle = angle.to_radians();
    let (cos, sin) = (angle.cos().abs(), angle.sin().abs());
    let (w, h) = (size.width as f64, size.height as f64);

    let width = (w * cos + h * sin - CANVAS_EPS).ceil().max(1.0) as usize;
    let height = (w * sin + h * cos - CANVAS_EPS).ceil().max(1.0) as usize;

    // sides of the source that end up closest to the canvas x and y axes
    let (ref_w, ref_h) = if cos >= sin {
        (size.width, size.height)
    } else {
        (size.height, size.width)
    };

    ImageSize {
        width: match_parity(width, ref_w),
        height: match_parity(height, ref_h),
    }
}

fn match_parity(len: usize, reference: usize) -> usize {
    if (len + reference) % 2 == 1 {
        len + 1
    } else {
        len
    }
}

/// Rotate an image by a multiple of 90 degrees counter-clockwise.
///
/// The output is an exact permutation of the input pixels.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `quarter_turns` - Number of counter-clockwise quarter turns, taken modulo 4.
pub fn rotate_quarter_turns<const C: usize>(
    src: &Image<u8, C>,
    quarter_turns: u32,
) -> Result<Image<u8, C>, ImageError> {
    let (w, h) = (src.cols(), src.rows());
    let turns = quarter_turns % 4;

    let size = if turns % 2 == 1 {
        ImageSize {
            width: h,
            height: w,
        }
    } else {
        src.size()
    };

    let mut dst = Image::from_size_val(size, 0u8)?;
    let src_data = src.as_slice();

    parallel::par_iter_rows_mut(&mut dst, |y, dst_row| {
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let (sx, sy) = match turns {
                0 => (x, y),
                1 => (w - 1 - y, x),
                2 => (w - 1 - x, h - 1 - y),
                _ => (y, h - 1 - x),
            };
            let base = (sy * w + sx) * C;
            dst_pixel.copy_from_slice(&src_data[base..base + C]);
        }
    });

    Ok(dst)
}

/// Rotates an image about its center into a destination canvas.
///
/// Each destination pixel is mapped back into the source with the inverse
/// rotation. The source center is aligned with the destination center, so
/// the destination may be larger (expanded canvas) or the same size (crop).
/// Destination pixels that map outside the source get `options.fill`.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output canvas with shape (new_height, new_width, channels).
/// * `angle` - The rotation angle in degrees, positive is counter-clockwise.
/// * `options` - Interpolation and fill value; the canvas policy is ignored
///   since the canvas is given.
pub fn warp_rotate<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    angle: f64,
    options: &RotateOptions,
) -> Result<(), ImgprocError> {
    if !angle.is_finite() {
        return Err(ImgprocError::InvalidAngle(angle));
    }

    let src_center = (
        (src.cols() as f64 - 1.0) / 2.0,
        (src.rows() as f64 - 1.0) / 2.0,
    );
    let dst_center = (
        (dst.cols() as f64 - 1.0) / 2.0,
        (dst.rows() as f64 - 1.0) / 2.0,
    );

    // rotate about the source center, then move that center onto the canvas center
    let mut m = get_rotation_matrix2d(src_center, angle, 1.0);
    m[2] += dst_center.0 - src_center.0;
    m[5] += dst_center.1 - src_center.1;

    // invert affine transform matrix to find corresponding positions in src from dst
    let m_inv = invert_affine_transform(&m);

    let (max_u, max_v) = (src.cols() as f64 - 0.5, src.rows() as f64 - 0.5);

    parallel::par_iter_rows_mut(dst, |y, dst_row| {
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let (u, v) = transform_point(x as f64, y as f64, &m_inv);
            // a source pixel covers [i - 0.5, i + 0.5)
            if u >= -0.5 && u < max_u && v >= -0.5 && v < max_v {
                dst_pixel.copy_from_slice(&interpolate_pixel(src, u, v, options.interpolation));
            } else {
                dst_pixel.fill(options.fill);
            }
        }
    });

    Ok(())
}

/// Rotates an image about its center by an arbitrary angle.
///
/// The angle is taken modulo 360. Quarter turns are served by an exact pixel
/// permutation whenever the resulting canvas matches the requested policy;
/// everything else goes through [`warp_rotate`].
///
/// # Arguments
///
/// * `src` - The input image.
/// * `angle` - The rotation angle in degrees, positive is counter-clockwise.
/// * `options` - Interpolation, fill value and canvas policy.
///
/// # Example
///
/// ```
/// use pixform_image::Image;
/// use pixform_imgproc::warp::{rotate_image, RotateOptions};
///
/// let image = Image::<u8, 1>::new([2, 2].into(), vec![0, 1, 2, 3]).unwrap();
/// let rotated = rotate_image(&image, 90.0, &RotateOptions::default()).unwrap();
///
/// assert_eq!(rotated.as_slice(), &[1, 3, 0, 2]);
/// ```
pub fn rotate_image<const C: usize>(
    src: &Image<u8, C>,
    angle: f64,
    options: &RotateOptions,
) -> Result<Image<u8, C>, ImgprocError> {
    if !angle.is_finite() {
        return Err(ImgprocError::InvalidAngle(angle));
    }

    let angle = angle.rem_euclid(360.0);

    let quarter_turns = if angle == 0.0 {
        Some(0)
    } else if angle == 90.0 {
        Some(1)
    } else if angle == 180.0 {
        Some(2)
    } else if angle == 270.0 {
        Some(3)
    } else {
        None
    };

    if let Some(turns) = quarter_turns {
        let keeps_shape = turns % 2 == 0 || src.cols() == src.rows();
        if options.canvas == CanvasPolicy::Expand || keeps_shape {
            return Ok(rotate_quarter_turns(src, turns)?);
        }
    }

    let size = match options.canvas {
        CanvasPolicy::Expand => rotated_size(src.size(), angle),
        CanvasPolicy::Crop => src.size(),
    };

    let mut dst = Image::from_size_val(size, options.fill)?;
    warp_rotate(src, &mut dst, angle, options)?;

    Ok(dst)
}
