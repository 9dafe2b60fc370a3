//! Buffer level transforms.
//!
//! Each function takes a read-only [`PixelBuffer`] and one parameter and
//! returns a freshly allocated buffer. [`Operation`] packs the choice of
//! transform and its parameter into a single value for callers that pick the
//! transform at runtime.

use std::fmt;
use std::str::FromStr;

use pixform_image::{Image, PixelBuffer};

use crate::color::gray_from_rgb_u8;
use crate::decimate::decimated_size;
use crate::error::ImgprocError;
use crate::warp::{rotate_image, RotateOptions};
use crate::{decimate, filter, quantize as quant};

/// Reduce a buffer to `levels` evenly spaced intensity levels.
///
/// RGB input is converted to luminance first; the output is always
/// grayscale with the same width and height.
///
/// # Errors
///
/// [`ImgprocError::InvalidQuantizationLevels`] when `levels` is not a power
/// of two in `[2, 256]`. Validation happens before any pixel is touched.
///
/// # Example
///
/// ```
/// use pixform_image::PixelBuffer;
///
/// let buffer = PixelBuffer::from_raw(8, 8, 1, vec![200; 64]).unwrap();
/// let out = pixform_imgproc::quantize(&buffer, 4).unwrap();
///
/// assert!(out.as_slice().iter().all(|&v| v == 170));
/// ```
pub fn quantize(buffer: &PixelBuffer, levels: usize) -> Result<PixelBuffer, ImgprocError> {
    quant::quantization_step(levels)?;
    log::debug!("quantize {} to {} levels", buffer.size(), levels);

    let mut dst = Image::<u8, 1>::from_size_val(buffer.size(), 0)?;
    match buffer {
        PixelBuffer::Gray(src) => quant::quantize_levels(src, &mut dst, levels)?,
        PixelBuffer::Rgb(src) => {
            let mut gray = Image::<u8, 1>::from_size_val(src.size(), 0)?;
            gray_from_rgb_u8(src, &mut gray)?;
            quant::quantize_levels(&gray, &mut dst, levels)?;
        }
    }

    Ok(dst.into())
}

/// Blur a buffer with a centered `neighborhood_size` square mean.
///
/// See [`filter::box_average`] for the border and rounding rules.
///
/// # Errors
///
/// [`ImgprocError::InvalidNeighborhoodSize`] when `neighborhood_size` is zero.
pub fn box_average(
    buffer: &PixelBuffer,
    neighborhood_size: usize,
) -> Result<PixelBuffer, ImgprocError> {
    log::debug!(
        "box average {} with a {}x{} window",
        buffer.size(),
        neighborhood_size,
        neighborhood_size
    );

    fn run<const C: usize>(src: &Image<u8, C>, n: usize) -> Result<Image<u8, C>, ImgprocError> {
        let mut dst = Image::from_size_val(src.size(), 0)?;
        filter::box_average(src, &mut dst, n)?;
        Ok(dst)
    }

    Ok(match buffer {
        PixelBuffer::Gray(src) => run(src, neighborhood_size)?.into(),
        PixelBuffer::Rgb(src) => run(src, neighborhood_size)?.into(),
    })
}

/// Reduce the resolution of a buffer by averaging `block_size` square tiles.
///
/// The output is `ceil(width / block_size) x ceil(height / block_size)`.
/// See [`decimate::block_average`] for the padding rule.
///
/// # Errors
///
/// [`ImgprocError::InvalidBlockSize`] when `block_size` is zero.
///
/// # Example
///
/// ```
/// use pixform_image::PixelBuffer;
///
/// let samples = (0..16).map(|i| i * 10).collect();
/// let buffer = PixelBuffer::from_raw(4, 4, 1, samples).unwrap();
/// let out = pixform_imgproc::block_average(&buffer, 2).unwrap();
///
/// assert_eq!((out.width(), out.height()), (2, 2));
/// assert_eq!(out.as_slice()[0], 25);
/// ```
pub fn block_average(buffer: &PixelBuffer, block_size: usize) -> Result<PixelBuffer, ImgprocError> {
    log::debug!(
        "block average {} with {}x{} blocks",
        buffer.size(),
        block_size,
        block_size
    );

    fn run<const C: usize>(src: &Image<u8, C>, b: usize) -> Result<Image<u8, C>, ImgprocError> {
        let mut dst = Image::from_size_val(decimated_size(src.size(), b)?, 0)?;
        decimate::block_average(src, &mut dst, b)?;
        Ok(dst)
    }

    Ok(match buffer {
        PixelBuffer::Gray(src) => run(src, block_size)?.into(),
        PixelBuffer::Rgb(src) => run(src, block_size)?.into(),
    })
}

/// Rotate a buffer counter-clockwise about its center with default options.
///
/// The canvas grows to hold the whole rotated image, uncovered samples are
/// set to 0 and sampling is nearest neighbour.
///
/// # Errors
///
/// [`ImgprocError::InvalidAngle`] when `angle_degrees` is not finite.
pub fn rotate(buffer: &PixelBuffer, angle_degrees: f64) -> Result<PixelBuffer, ImgprocError> {
    rotate_with(buffer, angle_degrees, &RotateOptions::default())
}

/// Rotate a buffer counter-clockwise about its center.
///
/// # Errors
///
/// [`ImgprocError::InvalidAngle`] when `angle_degrees` is not finite.
pub fn rotate_with(
    buffer: &PixelBuffer,
    angle_degrees: f64,
    options: &RotateOptions,
) -> Result<PixelBuffer, ImgprocError> {
    log::debug!(
        "rotate {} by {} degrees with {:?}",
        buffer.size(),
        angle_degrees,
        options
    );

    Ok(match buffer {
        PixelBuffer::Gray(src) => rotate_image(src, angle_degrees, options)?.into(),
        PixelBuffer::Rgb(src) => rotate_image(src, angle_degrees, options)?.into(),
    })
}

/// A transform selected at runtime together with its parameter.
///
/// The textual form is `name:param`, e.g. `rotate:45` or
/// `block-average:3`.
///
/// # Example
///
/// ```
/// use pixform_image::PixelBuffer;
/// use pixform_imgproc::Operation;
///
/// let op: Operation = "block-average:2".parse().unwrap();
/// assert_eq!(op, Operation::BlockAverage { block_size: 2 });
///
/// let buffer = PixelBuffer::from_raw(4, 2, 3, vec![10; 24]).unwrap();
/// let out = op.apply(&buffer).unwrap();
/// assert_eq!((out.width(), out.height(), out.channels()), (2, 1, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "kebab-case"))]
pub enum Operation {
    /// Quantize to a number of intensity levels.
    ReduceIntensity {
        /// Power of two in `[2, 256]`.
        levels: usize,
    },
    /// Mean over a centered square window.
    SpatialAverage {
        /// Side of the window.
        neighborhood_size: usize,
    },
    /// Mean over non-overlapping square blocks.
    BlockAverage {
        /// Side of the blocks.
        block_size: usize,
    },
    /// Rotation about the center.
    Rotate {
        /// Counter-clockwise angle in degrees.
        angle: f64,
    },
}

impl Operation {
    /// Stable identifier of the transform, as used by the textual form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReduceIntensity { .. } => "reduce-intensity",
            Self::SpatialAverage { .. } => "spatial-average",
            Self::BlockAverage { .. } => "block-average",
            Self::Rotate { .. } => "rotate",
        }
    }

    /// Run the selected transform on a buffer.
    pub fn apply(&self, buffer: &PixelBuffer) -> Result<PixelBuffer, ImgprocError> {
        log::debug!("apply {}", self);
        match *self {
            Self::ReduceIntensity { levels } => quantize(buffer, levels),
            Self::SpatialAverage { neighborhood_size } => box_average(buffer, neighborhood_size),
            Self::BlockAverage { block_size } => block_average(buffer, block_size),
            Self::Rotate { angle } => rotate(buffer, angle),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReduceIntensity { levels } => write!(f, "Reduce Intensity Levels ({levels})"),
            Self::SpatialAverage { neighborhood_size: n } => write!(f, "Spatial Average ({n}x{n})"),
            Self::BlockAverage { block_size: b } => write!(f, "Average Blocks ({b}x{b})"),
            Self::Rotate { angle } => write!(f, "Rotate {angle} Degrees"),
        }
    }
}

impl FromStr for Operation {
    type Err = ImgprocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, param) = s
            .split_once(':')
            .ok_or_else(|| ImgprocError::InvalidOperationParameter(s.to_string()))?;
        let (name, param) = (name.trim(), param.trim());

        let parse_size = || {
            param
                .parse::<usize>()
                .map_err(|_| ImgprocError::InvalidOperationParameter(param.to_string()))
        };

        match name {
            "reduce-intensity" => Ok(Self::ReduceIntensity {
                levels: parse_size()?,
            }),
            "spatial-average" => Ok(Self::SpatialAverage {
                neighborhood_size: parse_size()?,
            }),
            "block-average" => Ok(Self::BlockAverage {
                block_size: parse_size()?,
            }),
            "rotate" => {
                let angle = param
                    .parse::<f64>()
                    .map_err(|_| ImgprocError::InvalidOperationParameter(param.to_string()))?;
                Ok(Self::Rotate { angle })
            }
            _ => Err(ImgprocError::UnknownOperation(name.to_string())),
        }
    }
}
