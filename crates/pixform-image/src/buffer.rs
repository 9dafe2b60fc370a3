use crate::{Image, ImageError, ImageSize};

/// An 8-bit raster whose channel count is only known at runtime.
///
/// This is the value exchanged with decoders, encoders and front ends. It
/// wraps a typed [`Image`] so the transforms can dispatch to a kernel
/// specialised for the channel count.
///
/// # Examples
///
/// ```
/// use pixform_image::PixelBuffer;
///
/// let buffer = PixelBuffer::from_raw(2, 1, 3, vec![255, 0, 0, 0, 255, 0]).unwrap();
///
/// assert_eq!(buffer.width(), 2);
/// assert_eq!(buffer.height(), 1);
/// assert_eq!(buffer.channels(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum PixelBuffer {
    /// Single channel luminance samples.
    Gray(Image<u8, 1>),
    /// Interleaved red, green and blue samples.
    Rgb(Image<u8, 3>),
}

impl PixelBuffer {
    /// Create a buffer from raw row-major samples.
    ///
    /// # Arguments
    ///
    /// * `width` - The width of the buffer in pixels.
    /// * `height` - The height of the buffer in pixels.
    /// * `channels` - The number of channels, 1 or 3.
    /// * `samples` - The interleaved sample data.
    ///
    /// # Errors
    ///
    /// Fails when a dimension is zero, when `channels` is not 1 or 3, or when
    /// `samples.len() != width * height * channels`.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        samples: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let size = ImageSize { width, height };
        match channels {
            1 => Ok(Self::Gray(Image::new(size, samples)?)),
            3 => Ok(Self::Rgb(Image::new(size, samples)?)),
            c => Err(ImageError::UnsupportedChannels(c)),
        }
    }

    /// Get the size of the buffer in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            Self::Gray(img) => img.size(),
            Self::Rgb(img) => img.size(),
        }
    }

    /// Get the width of the buffer in pixels.
    pub fn width(&self) -> usize {
        self.size().width
    }

    /// Get the height of the buffer in pixels.
    pub fn height(&self) -> usize {
        self.size().height
    }

    /// Get the number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray(_) => 1,
            Self::Rgb(_) => 3,
        }
    }

    /// Get the samples as a flat row-major slice.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::Gray(img) => img.as_slice(),
            Self::Rgb(img) => img.as_slice(),
        }
    }

    /// Consume the buffer and return its samples.
    pub fn into_raw(self) -> Vec<u8> {
        match self {
            Self::Gray(img) => img.into_vec(),
            Self::Rgb(img) => img.into_vec(),
        }
    }
}

impl From<Image<u8, 1>> for PixelBuffer {
    fn from(image: Image<u8, 1>) -> Self {
        Self::Gray(image)
    }
}

impl From<Image<u8, 3>> for PixelBuffer {
    fn from(image: Image<u8, 3>) -> Self {
        Self::Rgb(image)
    }
}
