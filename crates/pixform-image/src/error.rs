/// An error type for the image module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Error when the data length does not match width * height * channels.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image has a zero dimension.
    #[error("Image dimensions must be positive, got {0}x{1}")]
    ZeroSize(usize, usize),

    /// Error when the number of channels is not supported.
    #[error("Unsupported number of channels: {0}, expected 1 or 3")]
    UnsupportedChannels(usize),

    /// Error when two images that must match have different sizes.
    #[error("Image size mismatch: {0}x{1} vs {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),
}
