use pixform_image::ImageError;

/// An error type for the image processing operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImgprocError {
    /// The number of quantization levels is not a power of two in [2, 256].
    #[error("levels must be a power of two in [2,256], got {0}")]
    InvalidQuantizationLevels(usize),

    /// The averaging window side is zero.
    #[error("neighborhood size must be >= 1, got {0}")]
    InvalidNeighborhoodSize(usize),

    /// The decimation block side is zero.
    #[error("block size must be >= 1, got {0}")]
    InvalidBlockSize(usize),

    /// The rotation angle is NaN or infinite.
    #[error("rotation angle must be finite, got {0}")]
    InvalidAngle(f64),

    /// The operation name could not be parsed.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The operation parameter could not be parsed.
    #[error("invalid operation parameter: {0}")]
    InvalidOperationParameter(String),

    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl ImgprocError {
    /// Whether the error was caused by an out of range transform parameter.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuantizationLevels(_)
                | Self::InvalidNeighborhoodSize(_)
                | Self::InvalidBlockSize(_)
                | Self::InvalidAngle(_)
        )
    }
}
