#![deny(missing_docs)]
//! Image types for generating and manipulating raster images

/// Error types for the image module.
pub mod error;

/// Typed image container with a compile-time channel count.
pub mod image;

/// Runtime-channel 8-bit pixel buffer.
pub mod buffer;

pub use crate::buffer::PixelBuffer;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
