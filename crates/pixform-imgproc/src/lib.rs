#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color conversions module.
pub mod color;

/// resolution reduction by block averaging.
pub mod decimate;

/// error types for the image processing module.
pub mod error;

/// image filtering module.
pub mod filter;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// intensity level quantization module.
pub mod quantize;

/// buffer level transforms and the operation dispatcher.
pub mod transform;

/// image geometric transformations module.
pub mod warp;

pub use crate::error::ImgprocError;
pub use crate::transform::{block_average, box_average, quantize, rotate, rotate_with, Operation};
