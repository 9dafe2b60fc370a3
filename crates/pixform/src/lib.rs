#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use pixform_image as image;

#[doc(inline)]
pub use pixform_imgproc as imgproc;
