//! Converts raster images into 32×32 RGB565 C headers for embedded displays.

pub mod batch;
pub mod convert;
pub mod error;

pub use convert::{convert, ConversionReport, IconRequest};
pub use error::ConvertError;
