//! Image conversion core: aspect-ratio cropping, icon-set generation and
//! format dispatch for PNG, JPEG, ICO and ICNS output.

pub mod config;
pub mod convert;
pub mod crop;
pub mod error;
pub mod iconset;
pub mod loader;
pub mod ratio;

pub use config::{ConverterConfig, ResampleFilter};
pub use convert::{ConversionRequest, Converter, OutputFormat};
pub use crop::{CropRect, crop};
pub use error::ConvertError;
pub use iconset::{IconPackager, IconSpec, Iconutil, build_icon_container};
pub use loader::open_image;
pub use ratio::AspectRatio;
