//! Format dispatch: one request in, one output file out.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::iconset::{self, IconPackager, Iconutil};
use crate::loader;

/// Side length ICO output is resized to.
pub const ICO_SIZE: u32 = 48;

/// Output formats the converter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Ico,
    Icns,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Png,
        OutputFormat::Jpeg,
        OutputFormat::Ico,
        OutputFormat::Icns,
    ];

    /// Display name, as shown in format selectors.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Ico => "ICO",
            OutputFormat::Icns => "ICNS",
        }
    }

    /// Extension appended to output paths, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Ico => "ico",
            OutputFormat::Icns => "icns",
        }
    }

    /// Every extension accepted for this format, canonical one first.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            OutputFormat::Png => &["png"],
            OutputFormat::Jpeg => &["jpg", "jpeg"],
            OutputFormat::Ico => &["ico"],
            OutputFormat::Icns => &["icns"],
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConvertError::UnknownFormat(path.display().to_string()))?;
        ext.parse()
    }

    /// Append this format's extension unless `path` already has one of
    /// [`extensions`](Self::extensions), in any case.
    pub fn with_default_extension(self, path: &Path) -> PathBuf {
        let has_extension = path.extension().is_some_and(|ext| {
            self.extensions()
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });

        if has_extension {
            path.to_path_buf()
        } else {
            let mut name = path.as_os_str().to_os_string();
            name.push(".");
            name.push(self.extension());
            PathBuf::from(name)
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "ico" => Ok(OutputFormat::Ico),
            "icns" => Ok(OutputFormat::Icns),
            _ => Err(ConvertError::UnknownFormat(name.to_string())),
        }
    }
}

/// A single conversion, created per user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
}

impl ConversionRequest {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        format: OutputFormat,
    ) -> Self {
        ConversionRequest {
            input: input.into(),
            output: output.into(),
            format,
        }
    }
}

/// Dispatches conversions to the right encoder or to the icon-set builder.
pub struct Converter {
    config: ConverterConfig,
    packager: Box<dyn IconPackager>,
}

impl Converter {
    /// Converter packaging ICNS through the configured `iconutil`.
    pub fn new(config: ConverterConfig) -> Self {
        let packager = Box::new(Iconutil::new(config.iconutil_program.clone()));
        Converter { config, packager }
    }

    /// Replace the ICNS packager.
    pub fn with_packager(mut self, packager: Box<dyn IconPackager>) -> Self {
        self.packager = packager;
        self
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Decode `request.input` and write it to `request.output`.
    pub fn convert(&self, request: &ConversionRequest) -> Result<(), ConvertError> {
        if request.format == OutputFormat::Icns {
            // Fail before decoding when packaging can never succeed here.
            self.packager.check_platform()?;
        }

        let image = loader::open_image(&request.input)?;
        self.convert_image(&image, &request.output, request.format)
    }

    /// Write an already decoded image to `output` in `format`.
    pub fn convert_image(
        &self,
        image: &DynamicImage,
        output: &Path,
        format: OutputFormat,
    ) -> Result<(), ConvertError> {
        let filter: FilterType = self.config.resize_filter.into();

        match format {
            OutputFormat::Icns => {
                let packager = self.packager.as_ref();
                return iconset::build_icon_container(image, output, packager, filter);
            }
            OutputFormat::Png => {
                image
                    .save_with_format(output, image::ImageFormat::Png)
                    .map_err(|e| ConvertError::conversion(output, e))?;
            }
            OutputFormat::Jpeg => self.write_jpeg(image, output)?,
            OutputFormat::Ico => {
                let resized = image.resize_exact(ICO_SIZE, ICO_SIZE, filter);
                write_ico(&resized, output)?;
            }
        }

        log::info!("Converted to {}: {}", format, output.display());
        Ok(())
    }

    fn write_jpeg(&self, image: &DynamicImage, output: &Path) -> Result<(), ConvertError> {
        let file = File::create(output).map_err(|e| ConvertError::conversion(output, e))?;
        let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), self.config.jpeg_quality);

        // JPEG has no alpha channel.
        DynamicImage::ImageRgb8(image.to_rgb8())
            .write_with_encoder(encoder)
            .map_err(|e| ConvertError::conversion(output, e))
    }
}

impl Default for Converter {
    fn default() -> Self {
        Converter::new(ConverterConfig::default())
    }
}

/// Write `image` as a single-entry 32-bit ICO file.
fn write_ico(image: &DynamicImage, output: &Path) -> Result<(), ConvertError> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let icon_image = ico::IconImage::from_rgba_data(width, height, rgba.into_raw());

    let mut icon_dir = ico::IconDir::new(ico::ResourceType::Icon);
    icon_dir.add_entry(
        ico::IconDirEntry::encode(&icon_image).map_err(|e| ConvertError::conversion(output, e))?,
    );

    let file = File::create(output).map_err(|e| ConvertError::conversion(output, e))?;
    icon_dir
        .write(BufWriter::new(file))
        .map_err(|e| ConvertError::conversion(output, e))
}
