use std::path::{Path, PathBuf};

use converter_core::{
    AspectRatio, ConversionRequest, ConvertError, Converter, ConverterConfig, OutputFormat, crop,
    open_image,
};

/// Convert `input` into `output`, optionally cropping first.
///
/// Without an explicit `format` the output extension decides. Returns the
/// path actually written, which gains the format's extension if it lacked
/// one.
pub fn run(
    config: &ConverterConfig,
    input: &Path,
    output: &Path,
    format: Option<OutputFormat>,
    ratio: Option<AspectRatio>,
) -> Result<PathBuf, ConvertError> {
    let format = match format {
        Some(format) => format,
        None => OutputFormat::from_path(output)?,
    };
    let output = format.with_default_extension(output);
    let converter = Converter::new(config.clone());

    match ratio {
        None => converter.convert(&ConversionRequest::new(input, &output, format))?,
        Some(ratio) => {
            let cropped = crop(&open_image(input)?, ratio);
            converter.convert_image(&cropped, &output, format)?;
        }
    }

    Ok(output)
}
