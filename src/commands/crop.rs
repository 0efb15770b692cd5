use std::path::{Path, PathBuf};

use converter_core::{
    AspectRatio, ConvertError, Converter, ConverterConfig, OutputFormat, crop, open_image,
};

/// Crop `input` to `ratio` and save it in the format implied by `output`.
pub fn run(
    config: &ConverterConfig,
    input: &Path,
    output: &Path,
    ratio: AspectRatio,
) -> Result<PathBuf, ConvertError> {
    let format = OutputFormat::from_path(output)?;
    let cropped = crop(&open_image(input)?, ratio);

    Converter::new(config.clone()).convert_image(&cropped, output, format)?;
    Ok(output.to_path_buf())
}
