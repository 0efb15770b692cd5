//! Decoding input files into images.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::DynamicImage;

use crate::error::ConvertError;

/// Extensions offered by file pickers for input images.
pub const INPUT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "ico", "icns"];

/// Decode the image at `path`.
///
/// `.icns` files are read with the `icns` crate, using the largest rendition
/// that decodes; everything else goes through `image`.
pub fn open_image(path: &Path) -> Result<DynamicImage, ConvertError> {
    let is_icns = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("icns"));

    let image = if is_icns {
        open_icns(path)?
    } else {
        image::open(path).map_err(|e| ConvertError::conversion(path, e))?
    };

    log::debug!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

fn open_icns(path: &Path) -> Result<DynamicImage, ConvertError> {
    let file = File::open(path).map_err(|e| ConvertError::conversion(path, e))?;
    let family = icns::IconFamily::read(BufReader::new(file))
        .map_err(|e| ConvertError::conversion(path, e))?;

    let mut icon_types = family.available_icons();
    icon_types.sort_by_key(|t| std::cmp::Reverse(t.pixel_width()));

    // JPEG 2000 renditions are not decodable; fall through to smaller ones.
    for icon_type in icon_types {
        let icon = match family.get_icon_with_type(icon_type) {
            Ok(icon) => icon,
            Err(e) => {
                log::debug!("Skipping {:?} in {}: {}", icon_type, path.display(), e);
                continue;
            }
        };

        let mut png = Vec::new();
        icon.write_png(&mut png)
            .map_err(|e| ConvertError::conversion(path, e))?;
        return image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .map_err(|e| ConvertError::conversion(path, e));
    }

    Err(ConvertError::conversion(
        path,
        "ICNS file contains no decodable icon",
    ))
}
