//! Multi-resolution icon sets and ICNS packaging.

pub mod packager;

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use image::imageops::FilterType;

use crate::error::ConvertError;

pub use packager::{IconPackager, Iconutil};

/// One rendition required in an icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    /// Side length of the square image, in pixels.
    pub size: u32,
    /// Resolution label (e.g., "16x16@2x")
    pub label: &'static str,
}

impl IconSpec {
    /// File name inside the iconset directory, e.g. `icon_16x16@2x.png`.
    pub fn file_name(&self) -> String {
        format!("icon_{}.png", self.label)
    }
}

/// Every rendition of a macOS iconset, @2x variants included.
pub const ICONSET_SPECS: &[IconSpec] = &[
    IconSpec { size: 16, label: "16x16" },
    IconSpec { size: 32, label: "16x16@2x" },
    IconSpec { size: 32, label: "32x32" },
    IconSpec { size: 64, label: "32x32@2x" },
    IconSpec { size: 128, label: "128x128" },
    IconSpec { size: 256, label: "128x128@2x" },
    IconSpec { size: 256, label: "256x256" },
    IconSpec { size: 512, label: "256x256@2x" },
    IconSpec { size: 512, label: "512x512" },
    IconSpec { size: 1024, label: "512x512@2x" },
];

/// Name of the iconset folder inside the working directory.
///
/// `iconutil` requires the `.iconset` suffix.
pub const ICONSET_DIR_NAME: &str = "icon.iconset";

/// Resize `image` into every [`ICONSET_SPECS`] rendition under `dir`.
///
/// Renditions are always square; a non-square source is stretched.
/// Returns the written paths in table order.
pub fn write_iconset(
    image: &DynamicImage,
    dir: &Path,
    filter: FilterType,
) -> Result<Vec<PathBuf>, ConvertError> {
    fs::create_dir_all(dir).map_err(|e| ConvertError::conversion(dir, e))?;

    let mut written = Vec::with_capacity(ICONSET_SPECS.len());
    for spec in ICONSET_SPECS {
        let path = dir.join(spec.file_name());
        let resized = image.resize_exact(spec.size, spec.size, filter);
        resized
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|e| ConvertError::conversion(&path, e))?;

        log::debug!("Wrote {} ({}x{})", path.display(), spec.size, spec.size);
        written.push(path);
    }

    Ok(written)
}

/// Build an icon container at `output` from `image`.
///
/// The platform check runs before anything touches the filesystem. The
/// renditions go to a fresh temporary directory that is removed on every
/// exit path, including packaging failure.
pub fn build_icon_container(
    image: &DynamicImage,
    output: &Path,
    packager: &dyn IconPackager,
    filter: FilterType,
) -> Result<(), ConvertError> {
    packager.check_platform()?;

    let work_dir = tempfile::Builder::new()
        .prefix("image-converter-")
        .tempdir()
        .map_err(|e| ConvertError::conversion(output, e))?;
    let iconset_dir = work_dir.path().join(ICONSET_DIR_NAME);

    write_iconset(image, &iconset_dir, filter)?;
    packager.package(&iconset_dir, output)?;

    let work_path = work_dir.path().to_path_buf();
    if let Err(e) = work_dir.close() {
        log::warn!(
            "Failed to remove temporary iconset directory {}: {}",
            work_path.display(),
            e
        );
    }

    log::info!("Created icon container {}", output.display());
    Ok(())
}
