use std::path::Path;
use std::process::Command;

use crate::error::ConvertError;

/// Packs an iconset directory into a single icon container file.
///
/// The production implementation shells out to an OS tool; tests substitute
/// their own.
pub trait IconPackager {
    /// Fail with [`ConvertError::UnsupportedPlatform`] if packaging cannot
    /// run on this host.
    fn check_platform(&self) -> Result<(), ConvertError>;

    /// Package `iconset_dir` into `output`.
    fn package(&self, iconset_dir: &Path, output: &Path) -> Result<(), ConvertError>;
}

/// Packager backed by macOS `iconutil`.
#[derive(Debug, Clone)]
pub struct Iconutil {
    program: String,
}

impl Iconutil {
    pub fn new(program: impl Into<String>) -> Self {
        Iconutil {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for Iconutil {
    fn default() -> Self {
        Iconutil::new("iconutil")
    }
}

impl IconPackager for Iconutil {
    fn check_platform(&self) -> Result<(), ConvertError> {
        if cfg!(target_os = "macos") {
            Ok(())
        } else {
            Err(ConvertError::UnsupportedPlatform(std::env::consts::OS))
        }
    }

    /// Run `iconutil -c icns <iconset_dir> -o <output>`
    fn package(&self, iconset_dir: &Path, output: &Path) -> Result<(), ConvertError> {
        log::debug!(
            "Running {} on {} -> {}",
            self.program,
            iconset_dir.display(),
            output.display()
        );

        let result = Command::new(&self.program)
            .args(["-c", "icns"])
            .arg(iconset_dir)
            .arg("-o")
            .arg(output)
            .output()
            .map_err(|e| ConvertError::PackagingFailed {
                exit_code: None,
                stderr: format!("failed to run {}: {}", self.program, e),
            })?;

        if !result.status.success() {
            return Err(ConvertError::PackagingFailed {
                exit_code: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
