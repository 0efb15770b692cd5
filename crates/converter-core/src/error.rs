use std::path::PathBuf;

/// Boxed cause carried by [`ConvertError::ConversionFailed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for crop, packaging and conversion operations.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Ratio text that is not two positive integers around a single `:`.
    #[error("invalid aspect ratio '{0}': expected W:H with two positive integers")]
    InvalidRatioFormat(String),

    /// Ratio components that are not both positive.
    #[error("invalid aspect ratio {width}:{height}: both components must be positive")]
    InvalidRatio { width: u32, height: u32 },

    /// Output format name outside the supported set.
    #[error("unknown output format '{0}' (expected png, jpeg, ico or icns)")]
    UnknownFormat(String),

    /// Icon container packaging requested on an ineligible OS.
    #[error("ICNS packaging is only supported on macOS (running on {0})")]
    UnsupportedPlatform(&'static str),

    /// The external packaging tool could not be run or exited non-zero.
    #[error("icon packaging failed{}: {stderr}", exit_suffix(.exit_code))]
    PackagingFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// Decoding, encoding, resizing or file IO failed.
    #[error("conversion failed for '{}': {source}", .path.display())]
    ConversionFailed {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The configuration file could not be read or is invalid.
    #[error("invalid configuration '{}': {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

fn exit_suffix(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!(" (exit code {})", code),
        None => String::new(),
    }
}

impl ConvertError {
    pub(crate) fn conversion(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        ConvertError::ConversionFailed {
            path: path.into(),
            source: source.into(),
        }
    }
}
