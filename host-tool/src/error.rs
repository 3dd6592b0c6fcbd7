use std::path::PathBuf;
use thiserror::Error;

/// Failures while converting a single image
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("file not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    #[error("cannot decode {}: {source}", path.display())]
    UnsupportedOrCorruptImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid icon data: {0}")]
    Format(#[from] icon_format::FormatError),

    #[error("cannot write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image decoding support is unavailable in this build")]
    MissingDependency,
}
