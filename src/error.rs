use std::path::PathBuf;

use thiserror::Error;

/// Reasons a texture could not be registered.
///
/// None of these are fatal for the scene: the caller logs the error and any
/// object referencing the tag falls back to flat colour.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("could not read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("not implemented to handle image with {0} channels")]
    UnsupportedChannels(u8),
    #[error("all {0} texture slots are in use")]
    RegistryFull(usize),
    #[error("a texture tagged '{0}' is already loaded")]
    DuplicateTag(String),
    #[error("texture upload failed: {0}")]
    Device(String),
}
