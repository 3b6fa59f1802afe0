use thiserror::Error;

/// Failure to decode an uploaded photo into a raster. Reported upstream by
/// the collaborator that owns ingestion; the editor itself just skips the
/// image.
#[derive(Error, Debug, Clone)]
pub enum DecodeError {
    #[error("unsupported or corrupt image data: {0}")]
    Malformed(String),
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        DecodeError::Malformed(err.to_string())
    }
}

/// Failure to encode the flattened composition.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to encode composition: {0}")]
    Encode(#[from] image::ImageError),
}
