/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the underlying tensor cannot be created.
    #[error("Failed to create the image tensor. {0}")]
    TensorError(#[from] deepdream_tensor::TensorError),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image size is not valid.
    #[error("Invalid image size ({0}, {1}) != ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the image has no pixels.
    #[error("Image must have at least one pixel, got {0}x{1}")]
    EmptyImage(usize, usize),

    /// Error when a pixel value cannot be cast.
    #[error("Failed to cast image data to {0}")]
    CastError(String),

    /// Error when a sub-region does not fit inside the image.
    #[error("Region at ({0}, {1}) of size {2}x{3} exceeds image size {4}x{5}")]
    RegionOutOfBounds(usize, usize, usize, usize, usize, usize),
}
