use deepdream_image::ImageError;
use deepdream_nn::NnError;

/// An error type for the dream engine.
#[derive(thiserror::Error, Debug)]
pub enum DreamError {
    /// Error from an image operation.
    #[error(transparent)]
    ImageError(#[from] ImageError),

    /// Error from the feature extraction network.
    #[error(transparent)]
    NnError(#[from] NnError),

    /// The tile size is zero.
    #[error("Tile size must be positive, got {0}")]
    InvalidTileSize(usize),

    /// The octave scale does not shrink the image.
    #[error("Octave scale must be greater than 1.0, got {0}")]
    InvalidOctaveScale(f32),

    /// No octave to render.
    #[error("Octave count must be at least 1, got {0}")]
    InvalidOctaveCount(usize),

    /// The step size is not a positive finite number.
    #[error("Step size must be positive and finite, got {0}")]
    InvalidStepSize(f32),

    /// The frame scale is not a positive finite number.
    #[error("Frame scale must be positive and finite, got {0}")]
    InvalidFrameScale(f32),
}
