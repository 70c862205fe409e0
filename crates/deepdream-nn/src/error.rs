/// An error type for the feature extraction networks.
#[derive(thiserror::Error, Debug)]
pub enum NnError {
    /// Error raised by the candle runtime while building or evaluating the network.
    #[error(transparent)]
    CandleError(#[from] candle_core::Error),

    /// Error converting between images and tensors.
    #[error(transparent)]
    ImageError(#[from] deepdream_image::ImageError),

    /// The model file does not exist.
    #[error("Model file does not exist: {0}")]
    ModelFileDoesNotExist(std::path::PathBuf),

    /// The model file holds no convolution layers.
    #[error("Model contains no convolution layers")]
    EmptyModel,

    /// A weight name does not end in a numeric layer index.
    #[error("Unsupported layer name: {0}, expected `<prefix>.<index>`")]
    UnsupportedLayerName(String),

    /// The requested layer is not part of the network.
    #[error("Unknown layer: {0}")]
    UnknownLayer(String),

    /// The requested feature channel does not exist in the layer.
    #[error("Feature {feature} is out of range for layer {layer} with {channels} channels")]
    FeatureOutOfRange {
        /// The layer name.
        layer: String,
        /// The requested channel.
        feature: usize,
        /// The number of channels of the layer.
        channels: usize,
    },

    /// The input pixels received no gradient from the objective.
    #[error("The objective on layer {0} does not depend on the input image")]
    MissingGradient(String),
}
