#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! A [`FeatureExtractor`] exposes the named layers of a fixed network and the
//! gradient of an [`Objective`] built on one of them with respect to the input
//! pixels. [`ConvNet`] is the candle-backed implementation used by the binary.

/// candle-backed convolutional feature extractor.
pub mod convnet;

/// Error types for the nn module.
pub mod error;

/// the feature extraction capability consumed by the dream engine.
pub mod extractor;

/// activation objectives and layer descriptions.
pub mod objective;

pub use crate::convnet::{ConvLayerConfig, ConvNet};
pub use crate::error::NnError;
pub use crate::extractor::FeatureExtractor;
pub use crate::objective::{LayerInfo, Objective};
