#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! The engine threads one float image through three stages: the [`pyramid`]
//! splits it into a coarse base and per-octave detail residuals, the
//! [`octave`] driver runs gradient ascent from the coarsest to the finest
//! octave, and every ascent step evaluates the objective gradient in
//! randomly shifted tiles with [`tiling::compute_tiled_gradient`].

/// Error types for the dream engine.
pub mod error;

/// Multi-frame rendering driver.
pub mod frames;

/// Octave ascent driver.
pub mod octave;

/// Render parameters.
pub mod params;

/// Octave pyramid with high-frequency residuals.
pub mod pyramid;

/// Tiled gradient evaluation.
pub mod tiling;

pub use crate::error::DreamError;
pub use crate::frames::{frame_output_path, render_frames};
pub use crate::octave::{ascent_step, render_deepdream, render_deepdream_with};
pub use crate::params::{DreamParams, FrameParams};
pub use crate::pyramid::OctavePyramid;
pub use crate::tiling::{compute_tiled_gradient, tile_spans};
