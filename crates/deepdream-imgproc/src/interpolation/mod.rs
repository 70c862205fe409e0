//! Pixel interpolation kernels used when resampling images.
//!
//! Only bilinear interpolation is provided: the octave pyramid needs a smooth,
//! deterministic float resampler and nothing else.

mod bilinear;

pub use bilinear::bilinear_interpolation;
