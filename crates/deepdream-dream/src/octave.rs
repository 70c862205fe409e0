use deepdream_image::{
    ops::{mean_abs, scaled_add_inplace},
    Image, ImageError,
};
use deepdream_nn::{FeatureExtractor, Objective};
use rand::Rng;

use crate::error::DreamError;
use crate::params::DreamParams;
use crate::pyramid::{upsample_with_residual, OctavePyramid};
use crate::tiling::compute_tiled_gradient;

/// Added to the mean absolute gradient before normalizing a step.
pub const GRADIENT_EPSILON: f32 = 1e-7;

/// Apply one normalized gradient ascent step in place.
///
/// Computes `image += gradient * step_size / (mean(|gradient|) + 1e-7)`, so a zero
/// gradient leaves the image untouched.
pub fn ascent_step(
    image: &mut Image<f32, 3>,
    gradient: &Image<f32, 3>,
    step_size: f32,
) -> Result<(), ImageError> {
    let scale = step_size / (mean_abs(gradient) + GRADIENT_EPSILON);
    scaled_add_inplace(image, gradient, scale)
}

/// Render a deep dream image with an explicit gradient function.
///
/// The image is decomposed into an [`OctavePyramid`]. Starting from the coarsest octave,
/// each octave runs `params.iterations` ascent steps with tiled gradients, then the
/// result is upsampled to the next finer octave and its residual is added back.
///
/// The returned image has the input resolution and is not clamped.
///
/// # Arguments
///
/// * `grad_fn` - Maps an image to the gradient of the objective with respect to it.
/// * `image` - The initial image, pixel values in `[0, 255]`.
/// * `params` - The render parameters.
/// * `rng` - Source of the random tile shifts.
pub fn render_deepdream_with<F, E, R>(
    grad_fn: &mut F,
    image: Image<f32, 3>,
    params: &DreamParams,
    rng: &mut R,
) -> Result<Image<f32, 3>, DreamError>
where
    F: FnMut(&Image<f32, 3>) -> Result<Image<f32, 3>, E>,
    E: Into<DreamError>,
    R: Rng + ?Sized,
{
    params.validate()?;

    let (mut image, residuals) =
        OctavePyramid::build(image, params.octave_count, params.octave_scale)?.into_parts();

    // the coarsest octave has no residual, every finer one consumes one, coarsest first
    let octaves = std::iter::once(None).chain(residuals.iter().rev().map(Some));

    for (octave, residual) in octaves.enumerate() {
        if let Some(residual) = residual {
            image = upsample_with_residual(&image, residual)?;
        }

        log::debug!("octave {octave}: {}", image.size());

        for _ in 0..params.iterations {
            let gradient = compute_tiled_gradient(&image, grad_fn, params.tile_size, rng)?;
            ascent_step(&mut image, &gradient, params.step_size)?;
        }
    }

    Ok(image)
}

/// Render a deep dream image maximizing `objective` on `extractor`.
///
/// The objective is checked against the extractor layers before any pixel is touched.
///
/// # Errors
///
/// Returns [`DreamError::NnError`] if the objective does not match the network or the
/// gradient evaluation fails, and the parameter errors of [`DreamParams::validate`].
pub fn render_deepdream<X, R>(
    extractor: &X,
    objective: &Objective,
    image: Image<f32, 3>,
    params: &DreamParams,
    rng: &mut R,
) -> Result<Image<f32, 3>, DreamError>
where
    X: FeatureExtractor,
    R: Rng + ?Sized,
{
    let mut grad_fn = extractor.gradient_fn(objective)?;
    render_deepdream_with(&mut grad_fn, image, params, rng)
}
