use deepdream_image::{
    ops::{add_inplace, sub},
    Image, ImageError,
};
use deepdream_imgproc::resize::{resize, scaled_size};

/// Upsample `image` to the size of `residual` and add the residual back.
///
/// This is the inverse of one pyramid descent step.
pub fn upsample_with_residual(
    image: &Image<f32, 3>,
    residual: &Image<f32, 3>,
) -> Result<Image<f32, 3>, ImageError> {
    let mut upsampled = resize(image, residual.size())?;
    add_inplace(&mut upsampled, residual)?;
    Ok(upsampled)
}

/// A multi-resolution decomposition of an image.
///
/// The pyramid holds the coarsest octave as its base plus one high-frequency residual
/// per octave transition, ordered from the finest to the coarsest.
#[derive(Clone, Debug)]
pub struct OctavePyramid {
    base: Image<f32, 3>,
    residuals: Vec<Image<f32, 3>>,
}

impl OctavePyramid {
    /// Decompose `image` into `octave_count` octaves.
    ///
    /// Each descent step shrinks the current image by `octave_scale` with
    /// [`scaled_size`] and stores `current - resize(shrunk, current.size())` as the
    /// residual of that step.
    ///
    /// # Arguments
    ///
    /// * `image` - The full resolution image.
    /// * `octave_count` - The number of octaves; `octave_count - 1` residuals are built.
    /// * `octave_scale` - The downsampling factor between adjacent octaves.
    pub fn build(
        image: Image<f32, 3>,
        octave_count: usize,
        octave_scale: f32,
    ) -> Result<Self, ImageError> {
        let mut base = image;
        let mut residuals = Vec::with_capacity(octave_count.saturating_sub(1));

        for _ in 1..octave_count {
            let lo = resize(&base, scaled_size(base.size(), octave_scale))?;
            let up = resize(&lo, base.size())?;

            let mut hi = Image::from_size_val(base.size(), 0.0)?;
            sub(&base, &up, &mut hi)?;

            log::debug!("pyramid: {} -> {}", base.size(), lo.size());

            residuals.push(hi);
            base = lo;
        }

        Ok(Self { base, residuals })
    }

    /// The coarsest octave.
    pub fn base(&self) -> &Image<f32, 3> {
        &self.base
    }

    /// The residuals, finest first.
    pub fn residuals(&self) -> &[Image<f32, 3>] {
        &self.residuals
    }

    /// Number of octaves of the pyramid.
    pub fn octave_count(&self) -> usize {
        self.residuals.len() + 1
    }

    /// Consume the pyramid and return the base and the residuals, finest first.
    pub fn into_parts(self) -> (Image<f32, 3>, Vec<Image<f32, 3>>) {
        (self.base, self.residuals)
    }

    /// Rebuild the full resolution image by adding the residuals back, coarsest first.
    pub fn reconstruct(&self) -> Result<Image<f32, 3>, ImageError> {
        self.residuals
            .iter()
            .rev()
            .try_fold(self.base.clone(), |image, residual| {
                upsample_with_residual(&image, residual)
            })
    }
}
