use crate::error::DreamError;

/// Parameters of a single deep dream render.
#[derive(Clone, Debug, PartialEq)]
pub struct DreamParams {
    /// Ascent steps per octave.
    pub iterations: usize,
    /// Step size of each ascent step, relative to the mean absolute gradient.
    pub step_size: f32,
    /// Number of pyramid octaves, at least 1.
    pub octave_count: usize,
    /// Downsampling factor between adjacent octaves, greater than 1.
    pub octave_scale: f32,
    /// Side of the square tiles fed to the gradient function.
    pub tile_size: usize,
}

impl Default for DreamParams {
    fn default() -> Self {
        Self {
            iterations: 10,
            step_size: 1.5,
            octave_count: 5,
            octave_scale: 1.4,
            tile_size: 256,
        }
    }
}

impl DreamParams {
    /// Check the parameters before any pixel is touched.
    pub fn validate(&self) -> Result<(), DreamError> {
        if self.tile_size == 0 {
            return Err(DreamError::InvalidTileSize(self.tile_size));
        }
        if self.octave_count == 0 {
            return Err(DreamError::InvalidOctaveCount(self.octave_count));
        }
        // also rejects NaN
        if !(self.octave_scale > 1.0 && self.octave_scale.is_finite()) {
            return Err(DreamError::InvalidOctaveScale(self.octave_scale));
        }
        if !(self.step_size > 0.0 && self.step_size.is_finite()) {
            return Err(DreamError::InvalidStepSize(self.step_size));
        }
        Ok(())
    }
}

/// Parameters of the multi-frame driver.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameParams {
    /// Number of frames to render.
    pub frames: usize,
    /// Zoom applied to the previous frame before rendering, only used when greater than 1.
    pub frame_scale: f32,
    /// Center crop every zoomed frame back to the starting resolution.
    pub frame_crop: bool,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            frames: 5,
            frame_scale: 1.0,
            frame_crop: false,
        }
    }
}

impl FrameParams {
    /// Check the parameters before the first frame.
    pub fn validate(&self) -> Result<(), DreamError> {
        if !(self.frame_scale > 0.0 && self.frame_scale.is_finite()) {
            return Err(DreamError::InvalidFrameScale(self.frame_scale));
        }
        Ok(())
    }
}
