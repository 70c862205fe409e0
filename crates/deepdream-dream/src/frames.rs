use std::path::PathBuf;

use deepdream_image::{ops, Image, ImageSize};
use deepdream_imgproc::{crop::center_crop, resize::resize};
use deepdream_nn::{FeatureExtractor, Objective};
use rand::Rng;

use crate::error::DreamError;
use crate::octave::render_deepdream_with;
use crate::params::{DreamParams, FrameParams};

/// The path of frame `index` for the output `prefix`, as `{prefix}_{index:05}.jpg`.
///
/// ```
/// use deepdream_dream::frame_output_path;
///
/// assert_eq!(frame_output_path("out/dream", 7).to_str(), Some("out/dream_00007.jpg"));
/// ```
pub fn frame_output_path(prefix: &str, index: usize) -> PathBuf {
    PathBuf::from(format!("{prefix}_{index:05}.jpg"))
}

fn zoomed_size(size: ImageSize, factor: f32) -> ImageSize {
    let zoom = |dim: usize| ((dim as f32 * factor) as usize).max(1);
    ImageSize {
        width: zoom(size.width),
        height: zoom(size.height),
    }
}

/// Render a sequence of deep dream frames, each one starting from the previous.
///
/// For every frame the previous result is optionally zoomed by `frames.frame_scale`
/// and center cropped back to the starting resolution, then dreamed on and quantized
/// to 8 bits. The quantized frame is handed to `on_frame` together with its index and
/// becomes the input of the next frame.
///
/// The first error aborts the whole sequence, including errors from `on_frame`.
///
/// # Returns
///
/// The last quantized frame converted back to float, or the input when no frame is rendered.
pub fn render_frames<X, R, F, E>(
    extractor: &X,
    objective: &Objective,
    image: Image<f32, 3>,
    dream: &DreamParams,
    frames: &FrameParams,
    rng: &mut R,
    mut on_frame: F,
) -> Result<Image<f32, 3>, E>
where
    X: FeatureExtractor,
    R: Rng + ?Sized,
    F: FnMut(usize, &Image<u8, 3>) -> Result<(), E>,
    E: From<DreamError>,
{
    dream.validate()?;
    frames.validate()?;

    let mut grad_fn = extractor
        .gradient_fn(objective)
        .map_err(DreamError::from)?;

    let start_size = image.size();
    let mut image = image;

    for index in 0..frames.frames {
        if frames.frame_scale > 1.0 {
            image = resize(&image, zoomed_size(image.size(), frames.frame_scale))
                .map_err(DreamError::from)?;
        }
        if frames.frame_crop {
            image = center_crop(&image, start_size).map_err(DreamError::from)?;
        }

        log::info!("frame {index}: {}", image.size());

        let dreamed = render_deepdream_with(&mut grad_fn, image, dream, rng)?;

        let mut quantized =
            Image::from_size_val(dreamed.size(), 0u8).map_err(DreamError::from)?;
        ops::quantize_u8(&dreamed, &mut quantized).map_err(DreamError::from)?;

        on_frame(index, &quantized)?;

        image = quantized.cast::<f32>().map_err(DreamError::from)?;
    }

    Ok(image)
}
