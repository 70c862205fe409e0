use crate::interpolation::bilinear_interpolation;
use crate::parallel::par_iter_rows_mut;
use deepdream_image::{Image, ImageError, ImageSize};

/// Size of an image shrunk by `factor` along both axes.
///
/// Each dimension is divided by `factor` and truncated toward zero, but never
/// drops below one pixel.
///
/// ```
/// use deepdream_image::ImageSize;
/// use deepdream_imgproc::resize::scaled_size;
///
/// let size = scaled_size(ImageSize { width: 300, height: 300 }, 1.4);
/// assert_eq!(size, ImageSize { width: 214, height: 214 });
/// ```
pub fn scaled_size(size: ImageSize, factor: f32) -> ImageSize {
    let scale = |dim: usize| ((dim as f32 / factor) as usize).max(1);
    ImageSize {
        width: scale(size.width),
        height: scale(size.height),
    }
}

/// Resize a float image to the size of `dst` using bilinear interpolation.
///
/// The output pixel `(y, x)` samples the source at `(y * H_in / H_out, x * W_in / W_out)`.
/// Values are neither clamped nor rounded, and identical inputs always produce
/// identical outputs.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, already allocated with the target size.
///
/// # Errors
///
/// Returns [`ImageError::EmptyImage`] if either image has no pixels.
///
/// # Example
///
/// ```
/// use deepdream_image::{Image, ImageSize};
/// use deepdream_imgproc::resize::resize_bilinear;
///
/// let image = Image::<f32, 3>::from_size_val(ImageSize { width: 4, height: 5 }, 1.0).unwrap();
///
/// let mut resized = Image::<f32, 3>::from_size_val(ImageSize { width: 2, height: 3 }, 0.0).unwrap();
///
/// resize_bilinear(&image, &mut resized).unwrap();
///
/// assert_eq!(resized.size().width, 2);
/// assert_eq!(resized.size().height, 3);
/// assert!(resized.as_slice().iter().all(|&v| v == 1.0));
/// ```
pub fn resize_bilinear<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
) -> Result<(), ImageError> {
    for image_size in [src.size(), dst.size()] {
        if image_size.area() == 0 {
            return Err(ImageError::EmptyImage(image_size.width, image_size.height));
        }
    }

    let scale_x = src.width() as f32 / dst.width() as f32;
    let scale_y = src.height() as f32 / dst.height() as f32;

    par_iter_rows_mut(dst, |row, dst_row| {
        let v = row as f32 * scale_y;
        dst_row
            .chunks_exact_mut(C)
            .enumerate()
            .for_each(|(col, dst_pixel)| {
                let u = col as f32 * scale_x;
                dst_pixel.copy_from_slice(&bilinear_interpolation(src, u, v));
            });
    });

    Ok(())
}

/// Resize a float image to `new_size`, allocating the output.
///
/// See [`resize_bilinear`] for the sampling rule.
pub fn resize<const C: usize>(
    src: &Image<f32, C>,
    new_size: ImageSize,
) -> Result<Image<f32, C>, ImageError> {
    let mut dst = Image::from_size_val(new_size, 0.0)?;
    resize_bilinear(src, &mut dst)?;
    Ok(dst)
}
