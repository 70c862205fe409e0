use crate::{Image, ImageError};

fn check_same_size<T, U, const C: usize>(
    src: &Image<T, C>,
    dst: &Image<U, C>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }
    Ok(())
}

/// Cast the pixel data of an image to a different type.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `scale` - The scale to multiply the pixel data with.
///
/// Example:
///
/// ```
/// use deepdream_image::{Image, ImageSize};
/// use deepdream_image::ops::cast_and_scale;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0u8, 255],
/// ).unwrap();
///
/// let mut image_f32 = Image::from_size_val(image.size(), 0.0f32).unwrap();
///
/// cast_and_scale(&image, &mut image_f32, 1. / 255.0).unwrap();
///
/// assert_eq!(image_f32.get_pixel(0, 0, 0), Some(&0.0f32));
/// assert_eq!(image_f32.get_pixel(1, 0, 0), Some(&1.0f32));
/// ```
pub fn cast_and_scale<T, U, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<U, C>,
    scale: U,
) -> Result<(), ImageError>
where
    T: Copy + num_traits::NumCast,
    U: Copy + num_traits::NumCast + std::ops::Mul<U, Output = U>,
{
    check_same_size(src, dst)?;

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .try_for_each(|(out, &inp)| {
            let x = U::from(inp).ok_or(ImageError::CastError(
                std::any::type_name::<U>().to_string(),
            ))?;
            *out = x * scale;
            Ok::<(), ImageError>(())
        })?;

    Ok(())
}

/// Quantize a float image to 8 bits.
///
/// Values are clamped to `[0, 255]` and the fractional part is dropped.
///
/// ```
/// use deepdream_image::{Image, ImageSize};
/// use deepdream_image::ops::quantize_u8;
///
/// let image = Image::<f32, 1>::new(
///     ImageSize { width: 4, height: 1 },
///     vec![-3.0, 12.9, 254.5, 300.0],
/// ).unwrap();
///
/// let mut quantized = Image::from_size_val(image.size(), 0u8).unwrap();
/// quantize_u8(&image, &mut quantized).unwrap();
///
/// assert_eq!(quantized.as_slice(), &[0, 12, 254, 255]);
/// ```
pub fn quantize_u8<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(out, &inp)| {
            *out = inp.clamp(0.0, 255.0) as u8;
        });

    Ok(())
}

/// Add `src` to `dst` in place, pixel by pixel.
pub fn add_inplace<const C: usize>(
    dst: &mut Image<f32, C>,
    src: &Image<f32, C>,
) -> Result<(), ImageError> {
    scaled_add_inplace(dst, src, 1.0)
}

/// Compute `dst += src * alpha` in place, pixel by pixel.
pub fn scaled_add_inplace<const C: usize>(
    dst: &mut Image<f32, C>,
    src: &Image<f32, C>,
    alpha: f32,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(out, &inp)| *out += inp * alpha);

    Ok(())
}

/// Compute `dst = minuend - subtrahend`, pixel by pixel.
pub fn sub<const C: usize>(
    minuend: &Image<f32, C>,
    subtrahend: &Image<f32, C>,
    dst: &mut Image<f32, C>,
) -> Result<(), ImageError> {
    check_same_size(minuend, subtrahend)?;
    check_same_size(minuend, dst)?;

    dst.as_slice_mut()
        .iter_mut()
        .zip(minuend.as_slice().iter().zip(subtrahend.as_slice().iter()))
        .for_each(|(out, (&a, &b))| *out = a - b);

    Ok(())
}

/// Mean of the absolute pixel values over all channels.
///
/// The sum is accumulated in `f64`. An image without pixels has a mean of zero.
pub fn mean_abs<const C: usize>(src: &Image<f32, C>) -> f32 {
    let n = src.numel();
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = src.as_slice().iter().map(|&v| v.abs() as f64).sum();
    (sum / n as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageSize;
    use approx::assert_relative_eq;

    fn size() -> ImageSize {
        ImageSize {
            height: 2,
            width: 1,
        }
    }

    #[test]
    fn test_cast_and_scale() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(size(), vec![0u8, 0, 255, 0, 0, 255])?;

        let mut image_f64: Image<f64, 3> = Image::from_size_val(image.size(), 0.0)?;

        super::cast_and_scale(&image, &mut image_f64, 1. / 255.0)?;

        assert_eq!(image_f64.as_slice(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);

        Ok(())
    }

    #[test]
    fn test_size_mismatch() -> Result<(), ImageError> {
        let a = Image::<f32, 1>::from_size_val(size(), 1.0)?;
        let mut b = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;
        assert_eq!(
            add_inplace(&mut b, &a),
            Err(ImageError::InvalidImageSize(1, 2, 2, 2))
        );
        Ok(())
    }

    #[test]
    fn test_sub_then_add_restores() -> Result<(), ImageError> {
        let a = Image::<f32, 3>::new(size(), vec![1.5, -2.0, 3.0, 4.0, 0.25, 8.0])?;
        let b = Image::<f32, 3>::new(size(), vec![0.5, 1.0, -1.0, 2.0, 0.25, 3.0])?;

        let mut diff = Image::<f32, 3>::from_size_val(size(), 0.0)?;
        sub(&a, &b, &mut diff)?;
        assert_eq!(diff.as_slice(), &[1.0, -3.0, 4.0, 2.0, 0.0, 5.0]);

        let mut restored = b.clone();
        add_inplace(&mut restored, &diff)?;
        assert_eq!(restored.as_slice(), a.as_slice());
        Ok(())
    }

    #[test]
    fn test_scaled_add_and_mean_abs() -> Result<(), ImageError> {
        let mut dst = Image::<f32, 3>::from_size_val(size(), 1.0)?;
        let src = Image::<f32, 3>::new(size(), vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0])?;

        assert_relative_eq!(mean_abs(&src), 2.0);

        scaled_add_inplace(&mut dst, &src, 0.5)?;
        assert_eq!(dst.as_slice(), &[1.5, 0.5, 2.0, 0.0, 2.5, -0.5]);
        Ok(())
    }
}
