use crate::parallel::par_iter_rows_mut;
use deepdream_image::{Image, ImageError};

/// Shift an image with wrap-around along both spatial axes.
///
/// The pixel at `(y, x)` in `src` lands at `((y + shift_y) mod H, (x + shift_x) mod W)` in
/// `dst`. Shifts may be negative or larger than the image, so
/// `roll(roll(img, -sy, -sx), sy, sx)` always returns `img`.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image, same size as `src`.
/// * `shift_y` - The shift along the height axis.
/// * `shift_x` - The shift along the width axis.
///
/// # Example
///
/// ```
/// use deepdream_image::{Image, ImageSize};
/// use deepdream_imgproc::roll::roll;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![1, 2, 3]).unwrap();
/// let mut rolled = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// roll(&image, &mut rolled, 0, 1).unwrap();
/// assert_eq!(rolled.as_slice(), &[3, 1, 2]);
/// ```
pub fn roll<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    shift_y: isize,
    shift_x: isize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let (rows, cols) = (src.rows(), src.cols());
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let shift_y = shift_y.rem_euclid(rows as isize) as usize;
    let split = shift_x.rem_euclid(cols as isize) as usize * C;
    let row_len = cols * C;
    let src_data = src.as_slice();

    par_iter_rows_mut(dst, |row, dst_row| {
        let src_row = (row + rows - shift_y) % rows;
        let src_row = &src_data[src_row * row_len..(src_row + 1) * row_len];
        // the last `split` values wrap around to the front
        dst_row[split..].copy_from_slice(&src_row[..row_len - split]);
        dst_row[..split].copy_from_slice(&src_row[row_len - split..]);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::roll;
    use deepdream_image::{Image, ImageError, ImageSize};

    fn ramp(width: usize, height: usize) -> Image<u32, 3> {
        Image::from_size_fn(ImageSize { width, height }, |[y, x, c]| {
            (y * 1000 + x * 10 + c) as u32
        })
    }

    #[test]
    fn roll_moves_pixels_with_wrap() -> Result<(), ImageError> {
        let image = ramp(4, 3);
        let mut rolled = Image::from_size_val(image.size(), 0)?;
        roll(&image, &mut rolled, 1, 2)?;

        for y in 0..3 {
            for x in 0..4 {
                for c in 0..3 {
                    let dst = rolled.get([(y + 1) % 3, (x + 2) % 4, c]);
                    assert_eq!(dst, image.get([y, x, c]));
                }
            }
        }
        Ok(())
    }

    #[test]
    fn roll_then_unroll_is_identity() -> Result<(), ImageError> {
        let image = ramp(5, 7);
        let mut rolled = Image::from_size_val(image.size(), 0)?;
        let mut restored = Image::from_size_val(image.size(), 0)?;

        for (sy, sx) in [(0, 0), (3, 4), (-2, 9), (700, -513), (7, 5)] {
            roll(&image, &mut rolled, sy, sx)?;
            roll(&rolled, &mut restored, -sy, -sx)?;
            assert_eq!(restored, image);
        }
        Ok(())
    }

    #[test]
    fn full_period_shift_is_identity() -> Result<(), ImageError> {
        let image = ramp(3, 2);
        let mut rolled = Image::from_size_val(image.size(), 0)?;
        roll(&image, &mut rolled, 2, 6)?;
        assert_eq!(rolled, image);
        Ok(())
    }

    #[test]
    fn size_mismatch_is_rejected() -> Result<(), ImageError> {
        let image = ramp(3, 2);
        let mut rolled = Image::<u32, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;
        assert_eq!(
            roll(&image, &mut rolled, 1, 1),
            Err(ImageError::InvalidImageSize(3, 2, 2, 2))
        );
        Ok(())
    }
}
