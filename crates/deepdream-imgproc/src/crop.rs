use deepdream_image::{Image, ImageError, ImageSize};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

fn check_region<T, const C: usize>(
    image: &Image<T, C>,
    x: usize,
    y: usize,
    size: ImageSize,
) -> Result<(), ImageError> {
    if x + size.width > image.width() || y + size.height > image.height() {
        return Err(ImageError::RegionOutOfBounds(
            x,
            y,
            size.width,
            size.height,
            image.width(),
            image.height(),
        ));
    }
    Ok(())
}

/// Crop an image to a specified region.
///
/// The size of the region is the size of `dst`.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image to store the cropped image.
/// * `x` - The x-coordinate of the top-left corner of the region to crop.
/// * `y` - The y-coordinate of the top-left corner of the region to crop.
///
/// # Examples
///
/// ```rust
/// use deepdream_image::{Image, ImageSize};
/// use deepdream_imgproc::crop::crop_image;
///
/// let image = Image::<_, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let mut cropped = Image::<_, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 0u8).unwrap();
///
/// crop_image(&image, &mut cropped, 1, 1).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 9, 10]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    check_region(src, x, y, dst.size())?;

    let dst_cols = dst.cols();
    if dst_cols == 0 {
        return Ok(());
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            // get the slice at the top left corner
            let offset = (y + i) * src.cols() * C + x * C;
            let src_slice = &src.as_slice()[offset..offset + dst_cols * C];

            // copy the slice to the destination
            dst_row.copy_from_slice(src_slice);
        });

    Ok(())
}

/// Copy `src` into the region of `dst` whose top-left corner is `(x, y)`.
///
/// Pixels of `dst` outside the region are left untouched.
pub fn paste_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    check_region(dst, x, y, src.size())?;

    let src_cols = src.cols();
    if src_cols == 0 {
        return Ok(());
    }
    let dst_cols = dst.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .skip(y)
        .zip(src.as_slice().par_chunks_exact(src_cols * C))
        .for_each(|(dst_row, src_row)| {
            dst_row[x * C..(x + src_cols) * C].copy_from_slice(src_row);
        });

    Ok(())
}

/// Crop the centered region of `size` from an image.
///
/// The region starts at `(width / 2 - size.width / 2, height / 2 - size.height / 2)`.
///
/// # Errors
///
/// Returns [`ImageError::RegionOutOfBounds`] if `size` is larger than the image.
pub fn center_crop<T, const C: usize>(
    src: &Image<T, C>,
    size: ImageSize,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    if size.width > src.width() || size.height > src.height() {
        return Err(ImageError::RegionOutOfBounds(
            0,
            0,
            size.width,
            size.height,
            src.width(),
            src.height(),
        ));
    }
    let x = src.width() / 2 - size.width / 2;
    let y = src.height() / 2 - size.height / 2;

    let mut dst = Image::from_size_val(size, T::default())?;
    crop_image(src, &mut dst, x, y)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop() -> Result<(), ImageError> {
        let image_size = ImageSize {
            width: 2,
            height: 3,
        };

        #[rustfmt::skip]
        let image = Image::<_, 3>::new(
            image_size,
            vec![
                0u8, 1, 2, 3, 4, 5,
                6u8, 7, 8, 9, 10, 11,
                12u8, 13, 14, 15, 16, 17,
            ],
        )?;

        let data_expected = vec![9u8, 10, 11, 15, 16, 17];

        let crop_size = ImageSize {
            width: 1,
            height: 2,
        };

        let mut cropped = Image::<_, 3>::from_size_val(crop_size, 0u8)?;

        super::crop_image(&image, &mut cropped, 1, 1)?;

        assert_eq!(cropped.as_slice(), &data_expected);

        Ok(())
    }

    #[test]
    fn test_crop_out_of_bounds() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            0,
        )?;
        let mut cropped = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;
        assert_eq!(
            crop_image(&image, &mut cropped, 2, 0),
            Err(ImageError::RegionOutOfBounds(2, 0, 2, 2, 3, 3))
        );
        Ok(())
    }

    #[test]
    fn test_paste_only_touches_region() -> Result<(), ImageError> {
        let mut canvas = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 3,
            },
            0,
        )?;
        let patch = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1, 2, 3, 4],
        )?;

        paste_image(&patch, &mut canvas, 1, 1)?;

        #[rustfmt::skip]
        let expected = [
            0u8, 0, 0, 0,
            0u8, 1, 2, 0,
            0u8, 3, 4, 0,
        ];
        assert_eq!(canvas.as_slice(), &expected);
        Ok(())
    }

    #[test]
    fn test_center_crop() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_fn(
            ImageSize {
                width: 5,
                height: 4,
            },
            |[y, x, _]| (y * 5 + x) as u8,
        );
        let cropped = center_crop(
            &image,
            ImageSize {
                width: 2,
                height: 2,
            },
        )?;
        // offsets: x = 5/2 - 2/2 = 1, y = 4/2 - 2/2 = 1
        assert_eq!(cropped.as_slice(), &[6, 7, 11, 12]);
        Ok(())
    }
}
