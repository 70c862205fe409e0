use deepdream_image::Image;

/// Kernel for bilinear interpolation
///
/// The neighbours of `(u, v)` are clamped to the last column and row, so sampling
/// exactly on (or past) the far border repeats the edge pixel.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values.
pub fn bilinear_interpolation<const C: usize>(image: &Image<f32, C>, u: f32, v: f32) -> [f32; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let iu = u.trunc() as usize;
    let iv = v.trunc() as usize;

    let iu0 = iu.min(cols - 1);
    let iv0 = iv.min(rows - 1);

    let frac_u = u.fract();
    let frac_v = v.fract();

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let base00 = (iv0 * cols + iu0) * C;
    let base01 = (iv0 * cols + iu1) * C;
    let base10 = (iv1 * cols + iu0) * C;
    let base11 = (iv1 * cols + iu1) * C;

    let data = image.as_slice();

    let p00 = &data[base00..base00 + C];
    let p01 = &data[base01..base01 + C];
    let p10 = &data[base10..base10 + C];
    let p11 = &data[base11..base11 + C];

    let mut pixel = [0.0; C];
    for k in 0..C {
        pixel[k] = p00[k] * w00 + p01[k] * w01 + p10[k] * w10 + p11[k] * w11;
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::bilinear_interpolation;
    use approx::assert_relative_eq;
    use deepdream_image::{Image, ImageError, ImageSize};

    #[test]
    fn interpolates_between_corners() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0, 1.0, 2.0, 3.0],
        )?;

        assert_eq!(bilinear_interpolation(&image, 0.0, 0.0), [0.0]);
        assert_eq!(bilinear_interpolation(&image, 1.0, 1.0), [3.0]);
        assert_relative_eq!(bilinear_interpolation(&image, 0.5, 0.5)[0], 1.5);
        assert_relative_eq!(bilinear_interpolation(&image, 0.25, 0.0)[0], 0.25);
        Ok(())
    }

    #[test]
    fn clamps_past_the_border() -> Result<(), ImageError> {
        let image = Image::<f32, 2>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1.0, 10.0, 3.0, 30.0],
        )?;

        let pixel = bilinear_interpolation(&image, 1.5, 0.0);
        assert_relative_eq!(pixel[0], 3.0);
        assert_relative_eq!(pixel[1], 30.0);
        Ok(())
    }
}
