use rayon::prelude::*;

use deepdream_image::Image;

/// Apply a function to each row of the destination image in parallel.
///
/// The closure receives the row index and the interleaved pixel data of that row
/// (`cols * C` values). Each row is written by exactly one task.
pub fn par_iter_rows_mut<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send,
{
    let row_len = C * dst.cols();
    if row_len == 0 {
        return;
    }
    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(row, dst_row)| f(row, dst_row));
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepdream_image::{ImageError, ImageSize};

    #[test]
    fn rows_receive_their_index() -> Result<(), ImageError> {
        let mut image = Image::<usize, 2>::from_size_val(
            ImageSize {
                width: 3,
                height: 4,
            },
            0,
        )?;
        par_iter_rows_mut(&mut image, |row, data| {
            data.iter_mut().for_each(|v| *v = row);
        });
        assert_eq!(image.get_pixel(2, 3, 1), Some(&3));
        assert_eq!(image.get_pixel(0, 1, 0), Some(&1));
        Ok(())
    }
}
