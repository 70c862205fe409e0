use std::ops::Range;

use deepdream_image::{Image, ImageSize};
use deepdream_imgproc::{
    crop::{crop_image, paste_image},
    roll::roll,
};
use rand::Rng;

use crate::error::DreamError;

/// Split one image axis of length `dim` into tile spans of stride `tile_size`.
///
/// Tiles start at `0, tile_size, 2 * tile_size, ...` while the start is below
/// `max(dim - tile_size / 2, tile_size)`, and every span is clipped to the image. When
/// those spans stop short of the edge, one more span at the next stride step covers the
/// rest, so the spans cover `0..dim` exactly once and none is longer than `tile_size`.
///
/// # Example
///
/// ```
/// use deepdream_dream::tile_spans;
///
/// assert_eq!(tile_spans(700, 256), vec![0..256, 256..512, 512..700]);
/// assert_eq!(tile_spans(600, 256), vec![0..256, 256..512, 512..600]);
/// assert_eq!(tile_spans(300, 256), vec![0..256, 256..300]);
/// assert_eq!(tile_spans(100, 256), vec![0..100]);
/// ```
pub fn tile_spans(dim: usize, tile_size: usize) -> Vec<Range<usize>> {
    if dim == 0 || tile_size == 0 {
        return Vec::new();
    }

    let bound = dim.saturating_sub(tile_size / 2).max(tile_size);
    let mut spans = (0..bound)
        .step_by(tile_size)
        .map(|start| start..(start + tile_size).min(dim))
        .collect::<Vec<_>>();

    // the gap left by the bound is at most half a tile
    if let Some(end) = spans.last().map(|last| last.end).filter(|&end| end < dim) {
        spans.push(end..(end + tile_size).min(dim));
    }

    spans
}

/// Compute the gradient of a whole image by evaluating `grad_fn` on bounded tiles.
///
/// The image is rolled by a random shift drawn uniformly from `[0, tile_size)` on each
/// axis, cut into the tiles of [`tile_spans`], and every tile gradient is written into
/// its region of a zeroed buffer. The buffer is then rolled back by the same shift.
///
/// `grad_fn` must return an image of the same size as its input. Its errors are
/// returned as they are, converted into [`DreamError`].
///
/// # Errors
///
/// Returns [`DreamError::InvalidTileSize`] if `tile_size` is zero.
pub fn compute_tiled_gradient<F, E, R>(
    image: &Image<f32, 3>,
    grad_fn: &mut F,
    tile_size: usize,
    rng: &mut R,
) -> Result<Image<f32, 3>, DreamError>
where
    F: FnMut(&Image<f32, 3>) -> Result<Image<f32, 3>, E>,
    E: Into<DreamError>,
    R: Rng + ?Sized,
{
    if tile_size == 0 {
        return Err(DreamError::InvalidTileSize(tile_size));
    }

    let sx = rng.random_range(0..tile_size) as isize;
    let sy = rng.random_range(0..tile_size) as isize;
    log::trace!("tile shift: x={sx} y={sy}");

    let mut shifted = Image::from_size_val(image.size(), 0.0)?;
    roll(image, &mut shifted, sy, sx)?;

    let mut gradient = Image::from_size_val(image.size(), 0.0)?;

    let col_spans = tile_spans(image.width(), tile_size);
    for rows in tile_spans(image.height(), tile_size) {
        for cols in col_spans.iter() {
            log::trace!("tile: rows={rows:?} cols={cols:?}");

            let mut tile = Image::from_size_val(
                ImageSize {
                    width: cols.len(),
                    height: rows.len(),
                },
                0.0,
            )?;
            crop_image(&shifted, &mut tile, cols.start, rows.start)?;

            let tile_gradient = grad_fn(&tile).map_err(Into::<DreamError>::into)?;
            paste_image(&tile_gradient, &mut gradient, cols.start, rows.start)?;
        }
    }

    let mut unrolled = Image::from_size_val(image.size(), 0.0)?;
    roll(&gradient, &mut unrolled, -sy, -sx)?;

    Ok(unrolled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepdream_image::ImageError;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn spans_follow_stride() {
        assert_eq!(tile_spans(512, 256), vec![0..256, 256..512]);
        assert_eq!(tile_spans(1024, 512), vec![0..512, 512..1024]);
        // remainder above half a tile gets its own clipped tile
        assert_eq!(tile_spans(400, 256), vec![0..256, 256..400]);
        // remainder up to half a tile is covered one stride further
        assert_eq!(tile_spans(640, 256), vec![0..256, 256..512, 512..640]);
        assert_eq!(tile_spans(383, 256), vec![0..256, 256..383]);
        assert_eq!(tile_spans(300, 256), vec![0..256, 256..300]);
        assert_eq!(tile_spans(1, 256), vec![0..1]);
        assert!(tile_spans(0, 256).is_empty());
    }

    #[test]
    fn spans_partition_axis() {
        for tile_size in 1..40 {
            for dim in 1..130 {
                let spans = tile_spans(dim, tile_size);
                assert_eq!(spans.first().map(|s| s.start), Some(0));
                assert_eq!(spans.last().map(|s| s.end), Some(dim));
                for pair in spans.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                }
                assert!(spans.iter().all(|s| !s.is_empty()));
            }
        }
    }

    #[test]
    fn spans_never_exceed_tile_size() {
        for tile_size in 1..70 {
            for dim in 1..300 {
                assert!(tile_spans(dim, tile_size)
                    .iter()
                    .all(|s| s.len() <= tile_size));
            }
        }
    }

    #[test]
    fn zero_tile_size_is_rejected() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::from_size_val([4, 4].into(), 1.0)?;
        let mut rng = StdRng::seed_from_u64(0);
        let mut grad_fn = |img: &Image<f32, 3>| Ok::<_, ImageError>(img.clone());
        let res = compute_tiled_gradient(&image, &mut grad_fn, 0, &mut rng);
        assert!(matches!(res, Err(DreamError::InvalidTileSize(0))));
        Ok(())
    }

    #[test]
    fn gradient_error_is_forwarded() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::from_size_val([8, 8].into(), 1.0)?;
        let mut rng = StdRng::seed_from_u64(0);
        let mut grad_fn =
            |_: &Image<f32, 3>| Err::<Image<f32, 3>, _>(ImageError::CastError("boom".into()));
        let res = compute_tiled_gradient(&image, &mut grad_fn, 4, &mut rng);
        assert!(matches!(
            res,
            Err(DreamError::ImageError(ImageError::CastError(msg))) if msg == "boom"
        ));
        Ok(())
    }

    #[test]
    fn tiles_are_bounded() -> Result<(), DreamError> {
        let image = Image::<f32, 3>::from_size_val([70, 45].into(), 1.0)?;
        let mut rng = StdRng::seed_from_u64(7);
        let mut sizes = Vec::new();
        let mut grad_fn = |img: &Image<f32, 3>| {
            sizes.push(img.size());
            Ok::<_, DreamError>(img.clone())
        };
        let gradient = compute_tiled_gradient(&image, &mut grad_fn, 32, &mut rng)?;

        // 70 -> [0..32, 32..64, 64..70], 45 -> [0..32, 32..45]
        assert_eq!(sizes.len(), 6);
        assert!(sizes.iter().all(|s| s.width <= 32 && s.height <= 32));
        assert_eq!(gradient, image);
        Ok(())
    }
}
