use crate::error::IoError;
use deepdream_image::Image;
use jpeg_encoder::{ColorType, Encoder};
use std::path::Path;

/// Writes the given JPEG _(rgb8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG image.
/// - `image` - The tensor containing the JPEG image data
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn write_image_jpeg_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
    quality: u8,
) -> Result<(), IoError> {
    let image_size = image.size();
    let (width, height) = match (
        u16::try_from(image_size.width),
        u16::try_from(image_size.height),
    ) {
        (Ok(width), Ok(height)) => (width, height),
        _ => {
            return Err(IoError::ImageTooLarge(
                image_size.width,
                image_size.height,
            ))
        }
    };

    let encoder = Encoder::new_file(file_path, quality)?;
    encoder.encode(image.as_slice(), width, height, ColorType::Rgb)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::read_image_any_rgb8;
    use deepdream_image::ImageSize;

    #[test]
    fn write_read_jpeg() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("flat.jpg");

        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 32,
                height: 16,
            },
            128,
        )?;
        write_image_jpeg_rgb8(&file_path, &image, 98)?;

        let decoded = read_image_any_rgb8(&file_path)?;
        assert_eq!(decoded.size(), image.size());
        // a flat image survives lossy coding almost untouched
        assert!(decoded.as_slice().iter().all(|&v| v.abs_diff(128) <= 2));
        Ok(())
    }
}
