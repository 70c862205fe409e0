use std::path::Path;

use deepdream_image::{ops::cast_and_scale, Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit RGB.
///
/// The method tries to read from any image format supported by the image crate.
/// Grayscale images are replicated to three channels; other color types are
/// converted to RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(&file_path)?;
    let img = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let data = match img.color() {
        image::ColorType::L8 => img
            .into_luma8()
            .into_raw()
            .into_iter()
            .flat_map(|v| [v, v, v])
            .collect(),
        image::ColorType::Rgb8 => img.into_rgb8().into_raw(),
        other => {
            log::debug!("converting {other:?} image {file_path:?} to rgb8");
            img.into_rgb8().into_raw()
        }
    };

    Ok(Image::new(size, data)?)
}

/// Reads an image from the given file path as float RGB in `[0, 255]`.
///
/// # Example
///
/// ```no_run
/// use deepdream_io::functional::read_image_rgb_f32;
///
/// let image = read_image_rgb_f32("input.jpg").unwrap();
/// assert_eq!(image.num_channels(), 3);
/// ```
pub fn read_image_rgb_f32(file_path: impl AsRef<Path>) -> Result<Image<f32, 3>, IoError> {
    let image = read_image_any_rgb8(file_path)?;
    let mut image_f32 = Image::from_size_val(image.size(), 0.0f32)?;
    cast_and_scale(&image, &mut image_f32, 1.0)?;
    Ok(image_f32)
}
