use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::error::TextureError;

/// Raw 8-bit pixels of a decoded image file.
///
/// Rows are stored bottom-up (the file is flipped on load) so that texture
/// coordinate v = 0 addresses the bottom edge of the picture.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Expand to RGBA. `None` for channel counts other than 3 and 4, or when
    /// the buffer length does not match the dimensions.
    pub fn to_rgba(&self) -> Option<RgbaImage> {
        match self.channels {
            4 => RgbaImage::from_raw(self.width, self.height, self.pixels.clone()),
            3 => {
                if self.pixels.len() != self.width as usize * self.height as usize * 3 {
                    return None;
                }
                let rgba = self
                    .pixels
                    .chunks_exact(3)
                    .flat_map(|p| [p[0], p[1], p[2], 255])
                    .collect();
                RgbaImage::from_raw(self.width, self.height, rgba)
            }
            _ => None,
        }
    }
}

pub fn load_binary(path: &Path) -> Result<Vec<u8>, TextureError> {
    std::fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode an image file, flipped vertically, keeping its native channel count.
///
/// Only 3 (RGB) and 4 (RGBA) channel images are accepted; anything else is
/// reported as [`TextureError::UnsupportedChannels`].
pub fn decode_image(path: &Path) -> Result<DecodedImage, TextureError> {
    let bytes = load_binary(path)?;
    let img = image::load_from_memory(&bytes).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    from_dynamic(img.flipv())
}

pub fn from_dynamic(img: DynamicImage) -> Result<DecodedImage, TextureError> {
    let channels = img.color().channel_count();
    let (width, height) = (img.width(), img.height());
    let pixels = match channels {
        3 => img.into_rgb8().into_raw(),
        4 => img.into_rgba8().into_raw(),
        other => return Err(TextureError::UnsupportedChannels(other)),
    };
    Ok(DecodedImage {
        width,
        height,
        channels,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba};

    use super::*;

    #[test]
    fn rgb_expands_with_opaque_alpha() {
        let decoded = from_dynamic(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            2,
            1,
            Rgb([10, 20, 30]),
        )))
        .unwrap();
        assert_eq!(decoded.channels, 3);
        let rgba = decoded.to_rgba().unwrap();
        assert_eq!(rgba.into_raw(), vec![10, 20, 30, 255, 10, 20, 30, 255]);
    }

    #[test]
    fn rgba_keeps_its_alpha() {
        let decoded = from_dynamic(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            1,
            2,
            Rgba([1, 2, 3, 128]),
        )))
        .unwrap();
        assert_eq!(decoded.channels, 4);
        let rgba = decoded.to_rgba().unwrap();
        assert_eq!(rgba.dimensions(), (1, 2));
        assert_eq!(rgba.into_raw(), vec![1, 2, 3, 128, 1, 2, 3, 128]);
    }

    #[test]
    fn grayscale_is_rejected() {
        let err = from_dynamic(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            4,
            4,
            Luma([7]),
        )))
        .unwrap_err();
        assert!(matches!(err, TextureError::UnsupportedChannels(1)));
    }

    #[test]
    fn mismatched_buffer_does_not_expand() {
        let decoded = DecodedImage {
            width: 2,
            height: 2,
            channels: 3,
            pixels: vec![0; 5],
        };
        assert!(decoded.to_rgba().is_none());
    }

    #[test]
    fn huge_dimensions_do_not_wrap() {
        // 65536 * 65536 * 3 does not fit in a u32
        let decoded = DecodedImage {
            width: 1 << 16,
            height: 1 << 16,
            channels: 3,
            pixels: vec![0; 3],
        };
        assert!(decoded.to_rgba().is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = decode_image(Path::new("does/not/exist.jpg")).unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
    }
}
