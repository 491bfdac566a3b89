use image::{DynamicImage, ImageFormat};

use crate::error::{CoreError, Result};
use crate::traits::RasterDecoder;
use crate::types::{ColorSpace, DecodeFlags, DecodedImage, FileType};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

pub fn image_dimensions(data: &[u8]) -> Option<(usize, usize)> {
    imagesize::blob_size(data)
        .ok()
        .map(|size| (size.width, size.height))
}

/// [`RasterDecoder`] for PNG, backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngDecoder;

impl PngDecoder {
    #[inline]
    #[must_use]
    pub fn matches(data: &[u8]) -> bool {
        data.starts_with(&PNG_SIGNATURE)
    }
}

impl RasterDecoder for PngDecoder {
    fn decode(
        &self,
        data: &[u8],
        flags: DecodeFlags,
        colorspace: &mut ColorSpace,
    ) -> Result<DecodedImage> {
        if !Self::matches(data) {
            return Err(CoreError::Decode("missing PNG signature".to_string()));
        }

        let decoded = if flags.contains(DecodeFlags::HEADER_ONLY) {
            let (width, height) = image_dimensions(data)
                .ok_or_else(|| CoreError::Decode("unreadable PNG header".to_string()))?;
            let width = u32::try_from(width)
                .map_err(|_| CoreError::Decode(format!("width {width} out of range")))?;
            let height = u32::try_from(height)
                .map_err(|_| CoreError::Decode(format!("height {height} out of range")))?;
            DecodedImage::header_only(width, height, FileType::Png)
        } else {
            let pixels = image::load_from_memory_with_format(data, ImageFormat::Png)
                .map_err(|e| CoreError::Decode(e.to_string()))?;
            let pixels = if flags.contains(DecodeFlags::FLOAT_BUFFER) {
                DynamicImage::ImageRgba32F(pixels.to_rgba32f())
            } else {
                pixels
            };
            DecodedImage::from_pixels(pixels, FileType::Png)
        };

        // Integer PNG samples are display-referred.
        if colorspace.is_unset() {
            *colorspace = ColorSpace::Srgb;
        }

        Ok(decoded)
    }
}
