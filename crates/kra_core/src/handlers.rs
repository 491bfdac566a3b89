use tracing::debug;

use crate::kra::KraLoader;
use crate::raster::PngDecoder;
use crate::traits::{FormatHandler, RasterDecoder};
use crate::types::{ColorSpace, DecodeFlags, DecodedImage, FileType};

/// Krita documents, loaded through their merged preview.
#[derive(Debug, Clone, Default)]
pub struct KraHandler {
    loader: KraLoader,
}

impl KraHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_loader(loader: KraLoader) -> Self {
        Self { loader }
    }
}

impl FormatHandler for KraHandler {
    fn file_type(&self) -> FileType {
        FileType::Kra
    }

    fn is_format(&self, data: &[u8]) -> bool {
        self.loader.is_krita(data)
    }

    fn load(
        &self,
        data: &[u8],
        flags: DecodeFlags,
        colorspace: &mut ColorSpace,
    ) -> Option<DecodedImage> {
        self.loader.load(data, flags, colorspace)
    }
}

/// Plain PNG files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngHandler {
    decoder: PngDecoder,
}

impl PngHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormatHandler for PngHandler {
    fn file_type(&self) -> FileType {
        FileType::Png
    }

    fn is_format(&self, data: &[u8]) -> bool {
        PngDecoder::matches(data)
    }

    fn load(
        &self,
        data: &[u8],
        flags: DecodeFlags,
        colorspace: &mut ColorSpace,
    ) -> Option<DecodedImage> {
        match self.decoder.decode(data, flags, colorspace) {
            Ok(image) => Some(image),
            Err(e) => {
                debug!(error = %e, "png not loaded");
                None
            }
        }
    }
}
