//! Krita document sniffing and merged-preview extraction.
//!
//! See <https://docs.krita.org/en/general_concepts/file_formats/file_kra.html>.

use tracing::{debug, trace};

use crate::archive::{ZipArchiveReader, read_full};
use crate::error::{CoreError, Result};
use crate::raster::PngDecoder;
use crate::traits::{Archive, ArchiveReader, RasterDecoder};
use crate::types::{ColorSpace, DecodeFlags, DecodedImage, FileType};

/// Archive entry holding the document's MIME type.
pub const MIMETYPE_ENTRY: &str = "mimetype";

/// Number of leading `mimetype` bytes compared.
pub const MIMETYPE_LEN: usize = 19;

/// Leading contents of the `mimetype` entry of a Krita document.
pub const EXPECTED_MIMETYPE: &[u8; MIMETYPE_LEN] = b"application/x-krita";

/// Archive entry holding every layer flattened into one PNG.
pub const MERGED_IMAGE_ENTRY: &str = "mergedimage.png";

/// Largest preview [`KraLoader`] allocates unless configured otherwise (1 GiB).
pub const DEFAULT_MAX_PREVIEW_SIZE: u64 = 1 << 30;

/// Sniffs and loads Krita documents through pluggable archive and raster
/// backends.
#[derive(Debug, Clone)]
pub struct KraLoader<A = ZipArchiveReader, D = PngDecoder> {
    reader: A,
    decoder: D,
    max_preview_size: u64,
}

impl KraLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(ZipArchiveReader, PngDecoder)
    }
}

impl Default for KraLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ArchiveReader, D: RasterDecoder> KraLoader<A, D> {
    #[must_use]
    pub fn with_parts(reader: A, decoder: D) -> Self {
        Self {
            reader,
            decoder,
            max_preview_size: DEFAULT_MAX_PREVIEW_SIZE,
        }
    }

    /// Caps the decompressed preview size the loader is willing to allocate.
    #[must_use]
    pub fn with_max_preview_size(mut self, max: u64) -> Self {
        self.max_preview_size = max;
        self
    }

    #[inline]
    #[must_use]
    pub fn max_preview_size(&self) -> u64 {
        self.max_preview_size
    }

    /// Returns `true` if `data` is an archive whose `mimetype` entry starts
    /// with `application/x-krita`.
    ///
    /// Never fails: anything unreadable is simply not a Krita document.
    pub fn is_krita(&self, data: &[u8]) -> bool {
        is_krita_with(&self.reader, data)
    }

    /// Extracts `mergedimage.png` and decodes it, tagging the result as
    /// [`FileType::Kra`].
    ///
    /// Every failure yields `None`; use [`KraLoader::try_load`] for the reason.
    pub fn load(
        &self,
        data: &[u8],
        flags: DecodeFlags,
        colorspace: &mut ColorSpace,
    ) -> Option<DecodedImage> {
        match self.try_load(data, flags, colorspace) {
            Ok(image) => Some(image),
            Err(e) => {
                debug!(error = %e, "krita preview not loaded");
                None
            }
        }
    }

    /// Like [`KraLoader::load`], but reports why loading failed.
    ///
    /// # Errors
    ///
    /// Fails if the buffer is not an archive, the preview entry is missing,
    /// the preview is too large to allocate, fewer bytes could be read than
    /// the archive declares, or the decoder rejects the preview.
    pub fn try_load(
        &self,
        data: &[u8],
        flags: DecodeFlags,
        colorspace: &mut ColorSpace,
    ) -> Result<DecodedImage> {
        let mut archive = self.reader.open(data)?;
        let declared = archive.entry_size(MERGED_IMAGE_ENTRY)?;
        trace!(declared, "krita merged preview size");

        let mut entry = archive.open_entry(MERGED_IMAGE_ENTRY)?;
        let mut buffer = allocate_preview(declared, self.max_preview_size)?;

        let actual = read_full(&mut entry, &mut buffer)? as u64;
        if actual != declared {
            return Err(CoreError::ShortRead {
                expected: declared,
                actual,
            });
        }

        // `buffer`, `entry` and `archive` are released in that order on return.
        let mut image = self.decoder.decode(&buffer, flags, colorspace)?;
        image.file_type = FileType::Kra;
        Ok(image)
    }
}

fn allocate_preview(declared: u64, max: u64) -> Result<Vec<u8>> {
    if declared > max {
        return Err(CoreError::PreviewTooLarge { declared, max });
    }
    let len = usize::try_from(declared).map_err(|_| CoreError::Allocation(declared))?;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| CoreError::Allocation(declared))?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// Returns `true` if `reader` opens `data` as an archive whose `mimetype`
/// entry starts with `application/x-krita`.
///
/// Never fails: anything unreadable is simply not a Krita document.
pub fn is_krita_with<A: ArchiveReader>(reader: &A, data: &[u8]) -> bool {
    let Ok(mut archive) = reader.open(data) else {
        return false;
    };
    let Ok(mut entry) = archive.open_entry(MIMETYPE_ENTRY) else {
        return false;
    };

    // Zeroed so a short read compares deterministically.
    let mut mimetype = [0u8; MIMETYPE_LEN];
    match read_full(&mut entry, &mut mimetype) {
        Ok(_) => &mimetype == EXPECTED_MIMETYPE,
        Err(e) => {
            debug!(error = %e, "failed to read krita mimetype entry");
            false
        }
    }
}

/// Returns `true` if `data` is a Krita document.
pub fn is_krita(data: &[u8]) -> bool {
    KraLoader::new().is_krita(data)
}

/// Loads the merged preview of a Krita document, or `None` if `data` cannot
/// be loaded as one.
pub fn load_krita(
    data: &[u8],
    flags: DecodeFlags,
    colorspace: &mut ColorSpace,
) -> Option<DecodedImage> {
    KraLoader::new().load(data, flags, colorspace)
}
