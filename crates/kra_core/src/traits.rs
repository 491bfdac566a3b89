//! Core traits for the collaborators the loader depends on.
//!
//! Archive reading and raster decoding sit behind these traits so the
//! sniffing and extraction logic can be driven by the production ZIP and PNG
//! backends or by test doubles that account for every handle they hand out.

use std::io::Read;

use crate::error::Result;
use crate::types::{ColorSpace, DecodeFlags, DecodedImage, FileType};

/// Opens an in-memory buffer as a read-only archive.
///
/// The returned handle borrows the buffer and is released when dropped.
///
/// # Example
///
/// ```ignore
/// struct MemoryArchives;
///
/// impl ArchiveReader for MemoryArchives {
///     type Archive<'a> = MemoryArchive<'a>;
///
///     fn open<'a>(&self, data: &'a [u8]) -> Result<MemoryArchive<'a>> {
///         MemoryArchive::parse(data)
///     }
/// }
/// ```
pub trait ArchiveReader {
    type Archive<'a>: Archive;

    /// Opens `data` as an archive. Fails for anything that is not one.
    fn open<'a>(&self, data: &'a [u8]) -> Result<Self::Archive<'a>>;
}

/// An open archive handle.
///
/// Entry streams borrow the handle mutably, so a stream can never outlive the
/// archive it was opened from and at most one is open at a time.
pub trait Archive {
    type Entry<'e>: Read
    where
        Self: 'e;

    /// Returns the decompressed size of the named entry.
    ///
    /// # Errors
    ///
    /// [`crate::CoreError::NotFound`] when the archive has no such entry.
    fn entry_size(&mut self, name: &str) -> Result<u64>;

    /// Opens the named entry for reading. Dropping the stream closes it.
    fn open_entry(&mut self, name: &str) -> Result<Self::Entry<'_>>;
}

/// Decodes raw bytes into an in-memory image.
pub trait RasterDecoder {
    /// Decodes `data` using `flags`.
    ///
    /// `colorspace` is an in/out hint: implementations fill it in when it is
    /// still [`ColorSpace::Unset`] and leave a caller-provided value alone.
    fn decode(
        &self,
        data: &[u8],
        flags: DecodeFlags,
        colorspace: &mut ColorSpace,
    ) -> Result<DecodedImage>;
}

/// One entry in a format-dispatch table.
///
/// Dispatchers call [`FormatHandler::is_format`] speculatively on every
/// candidate buffer, so it must be cheap and must never fail loudly.
/// [`FormatHandler::load`] reports every failure as `None`, which tells the
/// dispatcher to move on to the next handler.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one registry can serve many threads.
pub trait FormatHandler: Send + Sync {
    /// The tag this handler stamps on the images it produces.
    fn file_type(&self) -> FileType;

    /// Returns `true` if `data` is in this handler's format.
    fn is_format(&self, data: &[u8]) -> bool;

    /// Decodes `data`, or returns `None` if it cannot be loaded as this format.
    fn load(
        &self,
        data: &[u8],
        flags: DecodeFlags,
        colorspace: &mut ColorSpace,
    ) -> Option<DecodedImage>;
}
