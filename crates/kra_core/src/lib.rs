//! Sniffing and preview loading for Krita (`.kra`) documents.
//!
//! A `.kra` file is a ZIP package. Its `mimetype` entry holds the string
//! `application/x-krita` and its `mergedimage.png` entry holds every layer
//! flattened into one PNG. This crate recognises the package and hands that
//! PNG to a raster decoder, tagging the result as [`FileType::Kra`].

pub mod archive;
mod error;
pub mod handlers;
pub mod kra;
pub mod raster;
pub mod registry;
mod traits;
mod types;

pub use archive::{ZipArchiveReader, read_full};
pub use error::{CoreError, Result};
pub use handlers::{KraHandler, PngHandler};
pub use kra::{KraLoader, is_krita, is_krita_with, load_krita};
pub use raster::{PngDecoder, image_dimensions};
pub use registry::FormatRegistry;
pub use traits::{Archive, ArchiveReader, FormatHandler, RasterDecoder};
pub use types::{ColorSpace, DecodeFlags, DecodedImage, FileType};
