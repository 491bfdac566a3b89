use image::DynamicImage;
use std::ops::{BitOr, BitOrAssign};

/// Format tag recorded on every [`DecodedImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Kra,
    Png,
    Unknown,
}

impl FileType {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Kra => "kra",
            Self::Png => "png",
            Self::Unknown => "bin",
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Kra => "KRA",
            Self::Png => "PNG",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decode options handed to a [`crate::RasterDecoder`] untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DecodeFlags(u32);

impl DecodeFlags {
    /// Read dimensions only; the result carries no pixels.
    pub const HEADER_ONLY: Self = Self(1 << 0);
    /// Produce a 32-bit float RGBA buffer.
    pub const FLOAT_BUFFER: Self = Self(1 << 1);

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DecodeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DecodeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Colour-space hint, read and written by the decoder.
///
/// Callers that know the colour space of their pixels set it up front. A
/// decoder only fills the hint in when it is still [`ColorSpace::Unset`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColorSpace {
    #[default]
    Unset,
    Srgb,
    Linear,
    Named(String),
}

impl ColorSpace {
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Srgb => Some("sRGB"),
            Self::Linear => Some("Linear"),
            Self::Named(name) => Some(name.as_str()),
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name().unwrap_or("unset"))
    }
}

/// Result of a raster decode. Owned by the caller once returned.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// `None` for header-only decodes.
    pub pixels: Option<DynamicImage>,
    pub file_type: FileType,
}

impl DecodedImage {
    #[must_use]
    pub fn from_pixels(pixels: DynamicImage, file_type: FileType) -> Self {
        Self {
            width: pixels.width(),
            height: pixels.height(),
            pixels: Some(pixels),
            file_type,
        }
    }

    #[must_use]
    pub const fn header_only(width: u32, height: u32, file_type: FileType) -> Self {
        Self {
            width,
            height,
            pixels: None,
            file_type,
        }
    }

    #[inline]
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub const fn has_pixels(&self) -> bool {
        self.pixels.is_some()
    }
}
