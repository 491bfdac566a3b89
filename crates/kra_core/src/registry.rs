use tracing::debug;

use crate::handlers::{KraHandler, PngHandler};
use crate::traits::FormatHandler;
use crate::types::{ColorSpace, DecodeFlags, DecodedImage, FileType};

/// Ordered table of [`FormatHandler`]s tried one after another.
#[derive(Default)]
pub struct FormatRegistry {
    handlers: Vec<Box<dyn FormatHandler>>,
}

impl FormatRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Krita first, then PNG.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(KraHandler::new());
        registry.register(PngHandler::new());
        registry
    }

    pub fn register<H: FormatHandler + 'static>(&mut self, handler: H) {
        self.handlers.push(Box::new(handler));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns the type of the first handler that recognises `data`.
    #[must_use]
    pub fn detect(&self, data: &[u8]) -> Option<FileType> {
        self.handlers
            .iter()
            .find(|handler| handler.is_format(data))
            .map(|handler| handler.file_type())
    }

    /// Loads `data` with the first handler that both recognises and decodes it.
    pub fn load(
        &self,
        data: &[u8],
        flags: DecodeFlags,
        colorspace: &mut ColorSpace,
    ) -> Option<DecodedImage> {
        for handler in &self.handlers {
            if !handler.is_format(data) {
                continue;
            }
            if let Some(image) = handler.load(data, flags, colorspace) {
                return Some(image);
            }
            debug!(format = %handler.file_type(), "handler accepted buffer but failed to load it");
        }
        None
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|handler| handler.file_type()))
            .finish()
    }
}
