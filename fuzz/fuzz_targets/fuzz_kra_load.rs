#![no_main]

use kra_core::{ColorSpace, DecodeFlags, FileType, KraLoader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let loader = KraLoader::new().with_max_preview_size(16 * 1024 * 1024);
    let mut colorspace = ColorSpace::Unset;
    if let Some(image) = loader.load(data, DecodeFlags::empty(), &mut colorspace) {
        assert_eq!(image.file_type, FileType::Kra);
    }
});
