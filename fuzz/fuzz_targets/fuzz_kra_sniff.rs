#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let first = kra_core::is_krita(data);
    assert_eq!(first, kra_core::is_krita(data));
});
