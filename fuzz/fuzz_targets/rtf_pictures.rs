#![no_main]

use libfuzzer_sys::fuzz_target;
use office_paste::filters::rtf::extract_image_blobs;

fuzz_target!(|data: &[u8]| {
    let rtf = String::from_utf8_lossy(data);
    for blob in extract_image_blobs(&rtf) {
        assert!(blob.hex.bytes().all(|b| b.is_ascii_hexdigit()));
        assert!(blob.to_data_uri().starts_with("data:image/"));
    }
});
