#![no_main]

use libfuzzer_sys::fuzz_target;
use random_list_codec::BinaryListCodec;

fuzz_target!(|data: &[u8]| {
    // Fuzz list decoding - test for panics, crashes, infinite loops
    let _ = BinaryListCodec::default().decode(data);
});
