#![no_main]

use libfuzzer_sys::fuzz_target;
use random_list_codec::{deep_copy, BinaryListCodec};

fuzz_target!(|data: &[u8]| {
    let codec = BinaryListCodec::default();
    let Ok(list) = codec.decode(data) else {
        return;
    };

    // Pair order and duplicates may differ from the input, the structure may not
    let encoded = codec.encode(&list.arena, list.head).expect("decoded list encodes");
    let again = codec.decode(&encoded).expect("re-encoded list decodes");
    assert_eq!(again.values(), list.values());
    assert_eq!(again.random_indices(), list.random_indices());

    let copy = deep_copy(&list.arena, list.head).expect("decoded list copies");
    assert_eq!(copy.values(), list.values());
    assert_eq!(copy.random_indices(), list.random_indices());
});
