//! UTF-16LE payload transform: two bytes per code unit, no byte order mark.

use bytes::BufMut;

/// Append `text` to `buf` as UTF-16LE bytes.
pub fn put_utf16le<B: BufMut + ?Sized>(buf: &mut B, text: &str) {
    for unit in text.encode_utf16() {
        buf.put_u16_le(unit);
    }
}

/// Byte length of `text` once encoded, without allocating.
pub fn encoded_len(text: &str) -> usize {
    text.encode_utf16().count() * 2
}

/// Decode UTF-16LE bytes. Returns `None` for an odd byte count or unpaired surrogates.
pub fn decode_utf16le(bytes: &[u8]) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}
