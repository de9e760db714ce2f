//! Line format helpers.

/// Strip one trailing `\n` and then one trailing `\r`, if present.
pub fn trim_line_terminator(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

/// Turn raw line bytes (terminator included or not) into line text.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD.
pub fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(trim_line_terminator(bytes)).into_owned()
}
