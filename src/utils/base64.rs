use base64::{engine::general_purpose, Engine as _};

/// Decodes a Base64 string to raw bytes.
///
/// Both the standard and the URL-safe alphabets are accepted, with or
/// without padding. Returns `None` for input that is not Base64.
pub fn base64_decode_bytes(input: &str) -> Option<Vec<u8>> {
    let trimmed = input.trim().trim_end_matches('=');
    general_purpose::STANDARD_NO_PAD
        .decode(trimmed)
        .or_else(|_| general_purpose::URL_SAFE_NO_PAD.decode(trimmed))
        .ok()
}
