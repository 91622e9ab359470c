use base64::{engine::general_purpose, Engine as _};

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a Base64 document into UTF-8 text.
///
/// Published lists wrap the encoded body at a fixed width, so all ASCII
/// whitespace is removed before decoding.
///
/// # Arguments
/// * `input` - The Base64 encoded text, possibly spread over several lines.
///
/// # Returns
/// The decoded string, or a message describing why decoding failed.
pub fn base64_decode(input: &str) -> Result<String, String> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let decoded = general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| format!("invalid Base64 content: {}", e))?;

    String::from_utf8(decoded).map_err(|e| format!("decoded content is not UTF-8: {}", e))
}
