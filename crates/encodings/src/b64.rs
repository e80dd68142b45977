use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encodes bytes with the standard alphabet and `=` padding.
pub fn to_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes standard, padded base64.
///
/// Malformed input decodes to an empty buffer.
pub fn from_base64(encoded: &str) -> Vec<u8> {
    STANDARD.decode(encoded).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base64_padding() {
        assert_eq!(to_base64(b""), "");
        assert_eq!(to_base64(b"f"), "Zg==");
        assert_eq!(to_base64(b"fo"), "Zm8=");
        assert_eq!(to_base64(b"foo"), "Zm9v");
        assert_eq!(to_base64(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn test_from_base64() {
        assert_eq!(from_base64("Zm9vYmFy"), b"foobar");
        assert_eq!(from_base64("Zg=="), b"f");
    }

    #[test]
    fn test_from_base64_invalid_is_empty() {
        assert!(from_base64("Zm9v!").is_empty());
        assert!(from_base64("Zg").is_empty());
    }

    #[test]
    fn test_binary_payload() {
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(from_base64(&to_base64(&data)), data);
    }
}
