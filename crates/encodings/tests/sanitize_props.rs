use json_value_encodings::{
    from_base64, sanitize_utf8, sanitize_utf8_str, to_base64, utf8_to_wide, wide_to_string,
    wide_to_utf8,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn valid_utf8_is_unchanged(s in "\\PC{0,64}") {
        prop_assert_eq!(sanitize_utf8(s.as_bytes()), s.as_bytes().to_vec());
    }

    #[test]
    fn sanitized_bytes_are_stable(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let once = sanitize_utf8(&bytes);
        prop_assert_eq!(sanitize_utf8(&once), once.clone());
    }

    #[test]
    fn sanitized_str_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let _ = sanitize_utf8_str(&bytes);
    }

    #[test]
    fn wide_roundtrip_for_strings(s in "\\PC{0,64}") {
        let wide = utf8_to_wide(s.as_bytes());
        prop_assert_eq!(wide.len(), s.chars().count());
        prop_assert_eq!(wide_to_string(&wide), s.clone());
        prop_assert_eq!(wide_to_utf8(&wide), s.as_bytes().to_vec());
    }

    #[test]
    fn base64_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(from_base64(&to_base64(&bytes)), bytes);
    }
}

#[test]
fn test_mixed_garbage() {
    let input = b"ok \xc3\xa9 \xe0\x80\xaf \xed\x9f\xbf \xf4 end";
    assert_eq!(sanitize_utf8(input), "ok \u{e9} ? \u{d7ff} ? end".as_bytes());
}
