use base64::alphabet;
use base64::engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

/// Standard alphabet engine that tolerates missing or extra padding and
/// non-zero trailing bits, matching what browsers accept for `atob`.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Reverses a URL-safe Base64 string to standard Base64 format.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('-', "+").replace('_', "/")
}

/// Converts a Base64 string to URL-safe Base64 format by replacing specific characters.
pub fn url_safe_base64_apply(input: &str) -> String {
    input
        .replace('+', "-")
        .replace('/', "_")
        .replace('=', "") // Remove padding
}

/// Encodes a string to URL-safe Base64 format.
pub fn url_safe_base64_encode(input: &str) -> String {
    url_safe_base64_apply(&base64_encode(input))
}

/// Best-effort decoding of standard or URL-safe Base64 text.
///
/// Callers use this speculatively on content that may not be encoded at all,
/// so it never fails:
/// * ASCII whitespace is dropped before the length is checked, so wrapped
///   payloads decode,
/// * a length of `4n + 1` after normalisation is rejected up front,
/// * bytes that are not valid UTF-8 come back as a byte string (one `char`
///   per byte),
/// * anything that does not decode yields `input` unchanged.
pub fn safe_base64_decode(input: &str) -> String {
    let mut output: String = url_safe_base64_reverse(input)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    match output.len() % 4 {
        0 => {}
        2 => output.push_str("=="),
        3 => output.push('='),
        _ => return input.to_string(),
    }

    match FORGIVING.decode(output) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
        },
        Err(_) => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_standard() {
        assert_eq!(safe_base64_decode("aGVsbG8gd29ybGQ="), "hello world");
        assert_eq!(safe_base64_decode("aGVsbG8gd29ybGQ"), "hello world");
    }

    #[test]
    fn test_decode_url_safe() {
        // "??>" encodes to "Pz8+" in the standard alphabet
        assert_eq!(safe_base64_decode("Pz8-"), "??>");
        assert_eq!(safe_base64_decode("Pz8_"), "???");
    }

    #[test]
    fn test_decode_utf8() {
        let encoded = url_safe_base64_encode("香港 01");
        assert_eq!(safe_base64_decode(&encoded), "香港 01");
    }

    #[test]
    fn test_invalid_length_returns_input() {
        assert_eq!(safe_base64_decode("abcde"), "abcde");
        assert_eq!(safe_base64_decode("x"), "x");
    }

    #[test]
    fn test_undecodable_returns_input() {
        assert_eq!(safe_base64_decode("ss://abc"), "ss://abc");
        assert_eq!(
            safe_base64_decode("vless://uuid@host:443"),
            "vless://uuid@host:443"
        );
    }

    #[test]
    fn test_non_utf8_falls_back_to_byte_string() {
        // 0xff 0xfe is not valid UTF-8
        assert_eq!(safe_base64_decode("//4="), "\u{ff}\u{fe}");
    }

    #[test]
    fn test_multiline_payload() {
        let encoded = base64_encode("ss://a\nss://b");
        assert_eq!(safe_base64_decode(&encoded), "ss://a\nss://b");

        // wrapped every 4 chars, the way some providers ship them
        let wrapped = encoded
            .as_bytes()
            .chunks(4)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(safe_base64_decode(&wrapped), "ss://a\nss://b");
    }

    #[test]
    fn test_length_checked_after_whitespace_removed() {
        assert_eq!(safe_base64_decode("YWJj\nZGVm"), "abcdef");
        assert_eq!(safe_base64_decode(" YWJjZ\n"), " YWJjZ\n");
    }

    #[test]
    fn test_empty() {
        assert_eq!(safe_base64_decode(""), "");
    }
}
