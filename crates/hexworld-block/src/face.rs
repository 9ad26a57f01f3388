//! Face-visibility bitmask constants and the lenient `@f:` face-spec parser.

/// North face visible.
pub const FACE_NORTH: u32 = 1 << 0;
/// South face visible.
pub const FACE_SOUTH: u32 = 1 << 1;
/// East face visible.
pub const FACE_EAST: u32 = 1 << 2;
/// West face visible.
pub const FACE_WEST: u32 = 1 << 3;
/// Top face visible.
pub const FACE_UP: u32 = 1 << 4;
/// Bottom face visible.
pub const FACE_DOWN: u32 = 1 << 5;
/// Visibility is fixed and must not be recomputed by neighbor culling.
pub const FACE_FIX: u32 = 1 << 6;

/// Named face tokens recognized by the textual scan, in bit order.
const FACE_TOKENS: [(&str, u32); 7] = [
    ("north", FACE_NORTH),
    ("south", FACE_SOUTH),
    ("east", FACE_EAST),
    ("west", FACE_WEST),
    ("up", FACE_UP),
    ("down", FACE_DOWN),
    ("fix", FACE_FIX),
];

/// Parses a face specification into a bitmask.
///
/// A pure-digit string is taken as a literal bitmask. Anything else is
/// scanned case-insensitively for the face tokens; every token *contained*
/// in the string contributes its bit ("substring scan", not tokenization, so
/// `"northsouth"` sets bits 0 and 1). A non-numeric string containing no
/// token yields `Some(0)`; only an empty or unparseable numeric spec fails.
pub fn parse_face_spec(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse().ok();
    }
    let lower = text.to_ascii_lowercase();
    let mut mask = 0;
    for (token, bit) in FACE_TOKENS {
        if lower.contains(token) {
            mask |= bit;
        }
    }
    Some(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_spec_is_literal_mask() {
        assert_eq!(parse_face_spec("0"), Some(0));
        assert_eq!(parse_face_spec("12"), Some(12));
        assert_eq!(parse_face_spec("127"), Some(127));
    }

    #[test]
    fn test_single_tokens() {
        assert_eq!(parse_face_spec("north"), Some(FACE_NORTH));
        assert_eq!(parse_face_spec("south"), Some(FACE_SOUTH));
        assert_eq!(parse_face_spec("east"), Some(FACE_EAST));
        assert_eq!(parse_face_spec("west"), Some(FACE_WEST));
        assert_eq!(parse_face_spec("up"), Some(FACE_UP));
        assert_eq!(parse_face_spec("down"), Some(FACE_DOWN));
        assert_eq!(parse_face_spec("fix"), Some(FACE_FIX));
    }

    #[test]
    fn test_tokens_are_case_insensitive_and_concatenable() {
        assert_eq!(parse_face_spec("NorthUp"), Some(FACE_NORTH | FACE_UP));
        assert_eq!(
            parse_face_spec("updownfix"),
            Some(FACE_UP | FACE_DOWN | FACE_FIX)
        );
    }

    #[test]
    fn test_unknown_text_yields_empty_mask() {
        assert_eq!(parse_face_spec("sideways"), Some(0));
    }

    #[test]
    fn test_empty_spec_fails() {
        assert_eq!(parse_face_spec(""), None);
        assert_eq!(parse_face_spec("   "), None);
    }

    #[test]
    fn test_overflowing_numeric_spec_fails() {
        assert_eq!(parse_face_spec("99999999999999999999"), None);
    }
}
