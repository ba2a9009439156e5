/// Strict timestamp layout (`#` marks a digit position, anything else is literal)
const LAYOUT: &[u8] = b"####-##-####:##:##";

/// Validate a strict `yyyy-MM-ddHH:mm:ss` timestamp.
///
/// The readings API takes timestamps with no separator between the date and
/// time halves; this checks that exact shape, ASCII digits only, nothing
/// more (no calendar range checks). Empty input is accepted so optional
/// fields can pass through unfilled.
pub fn is_strict_timestamp(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }

    let bytes = s.as_bytes();
    if bytes.len() != LAYOUT.len() {
        return false;
    }

    bytes
        .iter()
        .zip(LAYOUT)
        .all(|(&b, &slot)| if slot == b'#' { b.is_ascii_digit() } else { b == slot })
}
