use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const DEEP_LINK_BASE: &str = "https://wa.me/";

const COUNTRY_CODE: &str = "62";

/// Characters left untouched by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Reduces a raw contact number to digits with the Indonesian country code.
pub fn normalize_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if let Some(local) = digits.strip_prefix('0') {
        format!("{COUNTRY_CODE}{local}")
    } else if digits.starts_with(COUNTRY_CODE) {
        digits
    } else {
        format!("{COUNTRY_CODE}{digits}")
    }
}

/// Builds a link that opens a chat with `number` and `message` pre-filled.
pub fn deep_link(number: &str, message: &str) -> String {
    format!(
        "{DEEP_LINK_BASE}{number}?text={}",
        utf8_percent_encode(message, URI_COMPONENT)
    )
}
