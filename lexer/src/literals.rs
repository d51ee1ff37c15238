/// Parse a run of decimal digits. There is no sign, radix prefix or suffix.
pub fn parse_int_constant(text: &str) -> Result<i64, String> {
    text.parse::<i64>()
        .map_err(|_| format!("Integer literal out of range: {}", text))
}

/// Decode the character following a backslash inside a string literal.
///
/// Only `\n` is translated. Any other escaped character stands for itself,
/// so `\t` yields `t` and `\"` yields `"`.
pub fn decode_escape(escaped: char) -> char {
    match escaped {
        'n' => '\n',
        other => other,
    }
}
