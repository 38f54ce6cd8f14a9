//! Quoting and unquoting of netrc token values.
//!
//! Double quoting lets logins and passwords carry whitespace or reserved
//! characters. Inside quotes, `\n` and `\t` decode to newline and tab;
//! any other escaped character decodes to itself.

/// Decode a raw token into its logical value.
///
/// If the token is delimited front and back by double quotes, the
/// interior is processed with a two-state escape machine; otherwise the
/// token is returned unchanged.
///
/// # Examples
///
/// ```
/// use netrc_rs::unquote;
///
/// assert_eq!(unquote(r#""pa\"ss""#), "pa\"ss");
/// assert_eq!(unquote(r#""a\nb""#), "a\nb");
/// assert_eq!(unquote("plain"), "plain");
/// ```
pub fn unquote(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < 2 || chars[0] != '"' || chars[chars.len() - 1] != '"' {
        return token.to_string();
    }

    let mut buf = String::with_capacity(chars.len() - 2);
    let mut escaped = false;
    for &ch in &chars[1..chars.len() - 1] {
        if escaped {
            buf.push(match ch {
                'n' => '\n',
                't' => '\t',
                other => other,
            });
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else {
            buf.push(ch);
        }
    }
    // A trailing lone backslash is dropped.
    buf
}

/// Encode a value as a double-quoted token that [`unquote`] decodes back
/// to the same string. Used by the canonical serialization.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
