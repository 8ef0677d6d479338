//! Text value escaping (RFC 6350 §3.4 / RFC 2426 §5).

/// Escapes a text value so the emitted field stays on a single logical line.
///
/// Backslash, comma, and semicolon are backslash-escaped; newlines become
/// literal `\n`; carriage returns are dropped.
#[must_use]
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}
