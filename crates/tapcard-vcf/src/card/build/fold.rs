//! Content line folding.

/// Maximum line length in octets (not characters) per RFC 6350.
const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line to the maximum octet length.
///
/// Long lines continue on the next line after a CRLF + single space, and
/// the fold point always lands on a UTF-8 character boundary. Base64 photo
/// payloads are the common case here.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + 3 * (line.len() / MAX_LINE_OCTETS));
    let mut budget = MAX_LINE_OCTETS;

    for c in line.chars() {
        let width = c.len_utf8();
        if width > budget {
            out.push_str("\r\n ");
            // Continuation lines lose one octet to the leading space.
            budget = MAX_LINE_OCTETS - 1;
        }
        out.push(c);
        budget -= width;
    }

    out
}
