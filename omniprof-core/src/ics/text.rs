//! Content-line helpers: TEXT escaping and line folding.

/// Maximum content line length in octets, excluding the line break.
const MAX_LINE_OCTETS: usize = 75;

/// Escape a TEXT value (RFC 5545 3.3.11). CR and CRLF become `\n`.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }

    out
}

/// Append a content line to `out`, folding it at 75 octets and ending with CRLF.
pub fn push_folded_line(out: &mut String, line: &str) {
    let mut octets = 0;

    for c in line.chars() {
        let len = c.len_utf8();
        if octets + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            // The leading space counts toward the continuation line
            octets = 1;
        }
        out.push(c);
        octets += len;
    }

    out.push_str("\r\n");
}
