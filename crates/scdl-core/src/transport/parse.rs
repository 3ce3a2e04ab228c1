//! Parse HTTP response header lines into ResponseHead.

use super::ResponseHead;

/// Fold one raw header line into `head`.
///
/// A status line starts a new response (libcurl reports interim `100
/// Continue` heads too), so it resets everything collected so far.
pub(crate) fn apply_header_line(head: &mut ResponseHead, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    if is_status_line(line) {
        let status = line
            .split_whitespace()
            .nth(1)
            .and_then(|code| code.parse::<u32>().ok())
            .unwrap_or(0);
        *head = ResponseHead {
            status,
            ..ResponseHead::default()
        };
        return;
    }
    if let Some((name, value)) = line.split_once(':') {
        let name = name.trim();
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            head.content_length = value.parse::<u64>().ok();
        }
        if name.eq_ignore_ascii_case("location") && !value.is_empty() {
            head.location = Some(value.to_string());
        }
    }
}

/// Header values are not guaranteed to be ASCII, so compare bytes.
fn is_status_line(line: &str) -> bool {
    line.as_bytes()
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"HTTP/"))
}

/// Parse collected header lines into ResponseHead.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead::default();
    for line in lines {
        apply_header_line(&mut head, line);
    }
    head
}
