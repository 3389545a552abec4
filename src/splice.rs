use crate::decode::Section;

/// `text[..=open] + "\n" + body + text[close..]`.
///
/// Everything outside the section's braces is copied byte for byte, whether
/// or not it is valid UTF-8.
pub fn splice_section(text: &[u8], section: &Section, body: &str) -> Vec<u8> {
    let head = &text[..=section.open];
    let tail = &text[section.close..];
    let mut out = Vec::with_capacity(head.len() + 1 + body.len() + tail.len());
    out.extend_from_slice(head);
    out.push(b'\n');
    out.extend_from_slice(body.as_bytes());
    out.extend_from_slice(tail);
    out
}
