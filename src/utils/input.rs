//! Draft text sanitization.

/// Normalize pasted or typed draft text before it is stored and rendered:
/// tabs become four spaces, carriage returns become newlines, and other
/// control characters are dropped.
pub fn sanitize_draft_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\t' {
            out.push_str("    ");
        } else if c == '\r' || c == '\n' {
            out.push('\n');
        } else if !c.is_control() {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_and_newlines_pass_through() {
        assert_eq!(sanitize_draft_text("hello world"), "hello world");
        assert_eq!(sanitize_draft_text("one\ntwo\nthree"), "one\ntwo\nthree");
    }

    #[test]
    fn tabs_and_carriage_returns_are_normalized() {
        assert_eq!(sanitize_draft_text("a\tb"), "a    b");
        assert_eq!(sanitize_draft_text("a\r\nb\rc"), "a\n\nb\nc");
    }

    #[test]
    fn other_control_characters_are_dropped() {
        assert_eq!(sanitize_draft_text("a\x07b\x00c\x1b"), "abc");
    }
}
