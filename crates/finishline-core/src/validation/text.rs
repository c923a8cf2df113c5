//! Free-text sanitization helpers.

use std::sync::OnceLock;

use regex::Regex;

static TAG_RE: OnceLock<Regex> = OnceLock::new();

/// Strip HTML tags from user-supplied free text and collapse the resulting
/// whitespace. Comments and completion notes are stored plain-text only.
pub fn strip_html(input: &str) -> String {
    let re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("static regex"));
    let without_tags = re.replace_all(input, " ");
    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_plain_text_untouched() {
        assert_eq!(strip_html("finished in 4:32"), "finished in 4:32");
    }

    #[test]
    fn test_strip_html_removes_tags() {
        assert_eq!(strip_html("<p>hello <b>world</b></p>"), "hello world");
    }

    #[test]
    fn test_strip_html_removes_script() {
        let out = strip_html("before<script>alert('x')</script>after");
        assert!(!out.contains('<'));
        assert!(out.contains("before"));
        assert!(out.contains("after"));
    }

    #[test]
    fn test_strip_html_collapses_whitespace() {
        assert_eq!(strip_html("a\n\n  <br>   b"), "a b");
    }
}
