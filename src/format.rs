//! Response formatting — turn raw model text into overlay markup.
//!
//! Only the first fenced code block is rendered; anything after it is
//! dropped. That matches how answers are consumed here: one block of
//! highlighted code, front and center. Highlighting itself happens in the
//! overlay page, keyed by the `language-*` class.

use regex::Regex;
use std::sync::LazyLock;

/// First triple-backtick fence, optionally tagged with a language name.
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```([A-Za-z0-9_+-]*)[ \t]*\r?\n(.*?)```").unwrap());

const FORMAT_ERROR_MARKUP: &str = "<div>Error formatting response.</div>";

/// Render raw model output as overlay markup.
///
/// Never fails: input with no fence is wrapped verbatim as plain markup,
/// and an inconsistent match degrades to a generic error line rather than
/// propagating anything.
pub fn format(raw: &str) -> String {
    match CODE_FENCE.captures(raw) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (language, Some(code)) => {
                let language = match language.map(|m| m.as_str()) {
                    Some("") | None => "plaintext",
                    Some(tag) => tag,
                };
                format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    language,
                    escape_html(code.as_str())
                )
            }
            _ => FORMAT_ERROR_MARKUP.to_string(),
        },
        None => format!("<div>{}</div>", escape_html(raw)),
    }
}

/// Minimal HTML escaping for text placed inside markup.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_fence_gets_language_class() {
        let markup = format("```python\nprint(1)\n```");
        assert!(markup.contains("language-python"));
        assert!(markup.contains("print(1)"));
    }

    #[test]
    fn untagged_fence_defaults_to_plaintext() {
        let markup = format("```\nsome output\n```");
        assert!(markup.contains("language-plaintext"));
        assert!(markup.contains("some output"));
    }

    #[test]
    fn plain_text_is_wrapped_without_highlighting() {
        let markup = format("no code here");
        assert_eq!(markup, "<div>no code here</div>");
        assert!(!markup.contains("language-"));
    }

    #[test]
    fn only_first_block_is_rendered() {
        let markup = format("```rust\nfirst();\n```\nprose\n```c\nsecond();\n```");
        assert!(markup.contains("language-rust"));
        assert!(markup.contains("first();"));
        assert!(!markup.contains("second();"));
    }

    #[test]
    fn code_content_is_html_escaped() {
        let markup = format("```cpp\n#include <vector>\n```");
        assert!(markup.contains("#include &lt;vector&gt;"));
        assert!(!markup.contains("<vector>"));
    }

    #[test]
    fn surrounding_prose_does_not_leak_into_the_block() {
        let markup = format("Here you go:\n```js\nf();\n```\nHope that helps!");
        assert!(markup.contains("f();"));
        assert!(!markup.contains("Hope that helps"));
    }

    #[test]
    fn never_returns_empty_markup() {
        for input in ["", "```", "``` ```", "\n\n", "```python\nx\n```"] {
            assert!(!format(input).is_empty(), "empty markup for {input:?}");
        }
    }
}
