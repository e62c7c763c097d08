//! Regex rewrite converter
//!
//! Before the event-driven transducer existed, edited HTML was turned into
//! Markdown by a fixed list of pattern rewrites. The same approach stays
//! available as [`ConversionStrategy::Legacy`](crate::converter::ConversionStrategy).
//! It is not byte-for-byte compatible with the old path: tag names must end at
//! whitespace or `>` (so `<b` never matches `<br>` or `<blockquote>`), a
//! `<pre><code>` block is fenced before inline code is rewritten, and `&amp;`
//! is decoded last.
//!
//! Rewrites run in order, case-insensitively, with `.` matching newlines.
//! Nesting is only handled where a later rule happens to see the output of an
//! earlier one; this converter is not tolerant of malformed input the way the
//! transducer is.
//!
//! ```rust
//! use editmd_converter::legacy::simple_html_to_markdown;
//!
//! let markdown = simple_html_to_markdown("<h1>Notes</h1><p>Use <code>cargo</code> &amp; <b>go</b></p>");
//! assert_eq!(markdown, "# Notes\nUse `cargo` & **go**");
//! ```

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

#[derive(Clone, Copy)]
enum Replacement {
    Template(&'static str),
    Heading,
    Quote,
}

struct Rule {
    regex: Regex,
    replacement: Replacement,
}

const RULES: &[(&str, Replacement)] = &[
    (r"<h([1-6])(?:\s[^>]*)?>(.*?)</h[1-6]>", Replacement::Heading),
    (r"<p(?:\s[^>]*)?>(.*?)</p>", Replacement::Template("$1\n\n")),
    (r"<strong(?:\s[^>]*)?>(.*?)</strong>", Replacement::Template("**$1**")),
    (r"<b(?:\s[^>]*)?>(.*?)</b>", Replacement::Template("**$1**")),
    (r"<em(?:\s[^>]*)?>(.*?)</em>", Replacement::Template("*$1*")),
    (r"<i(?:\s[^>]*)?>(.*?)</i>", Replacement::Template("*$1*")),
    (
        r#"<a\s[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#,
        Replacement::Template("[$2]($1)"),
    ),
    (
        r"<pre(?:\s[^>]*)?>\s*<code(?:\s[^>]*)?>(.*?)</code>\s*</pre>",
        Replacement::Template("```\n$1\n```"),
    ),
    (r"<code(?:\s[^>]*)?>(.*?)</code>", Replacement::Template("`$1`")),
    (
        r"<pre(?:\s[^>]*)?>(.*?)</pre>",
        Replacement::Template("```\n$1\n```"),
    ),
    (r"<li(?:\s[^>]*)?>(.*?)</li>", Replacement::Template("- $1\n")),
    (r"<[uo]l(?:\s[^>]*)?>(.*?)</[uo]l>", Replacement::Template("$1\n")),
    (r"<blockquote(?:\s[^>]*)?>(.*?)</blockquote>", Replacement::Quote),
    (r"<br(?:\s[^>]*)?/?>", Replacement::Template("\n")),
    (r"<[^>]*>", Replacement::Template("")),
];

/// Entities decoded after tags are stripped; `&amp;` last so it cannot create new ones
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

fn rules() -> &'static [Rule] {
    static RULES_CACHE: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES_CACHE.get_or_init(|| {
        RULES
            .iter()
            .filter_map(|(pattern, replacement)| {
                let regex = Regex::new(&format!("(?is){pattern}")).ok()?;
                Some(Rule {
                    regex,
                    replacement: *replacement,
                })
            })
            .collect()
    })
}

fn blank_run_regex() -> Option<&'static Regex> {
    static BLANK_RUN_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    BLANK_RUN_REGEX
        .get_or_init(|| Regex::new(r"\n{3,}").ok())
        .as_ref()
}

fn heading(caps: &Captures<'_>) -> String {
    let level = caps[1].parse::<usize>().unwrap_or(1);
    format!("\n{} {}\n", "#".repeat(level), caps[2].trim())
}

fn quote(caps: &Captures<'_>) -> String {
    let mut quoted = caps[1]
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    quoted.push('\n');
    quoted
}

impl Rule {
    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.replacement {
            Replacement::Template(template) => self.regex.replace_all(text, template),
            Replacement::Heading => self.regex.replace_all(text, heading),
            Replacement::Quote => self.regex.replace_all(text, quote),
        }
    }
}

/// Convert HTML to Markdown with the legacy rewrite rules
pub fn simple_html_to_markdown(html: &str) -> String {
    let mut text = html.to_string();
    for rule in rules() {
        let rewritten = match rule.apply(&text) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(rewritten) => rewritten,
        };
        text = rewritten;
    }

    for (entity, decoded) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, decoded);
        }
    }

    if let Some(regex) = blank_run_regex() {
        text = regex.replace_all(&text, "\n\n").into_owned();
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_get_surrounding_newlines() {
        assert_eq!(
            simple_html_to_markdown("<p>intro</p><h3 class=\"x\"> Part </h3>tail"),
            "intro\n\n### Part\ntail"
        );
    }

    #[test]
    fn test_inline_rules() {
        assert_eq!(
            simple_html_to_markdown(r#"<STRONG>a</STRONG> <i>b</i> <a class="l" href="/x">c</a>"#),
            "**a** *b* [c](/x)"
        );
    }

    #[test]
    fn test_tag_prefixes_are_not_confused() {
        assert_eq!(
            simple_html_to_markdown("<blockquote>q</blockquote><br><img src=\"i.png\">"),
            "> q"
        );
    }

    #[test]
    fn test_short_tags_leave_longer_names_alone() {
        assert_eq!(
            simple_html_to_markdown("<p><b>bold</b><br>next <i>it</i></p>"),
            "**bold**\nnext *it*"
        );
    }

    #[test]
    fn test_code_block_with_inner_code() {
        assert_eq!(
            simple_html_to_markdown("<pre><code>let x = 1;</code></pre>"),
            "```\nlet x = 1;\n```"
        );
    }

    #[test]
    fn test_bare_pre() {
        assert_eq!(simple_html_to_markdown("<pre>raw</pre>"), "```\nraw\n```");
    }

    #[test]
    fn test_list_items() {
        assert_eq!(
            simple_html_to_markdown("<ul><li>one</li><li>two</li></ul>"),
            "- one\n- two"
        );
    }

    #[test]
    fn test_multiline_blockquote() {
        assert_eq!(
            simple_html_to_markdown("<blockquote>\n  first\n\n  second\n</blockquote>"),
            "> first\n> second"
        );
    }

    #[test]
    fn test_entities_decoded_once() {
        assert_eq!(simple_html_to_markdown("&amp;lt; &lt;&gt; &quot;&#39;"), "&lt; <> \"'");
    }

    #[test]
    fn test_line_breaks_and_blank_runs() {
        assert_eq!(simple_html_to_markdown("a<br><br><br><br>b"), "a\n\nb");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(simple_html_to_markdown(""), "");
    }
}
