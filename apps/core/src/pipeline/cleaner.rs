//! Text cleaner: fixed-order normalization passes applied to raw model output.
//!
//! Each pass is a fixed point once applied, so cleaning already-clean text is
//! a no-op. Empty input passes through unchanged; the cleaner never fails.

use regex::Regex;
use std::sync::LazyLock;

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("Invalid regex: fenced code block"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("Invalid regex: bold emphasis"));
static BOLD_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([^_]+)__").expect("Invalid regex: bold underscore"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("Invalid regex: italic emphasis"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("Invalid regex: inline code"));
static EXTRA_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid regex: newline runs"));
static AI_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(here's|here is|i'll|i will|i'd be happy to|as an ai|as a language model|sure|certainly|of course)[,:]?\s+",
    )
    .expect("Invalid regex: assistant prefix")
});
static AI_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*(i hope this helps|hope this helps|let me know if you have any questions|let me know if you need anything else|feel free to ask)[.!]*\s*$",
    )
    .expect("Invalid regex: assistant suffix")
});
static BANG_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!{2,}").expect("Invalid regex: exclamation runs"));
static QUESTION_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?{2,}").expect("Invalid regex: question runs"));
static DOT_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("Invalid regex: dot runs"));
static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("Invalid regex: whitespace runs"));
static BULLET_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*•]\s+").expect("Invalid regex: bullet markers"));
static NUMBERED_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+[.)]\s+").expect("Invalid regex: numbered markers"));
static SECTION_HEADER_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[A-Z][A-Z ]{2,}:\s*$").expect("Invalid regex: section header lines")
});

/// Normalizes raw model output into plain prose.
///
/// Applies, in fixed order: markdown stripping, newline collapsing, assistant
/// boilerplate removal at both ends, punctuation and character de-spamming,
/// whitespace collapsing, quote/list-marker/header stripping. Empty input is
/// returned unchanged.
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return text.to_string();
    }

    let mut out = FENCED_CODE.replace_all(text, "").into_owned();
    out = BOLD.replace_all(&out, "$1").into_owned();
    out = BOLD_UNDERSCORE.replace_all(&out, "$1").into_owned();
    out = ITALIC.replace_all(&out, "$1").into_owned();
    out = INLINE_CODE.replace_all(&out, "$1").into_owned();
    out = EXTRA_NEWLINES.replace_all(&out, "\n\n").into_owned();
    out = out.trim().to_string();
    out = strip_to_fixed_point(&out, &AI_PREFIX);
    out = strip_to_fixed_point(&out, &AI_SUFFIX);
    out = BANG_RUNS.replace_all(&out, "!").into_owned();
    out = QUESTION_RUNS.replace_all(&out, "?").into_owned();
    out = DOT_RUNS.replace_all(&out, ".").into_owned();
    out = collapse_char_runs(&out);
    out = WHITESPACE_RUNS.replace_all(&out, " ").into_owned();
    out = strip_outer_quote(&out);
    out = BULLET_MARKERS.replace_all(&out, "").into_owned();
    out = NUMBERED_MARKERS.replace_all(&out, "").into_owned();
    out = SECTION_HEADER_LINES.replace_all(&out, "").into_owned();
    out = strip_outer_blank_line(&out);
    out
}

/// Repeatedly removes pattern matches until the text stops changing.
///
/// Boilerplate phrases stack ("Sure, here's ..."), so a single removal would
/// leave the next one exposed and break the cleaner's fixed-point guarantee.
fn strip_to_fixed_point(text: &str, pattern: &Regex) -> String {
    let mut current = text.to_string();
    loop {
        let next = pattern.replace(&current, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Collapses runs of 3+ identical non-whitespace characters to one instance.
fn collapse_char_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run_char: Option<char> = None;
    let mut run_len = 0usize;

    for c in text.chars() {
        if run_char == Some(c) && !c.is_whitespace() {
            run_len += 1;
        } else {
            emit_run(&mut out, run_char, run_len);
            run_char = Some(c);
            run_len = 1;
        }
    }
    emit_run(&mut out, run_char, run_len);
    out
}

fn emit_run(out: &mut String, c: Option<char>, len: usize) {
    if let Some(c) = c {
        let count = if len >= 3 { 1 } else { len };
        for _ in 0..count {
            out.push(c);
        }
    }
}

/// Strips one leading and one trailing quote character.
fn strip_outer_quote(text: &str) -> String {
    let mut s = text;
    if let Some(rest) = s.strip_prefix(['"', '\'']) {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix(['"', '\'']) {
        s = rest;
    }
    s.to_string()
}

/// Strips a single leading and trailing blank line.
fn strip_outer_blank_line(text: &str) -> String {
    let mut s = text;
    if let Some(rest) = s.strip_prefix('\n') {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix('\n') {
        s = rest;
    }
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_unchanged() {
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_strips_fenced_code_blocks() {
        let input = "Before ```rust\nlet x = 1;\n``` after.";
        let cleaned = clean(input);
        assert!(!cleaned.contains("let x"));
        assert!(cleaned.contains("Before"));
        assert!(cleaned.contains("after"));
    }

    #[test]
    fn test_unwraps_emphasis_and_inline_code() {
        assert_eq!(clean("This is **bold** and *italic* and `code`."), "This is bold and italic and code.");
    }

    #[test]
    fn test_strips_assistant_prefix() {
        assert_eq!(clean("Here's the review you asked for."), "the review you asked for.");
        assert_eq!(clean("Sure, I can do that."), "I can do that.");
    }

    #[test]
    fn test_strips_stacked_prefixes() {
        assert_eq!(clean("Sure, here's the answer."), "the answer.");
    }

    #[test]
    fn test_strips_closing_boilerplate() {
        assert_eq!(clean("The pasta was great. I hope this helps!"), "The pasta was great.");
    }

    #[test]
    fn test_collapses_punctuation_runs() {
        assert_eq!(clean("Amazing!!! Really??? Yes..."), "Amazing! Really? Yes.");
    }

    #[test]
    fn test_collapses_character_spam() {
        assert_eq!(clean("woooow"), "wow");
        // Runs of exactly two are kept.
        assert_eq!(clean("bookkeeper"), "bookkeeper");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean("too   many    spaces"), "too many spaces");
    }

    #[test]
    fn test_strips_outer_quotes() {
        assert_eq!(clean("\"quoted response\""), "quoted response");
    }

    #[test]
    fn test_strips_leading_bullet_markers() {
        assert_eq!(clean("- first item"), "first item");
        assert_eq!(clean("1. numbered item"), "numbered item");
    }

    #[test]
    fn test_strips_all_caps_header_lines() {
        let cleaned = clean("SUMMARY SECTION:\nthe actual content.");
        assert!(!cleaned.contains("SUMMARY SECTION:"));
        assert!(cleaned.contains("the actual content."));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let inputs = [
            "Here's **the** answer!!! I hope this helps.",
            "\"Sooo good... really!!\"",
            "- A list item with `code` and *emphasis*\n\n\n\nMore text.",
            "Plain text that is already clean.",
            "CONCLUSION:\nall done here",
        ];
        for input in inputs {
            let once = clean(input);
            let twice = clean(&once);
            assert_eq!(once, twice, "clean is not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(clean("The staff was friendly."), "The staff was friendly.");
    }
}
