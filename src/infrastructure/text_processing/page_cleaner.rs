use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHENATED_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").unwrap());

/// Normalizes the raw text of one page.
///
/// Applies NFKC, re-joins words hyphenated across line breaks, collapses runs
/// of blank lines into a single paragraph break and squeezes whitespace
/// inside each line.
pub fn clean_page_text(raw: &str) -> String {
    let normalized = raw.nfkc().collect::<String>();
    let joined = HYPHENATED_BREAK.replace_all(&normalized, "$head$tail");

    let mut out = String::with_capacity(joined.len());
    let mut pending_break: Option<&str> = None;

    for line in joined.lines().map(str::trim) {
        if line.is_empty() {
            if !out.is_empty() {
                pending_break = Some("\n\n");
            }
            continue;
        }
        if let Some(separator) = pending_break.take() {
            out.push_str(separator);
        } else if !out.is_empty() {
            out.push('\n');
        }
        push_squeezed(line, &mut out);
    }

    out
}

fn push_squeezed(line: &str, out: &mut String) {
    let mut words = line.split_whitespace();
    if let Some(first) = words.next() {
        out.push_str(first);
        for word in words {
            out.push(' ');
            out.push_str(word);
        }
    }
}
