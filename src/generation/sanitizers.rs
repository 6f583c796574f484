//! Text clean-up for doc comments in generated code

use once_cell::sync::Lazy;
use regex::Regex;

static SMART_PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}\u{2014}]").expect("valid regex")
});
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

/// Normalizes spec prose for use inside line comments
///
/// Smart quotes and em-dashes become ASCII, runs of blanks collapse to one
/// space and trailing whitespace is dropped. Line breaks are kept.
///
/// # Examples
/// ```
/// use apigen::generation::sanitizers::sanitize_doc;
///
/// let output = sanitize_doc("A \u{201C}smart\u{201D}   quote\u{2014}here");
/// assert_eq!(output, "A \"smart\" quote-here");
/// ```
pub fn sanitize_doc(input: &str) -> String {
    input
        .lines()
        .map(|line| {
            let ascii = SMART_PUNCTUATION.replace_all(line, |caps: &regex::Captures| {
                match &caps[0] {
                    "\u{2018}" | "\u{2019}" => "'",
                    "\u{201C}" | "\u{201D}" => "\"",
                    _ => "-",
                }
            });
            WHITESPACE.replace_all(ascii.trim_end(), " ").into_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefixes every line with `// `; blank lines become a bare `//`
pub fn commented_lines(input: &str) -> String {
    input
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                "//".to_string()
            } else {
                format!("// {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
