//! Removal of provider citation markers (`【4:0†file.pdf】`) from model output.

use regex::Regex;
use std::sync::LazyLock;

static CITATION_WITH_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"【\s*[0-9]+:[0-9]+†([^】]+)】").expect("valid citation regex")
});

static CITATION_SHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【\s*[0-9]+†([^】]+)】").expect("valid citation regex"));

static ANY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【[^】]*】").expect("valid marker regex"));

static TRAILING_BLANKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("valid whitespace regex"));

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

/// Reduce citation markers to their source name and tidy whitespace.
///
/// Markers of the form `【n:m†source】` and `【n†source】` keep `source`;
/// any other `【...】` span is dropped. Afterwards trailing blanks before a
/// newline are removed, runs of three or more newlines collapse to two and
/// the result is trimmed.
pub fn sanitize_citations(s: &str) -> String {
    // Source-preserving forms must run before the catch-all.
    let out = CITATION_WITH_INDEX.replace_all(s, "${1}");
    let out = CITATION_SHORT.replace_all(&out, "${1}");
    let out = ANY_MARKER.replace_all(&out, "");
    let out = TRAILING_BLANKS.replace_all(&out, "\n");
    let out = EXCESS_NEWLINES.replace_all(&out, "\n\n");
    out.trim().to_string()
}
