//! Console value highlighting.
//!
//! Wraps URLs, paths, quoted strings, numbers and literal keywords in color
//! tags before the markup parser runs, so the normal render path colors them.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>]+").expect("Invalid URL regex"));

static PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^<\w])((?:/|~/|\./)[\w./-]+)").expect("Invalid path regex")
});

static QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*"|'[^']*'"#).expect("Invalid quoted regex"));

static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b-?\d+(?:\.\d+)?\b").expect("Invalid number regex"));

static KEYWORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:true|false|None)\b").expect("Invalid keyword regex"));

/// Regions already wrapped in a tag are left alone.
static EXISTING_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>[^<]*</[^>]+>").expect("Invalid tag regex"));

/// Color per token kind; `None` disables that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub enabled: bool,
    pub urls: Option<String>,
    pub paths: Option<String>,
    pub quoted: Option<String>,
    pub numbers: Option<String>,
    pub keywords: Option<String>,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            enabled: true,
            urls: Some("blue".to_string()),
            paths: Some("pink".to_string()),
            quoted: Some("green".to_string()),
            numbers: Some("orange".to_string()),
            keywords: Some("purple".to_string()),
        }
    }
}

impl Highlight {
    /// Leaves values unstyled.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    const fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug)]
struct Match<'a> {
    span: Span,
    color: &'a str,
}

/// Returns `text` with highlightable tokens wrapped in `<color>` tags.
///
/// Earlier kinds win over later ones: URLs, paths, quoted, numbers, keywords.
#[must_use]
pub fn inject_tags(text: &str, highlight: &Highlight) -> String {
    if !highlight.enabled || text.is_empty() {
        return text.to_string();
    }

    let mut taken: Vec<Span> = EXISTING_TAG_REGEX
        .find_iter(text)
        .map(|m| Span {
            start: m.start(),
            end: m.end(),
        })
        .collect();
    let mut matches: Vec<Match<'_>> = Vec::new();

    let passes: [(&LazyLock<Regex>, &Option<String>, bool); 5] = [
        (&URL_REGEX, &highlight.urls, false),
        (&PATH_REGEX, &highlight.paths, true),
        (&QUOTED_REGEX, &highlight.quoted, false),
        (&NUMBER_REGEX, &highlight.numbers, false),
        (&KEYWORD_REGEX, &highlight.keywords, false),
    ];

    for (regex, color, use_group) in passes {
        let Some(color) = color.as_deref() else {
            continue;
        };
        for cap in regex.captures_iter(text) {
            let found = if use_group { cap.get(1) } else { cap.get(0) };
            let Some(m) = found else { continue };
            let span = Span {
                start: m.start(),
                end: m.end(),
            };
            if taken.iter().any(|t| span.overlaps(*t)) {
                continue;
            }
            taken.push(span);
            matches.push(Match { span, color });
        }
    }

    matches.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    let mut result = text.to_string();
    for m in matches {
        let inner = &text[m.span.start..m.span.end];
        let replacement = format!("<{}>{inner}</{}>", m.color, m.color);
        result.replace_range(m.span.start..m.span.end, &replacement);
    }
    result
}
