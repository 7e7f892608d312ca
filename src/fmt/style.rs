//! Inline markup in messages and custom renderings: XML-like tags
//! (`<bold>`, `<red>`, `<#ff79c6>`, `<log.name>`) carry styling intent without
//! coupling to ANSI escape codes.

use super::{Color, Style, Theme};

/// Parsed segments separate content from style so the same message can render with ANSI or as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Bold(String),
    Dim(String),
    Italic(String),
    Underline(String),
    /// A theme style name, palette color name or hex code.
    Styled(String, String),
}

impl Segment {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(t)
            | Self::Bold(t)
            | Self::Dim(t)
            | Self::Italic(t)
            | Self::Underline(t)
            | Self::Styled(t, _) => t,
        }
    }

    /// ANSI rendering; style names resolve through the theme first, then the palette.
    #[must_use]
    pub fn render(&self, theme: &Theme) -> String {
        match self {
            Self::Plain(t) => t.clone(),
            Self::Bold(t) => Style::plain().bold().paint(t),
            Self::Dim(t) => Style::plain().dim().paint(t),
            Self::Italic(t) => Style::plain().italic().paint(t),
            Self::Underline(t) => Style::plain().underline().paint(t),
            Self::Styled(t, name) => {
                let themed = theme.get(name);
                if themed.is_plain() {
                    Color::named(name)
                        .map_or_else(|| t.clone(), |c| Style::plain().color(c).paint(t))
                } else {
                    themed.paint(t)
                }
            }
        }
    }
}

/// Splits `msg` into styled segments. Unclosed or unmatched tags stay literal.
#[must_use]
pub fn parse(msg: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut i = 0;
    let bytes = msg.as_bytes();

    while i < bytes.len() {
        if bytes[i] == b'<'
            && let Some(tag_end) = find_char(bytes, i + 1, b'>')
        {
            let tag_name = &msg[i + 1..tag_end];

            if !tag_name.is_empty() && !tag_name.starts_with('/') && !tag_name.contains('<') {
                let close_tag = format!("</{tag_name}>");
                if let Some(content_len) = msg[tag_end + 1..].find(&close_tag) {
                    let content_start = tag_end + 1;
                    let content_end = content_start + content_len;
                    let content = msg[content_start..content_end].to_string();

                    let segment = match tag_name.to_lowercase().as_str() {
                        "bold" | "b" => Segment::Bold(content),
                        "dim" => Segment::Dim(content),
                        "italic" | "i" => Segment::Italic(content),
                        "underline" | "u" => Segment::Underline(content),
                        _ => Segment::Styled(content, tag_name.to_string()),
                    };

                    segments.push(segment);
                    i = content_end + close_tag.len();
                    continue;
                }
            }
        }

        // Literal run up to the next '<' (a '<' that opened nothing is kept as text).
        let next_tag = find_char(bytes, i + 1, b'<').unwrap_or(bytes.len());
        push_plain(&mut segments, &msg[i..next_tag]);
        i = next_tag;
    }

    segments
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    if let Some(Segment::Plain(prev)) = segments.last_mut() {
        prev.push_str(text);
    } else {
        segments.push(Segment::Plain(text.to_string()));
    }
}

fn find_char(bytes: &[u8], start: usize, c: u8) -> Option<usize> {
    bytes
        .get(start..)?
        .iter()
        .position(|&b| b == c)
        .map(|p| start + p)
}

/// Renders parsed segments as ANSI, resolving tag names through `theme`.
#[must_use]
pub fn render(segments: &[Segment], theme: &Theme) -> String {
    segments.iter().map(|s| s.render(theme)).collect()
}

/// Uncolored console output and width calculations need clean text.
#[must_use]
pub fn render_plain(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}

/// Removes well-formed tags and keeps everything else, including stray `<`.
#[must_use]
pub fn strip_tags(msg: &str) -> String {
    render_plain(&parse(msg))
}
