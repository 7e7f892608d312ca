//! Message interpolation.
//!
//! `"Connecting to {host}"` pulls `host` out of the record's splat data.
//! `{{` and `}}` are literal braces; unknown names pass through untouched.

use crate::data::Data;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSegment {
    Literal(String),
    /// A `{name}` reference into the splat data.
    Field(String),
}

/// Parsed message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTemplate {
    segments: Vec<FormatSegment>,
}

impl FormatTemplate {
    /// Splits `template` into literal text and `{name}` placeholders.
    /// `{{` and `}}` become literal braces.
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let chars: Vec<char> = template.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '{' if chars.get(i + 1) == Some(&'{') => {
                    current.push('{');
                    i += 2;
                }
                '}' if chars.get(i + 1) == Some(&'}') => {
                    current.push('}');
                    i += 2;
                }
                '{' => {
                    let close = chars[i + 1..].iter().position(|&c| c == '}' || c == '{');
                    match close {
                        Some(off) if chars[i + 1 + off] == '}' && off > 0 => {
                            let end = i + 1 + off;
                            if !current.is_empty() {
                                segments.push(FormatSegment::Literal(std::mem::take(&mut current)));
                            }
                            segments.push(FormatSegment::Field(chars[i + 1..end].iter().collect()));
                            i = end + 1;
                        }
                        _ => {
                            current.push('{');
                            i += 1;
                        }
                    }
                }
                c => {
                    current.push(c);
                    i += 1;
                }
            }
        }

        if !current.is_empty() {
            segments.push(FormatSegment::Literal(current));
        }

        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[FormatSegment] {
        &self.segments
    }

    /// True when the template references at least one field.
    #[must_use]
    pub fn has_fields(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, FormatSegment::Field(_)))
    }

    /// Substitutes placeholders with the plain rendering of each value.
    /// Names missing from `data` are written back as `{name}`.
    #[must_use]
    pub fn render(&self, data: &Data) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                FormatSegment::Literal(s) => out.push_str(s),
                FormatSegment::Field(name) => match data.get(name) {
                    Some(value) => out.push_str(&value.to_plain()),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

/// Parses and renders in one go.
#[must_use]
pub fn interpolate(msg: &str, data: &Data) -> String {
    if !msg.contains(['{', '}']) {
        return msg.to_string();
    }
    FormatTemplate::parse(msg).render(data)
}
