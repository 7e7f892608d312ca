//! Three-column name/type/value table for splat data.

use super::{Theme, highlight, style, type_of};
use super::highlight::Highlight;
use crate::data::Data;

pub const MIN_COLUMN_WIDTH: usize = 10;
pub const MAX_TYPE_WIDTH: usize = 40;

/// One table row before styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub type_name: String,
    /// May contain inline markup.
    pub value: String,
}

/// Builds rows for `data`; the type column is truncated to [`MAX_TYPE_WIDTH`].
#[must_use]
pub fn rows(data: &Data) -> Vec<Row> {
    data.iter()
        .map(|(name, value)| Row {
            name: name.to_string(),
            type_name: truncate(&type_of(value), MAX_TYPE_WIDTH),
            value: match value {
                crate::Value::Rich(rich) => crate::Value::rich_or_fallback(rich.as_ref()),
                other => other.to_plain(),
            },
        })
        .collect()
}

/// Truncates to `max` chars, ending in `…` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}

/// Renders the table as lines, without a leading indent.
///
/// With `colors` off the output is plain text; otherwise names and types take
/// the theme's `log.data.*` styles and values go through highlighting.
#[must_use]
pub fn render(data: &Data, theme: &Theme, highlight: &Highlight, colors: bool) -> Vec<String> {
    let rows = rows(data);
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_COLUMN_WIDTH);
    let type_width = rows
        .iter()
        .map(|r| r.type_name.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_COLUMN_WIDTH);

    rows.iter()
        .map(|row| {
            let name = pad(&row.name, name_width);
            let type_name = pad(&row.type_name, type_width);
            let line = if colors {
                let value = highlight::inject_tags(&row.value, highlight);
                format!(
                    "{}  {}  {}",
                    theme.get("log.data.name").paint(&name),
                    theme.get("log.data.type").paint(&type_name),
                    style::render(&style::parse(&value), theme)
                )
            } else {
                format!("{name}  {type_name}  {}", style::strip_tags(&row.value))
            };
            line.trim_end().to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splat;

    #[test]
    fn plain_columns_align() {
        let data = splat! { host = "example.com", port = 8080 };
        let lines = render(&data, &Theme::default(), &Highlight::default(), false);
        assert_eq!(
            lines,
            vec![
                "host        str         example.com",
                "port        int         8080",
            ]
        );
    }

    #[test]
    fn long_types_are_truncated() {
        let t = truncate(&"x".repeat(50), MAX_TYPE_WIDTH);
        assert_eq!(t.chars().count(), MAX_TYPE_WIDTH);
        assert!(t.ends_with('…'));
    }
}
