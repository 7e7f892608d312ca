//! Tests for markup, themes, highlighting and the data table.

use splatlog::fmt::{
    Color, Highlight, Segment, Style, Theme, inject_tags, interpolate, parse, render,
    render_plain, strip_tags, table, type_of,
};
use splatlog::{Value, splat};

#[test]
fn parse_splits_plain_and_styled_segments() {
    let segments = parse("hello <bold>world</bold>!");
    assert_eq!(
        segments,
        vec![
            Segment::Plain("hello ".to_string()),
            Segment::Bold("world".to_string()),
            Segment::Plain("!".to_string()),
        ]
    );
}

#[test]
fn parse_named_tag_as_styled_segment() {
    assert_eq!(
        parse("<log.name>hi</log.name>"),
        vec![Segment::Styled("hi".to_string(), "log.name".to_string())]
    );
}

#[test]
fn render_prefers_theme_then_palette() {
    let mut theme = Theme::empty();
    theme.set("accent", Style::plain().color(Color::new(1, 2, 3)));

    assert_eq!(
        render(&parse("<accent>hi</accent>"), &theme),
        "\x1b[38;2;1;2;3mhi\x1b[0m"
    );
    assert_eq!(
        render(&parse("<#0a141e>hi</#0a141e>"), &theme),
        "\x1b[38;2;10;20;30mhi\x1b[0m"
    );
    assert_eq!(render(&parse("<nope>hi</nope>"), &theme), "hi");
}

#[test]
fn render_plain_and_strip_tags_remove_styles() {
    let segments = parse("a<bold>b</bold>c");
    assert_eq!(render_plain(&segments), "abc");
    assert_eq!(strip_tags("a<bold>b</bold>c"), "abc");
    assert_eq!(strip_tags("1 < 2 <b>ok"), "1 < 2 <b>ok");
}

#[test]
fn style_specs() {
    let style = Style::parse("bold #4ec9b0").unwrap();
    assert_eq!(style.ansi(), "\x1b[1m\x1b[38;2;78;201;176m");
    assert!(Style::parse("").unwrap().is_plain());
    assert!(Style::parse("blinking").is_err());
    assert_eq!(Style::plain().paint("x"), "x");
}

#[test]
fn theme_level_styles_layer_over_generic() {
    let theme = Theme::default();
    let info = theme.level(splatlog::Level::Info);
    assert!(info.ansi().contains("\x1b[1m"));
    assert_ne!(info, theme.level(splatlog::Level::Error));
}

#[test]
fn highlighting_tags_numbers_keywords_and_urls() {
    let highlight = Highlight::default();
    assert_eq!(
        inject_tags("port 8080 open true", &highlight),
        "port <orange>8080</orange> open <purple>true</purple>"
    );
    let tagged = inject_tags("see https://example.com:8080/x", &highlight);
    assert!(tagged.contains("<blue>https://example.com:8080/x</blue>"));
    assert!(!tagged.contains("<orange>"));
    assert_eq!(inject_tags("port 8080", &Highlight::disabled()), "port 8080");
}

#[test]
fn interpolation_fills_placeholders() {
    let data = splat! { user = "ada", n = 2 };
    assert_eq!(interpolate("{user} has {n} keys", &data), "ada has 2 keys");
    assert_eq!(interpolate("{{literal}} {missing}", &data), "{literal} {missing}");
}

#[test]
fn type_hints() {
    assert_eq!(type_of(&Value::from("x")), "str");
    assert_eq!(type_of(&Value::from(vec![1, 2])), "list[int]");
    assert_eq!(
        type_of(&Value::List(vec![Value::from(1), Value::from("a")])),
        "list[int | str]"
    );
    assert_eq!(type_of(&Value::from(splat! { a = 1.0 })), "dict[str, float]");
    assert_eq!(type_of(&Value::List(Vec::new())), "list");
}

#[test]
fn long_values_truncate() {
    assert_eq!(table::truncate("abcdef", 4), "abc…");
    assert_eq!(table::truncate("abc", 4), "abc");
}

#[test]
fn table_widens_for_long_names() {
    let data = splat! { a_rather_long_name = 1, b = "x" };
    let lines = table::render(&data, &Theme::default(), &Highlight::default(), false);
    assert_eq!(
        lines,
        vec![
            "a_rather_long_name  int         1",
            "b                   str         x",
        ]
    );
}
