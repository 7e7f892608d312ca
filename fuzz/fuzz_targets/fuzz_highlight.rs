#![no_main]
use libfuzzer_sys::fuzz_target;
use splatlog::fmt::{Highlight, inject_tags, style};

fuzz_target!(|data: &str| {
    let highlight = Highlight {
        keywords: Some("red".to_string()),
        ..Highlight::default()
    };

    // Must not panic; exercises 5 regexes + overlap logic
    let tagged = inject_tags(data, &highlight);
    let _ = style::parse(&tagged);
});
