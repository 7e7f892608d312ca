#![no_main]
use libfuzzer_sys::fuzz_target;
use splatlog::fmt::{Theme, style};

fuzz_target!(|data: &str| {
    // Must not panic or hang on any input, including unclosed/malformed tags
    let segments = style::parse(data);
    let _ = style::render_plain(&segments);
    let _ = style::render(&segments, &Theme::default());
});
