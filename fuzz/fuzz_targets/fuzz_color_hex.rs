#![no_main]
use libfuzzer_sys::fuzz_target;
use splatlog::fmt::{Color, Style};

fuzz_target!(|data: &str| {
    // Must not panic on any hex string or style spec
    let _ = Color::from_hex(data);
    let _ = Style::parse(data);
});
