#![no_main]
use libfuzzer_sys::fuzz_target;
use splatlog::Level;
use splatlog::config::parse_level_spec;

fuzz_target!(|data: &str| {
    let _ = data.parse::<Level>();
    let _ = parse_level_spec(data);
});
