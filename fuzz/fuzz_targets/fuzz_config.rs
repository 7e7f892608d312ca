#![no_main]
use libfuzzer_sys::fuzz_target;
use splatlog::Config;

fuzz_target!(|data: &str| {
    // Parsing and conversion must fail cleanly, never panic
    if let Ok(config) = Config::from_toml(data) {
        let _ = config.into_setup();
    }
});
