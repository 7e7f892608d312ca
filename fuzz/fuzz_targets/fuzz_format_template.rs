#![no_main]
use libfuzzer_sys::fuzz_target;
use splatlog::fmt::{FormatTemplate, interpolate};
use splatlog::splat;

fuzz_target!(|data: &str| {
    // Must not panic on any template string
    let template = FormatTemplate::parse(data);

    let values = splat! { host = "example.com", port = 8080, ok = true, x = None::<i64> };
    let _ = template.render(&values);
    let _ = interpolate(data, &values);
});
