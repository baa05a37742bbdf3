#![no_main]

use covergrid_settings::{CountSettings, CoverageRequest, FileFormat};
use libfuzzer_sys::fuzz_target;

const MAX_INPUT_SIZE: usize = 16 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(settings) = CountSettings::from_toml(text) {
        if settings.unbounded_enumeration {
            assert_eq!(settings.limit(), None);
        } else {
            assert_eq!(settings.limit(), Some(settings.enumeration_limit));
        }
    }
    let _ = FileFormat::Toml.parse::<CoverageRequest>(text);
    let _ = FileFormat::Json.parse::<CoverageRequest>(text);
});
