#![no_main]

use covergrid_core::ffi::run_json;
use libfuzzer_sys::fuzz_target;

const MAX_INPUT_SIZE: usize = 4 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let Ok(args) = std::str::from_utf8(data) else {
        return;
    };

    // Only the default enumeration limit bounds each run.
    if args.contains("enumeration") {
        return;
    }

    for mode in ["count", "check", "version"] {
        let out = run_json(mode, args);
        assert!(
            out.starts_with(r#"{"ok":true"#) || out.starts_with(r#"{"ok":false"#),
            "unexpected envelope: {out}"
        );
    }
});
