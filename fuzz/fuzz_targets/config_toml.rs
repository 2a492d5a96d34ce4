#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(options) = howlite_loadtest::fuzzing::apply_config_from_toml(input) {
            debug_assert!(options.vus > 0);
            debug_assert!(options.run_duration().is_ok());
        }
    }
});
