#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(options) = howlite_loadtest::fuzzing::apply_config_from_json(data) {
        debug_assert!(options.vus > 0);
        debug_assert!(options.run_duration().is_ok());
    }
});
