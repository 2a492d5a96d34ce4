#![no_main]

use std::io::Write;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };
    let suffix = if selector % 2 == 0 { ".toml" } else { ".json" };
    let Ok(mut file) = tempfile::Builder::new().suffix(suffix).tempfile() else {
        return;
    };
    if file.write_all(body).is_err() {
        return;
    }
    let _ = howlite_loadtest::fuzzing::load_config_path_input(file.path());
});
