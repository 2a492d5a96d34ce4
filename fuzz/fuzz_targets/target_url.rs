#![no_main]

use howlite_loadtest::args::PathAlphabet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&length, rest)) = data.split_first() else {
        return;
    };
    if let Ok(target) = std::str::from_utf8(rest) {
        let path_length = usize::from(length);
        if let Ok(request) =
            howlite_loadtest::fuzzing::generate_request_input(target, PathAlphabet::Alnum, path_length)
        {
            let token = request.path_token().unwrap_or_default();
            debug_assert_eq!(token.len(), path_length);
            debug_assert!(token.chars().all(|ch| ch.is_ascii_alphanumeric()));
            debug_assert!(request.url.query().is_none());
        }
    }
});
