#![no_main]

use eurovision::country::{sanitize_country_name, CountryCatalog};
use eurovision::roster::build_roster_from_reader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the CSV loaders
    let catalog = CountryCatalog::from_reader(data).unwrap_or_default();
    let _ = build_roster_from_reader(data, &catalog);

    if let Ok(input) = std::str::from_utf8(data) {
        let token = sanitize_country_name(input);
        assert_eq!(sanitize_country_name(&token), token);
    }
});
