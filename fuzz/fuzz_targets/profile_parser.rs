#![no_main]

use libfuzzer_sys::fuzz_target;
use perfmon_fixtures::config::FixtureConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing and validating a profile must never panic
        if let Ok(config) = FixtureConfig::from_toml_str(input) {
            if let Ok(specs) = config.datasets() {
                for spec in specs.iter().take(4) {
                    let _ = spec.header();
                    let _ = spec.row(0);
                }
            }
        }
    }
});
