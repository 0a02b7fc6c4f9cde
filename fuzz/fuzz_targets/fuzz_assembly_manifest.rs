#![no_main]

use libfuzzer_sys::fuzz_target;
use stackdev::domain::services::AssemblyManifest;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(manifest) = AssemblyManifest::parse(content) {
            let _ = manifest.units();
        }
    }
});
