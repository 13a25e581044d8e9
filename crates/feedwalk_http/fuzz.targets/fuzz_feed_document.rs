#![no_main]
use libfuzzer_sys::fuzz_target;
use feedwalk_http::atom;

fuzz_target!(|data: &[u8]| {
    // Any decoded page must answer positional lookups without panicking
    if let Ok(page) = atom::parse(data) {
        for i in 0..=page.len() {
            let wire = page.at_wire(i);
            assert_eq!(wire.is_some(), page.at_causal(i).is_some());
            let _ = wire.and_then(|e| e.alternate());
        }
    }
});
