#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must produce rows or an error, never a panic,
    // and every parsed value must be finite.
    if let Ok(rows) = probe_config::parse_probe_log(data) {
        for r in rows {
            for v in [r.elapsed, r.internal, r.external].into_iter().flatten() {
                assert!(v.is_finite());
            }
        }
    }
});
