use std::fs;
use std::path::Path;

const RT_FILES: [&str; 6] = ["rt.rs", "osc.rs", "reader.rs", "lfo.rs", "states.rs", "params.rs"];

/// Ensure RT modules do not call the non-RT `assert_invariant` which acquires a Mutex.
#[test]
fn rt_does_not_call_assert_invariant() {
    for file in RT_FILES {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(file);
        let src = fs::read_to_string(&path).expect("failed to read RT source");
        assert!(
            !src.contains("assert_invariant("),
            "{} must not call assert_invariant (acquires Mutex). Signal through invariant_rt instead.",
            file
        );
    }
}

/// Ensure RT modules do not log.
#[test]
fn block_path_does_not_log() {
    for file in ["osc.rs", "reader.rs", "lfo.rs", "states.rs", "params.rs"] {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(file);
        let src = fs::read_to_string(&path).expect("failed to read RT source");
        let body = src.split("#[cfg(test)]").next().unwrap_or_default();
        for macro_name in ["tracing::info!", "tracing::warn!", "tracing::trace!", "println!", "eprintln!"] {
            assert!(!body.contains(macro_name), "{} uses {}", file, macro_name);
        }
    }
}
