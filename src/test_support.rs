//! Shared test fixtures

/// Absolute path of a file under `assets/test`
pub(crate) fn fixture(name: &str) -> String {
    format!("{}/assets/test/{name}", env!("CARGO_MANIFEST_DIR"))
}
