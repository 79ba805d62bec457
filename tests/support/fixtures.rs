use std::fs;
use std::path::PathBuf;

/// Path of `tests/fixtures/<name>.md`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.md", name))
}

/// Contents of a digest fixture.
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}' from {:?}: {}", name, path, e))
}

/// The nine section labels as a minimal passing digest body.
#[allow(dead_code)]
pub fn snap_body(extra_lines: &[&str]) -> String {
    let mut lines: Vec<String> = ohmbudsman::digest::SNAP_LABELS
        .iter()
        .map(|label| format!("# {}", label))
        .collect();
    lines.extend(extra_lines.iter().map(|line| line.to_string()));
    lines.join("\n")
}
