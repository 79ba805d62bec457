//! Tests for command handlers: lint, init, version, completion, credential checks

use std::fs;

mod support;
use support::fixtures::{fixture_path, load_fixture, snap_body};
use support::harness::{output_text, TestHarness};

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// LINT COMMAND TESTS
// ============================================================================

#[test]
fn test_lint_valid_digest_with_front_matter() {
    let harness = TestHarness::new();
    let path = harness.write_file("digest_output.md", &load_fixture("valid_digest"));

    let output = harness.run(&["lint", path.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Disguised-SNAP structure ok"));
}

#[test]
fn test_lint_nine_sections_two_bullets_passes() {
    let harness = TestHarness::new();
    let body = [
        "# Section 1",
        "# Section 2",
        "# Section 3",
        "# Section 4",
        "# Section 5",
        "# Section 6",
        "# Section 7",
        "# Section 8",
        "# Section 9",
        "- 📰 First bullet.",
        "- 💡 Second bullet.",
    ]
    .join("\n");
    harness.write_file("digest.md", &body);

    let output = harness.run(&["lint", "digest.md"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_lint_extra_heading_fails_with_count() {
    let harness = TestHarness::new();
    let path = fixture_path("extra_heading");

    let output = harness.run(&["lint", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("[heading-count]"), "stderr: {}", err);
    assert!(err.contains("Expected 9 top-level headings, found 10"), "stderr: {}", err);
}

#[test]
fn test_lint_long_sentence_fails() {
    let harness = TestHarness::new();
    let path = fixture_path("long_sentence");

    let output = harness.run(&["lint", path.to_str().unwrap()]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("[sentence-length]"), "stderr: {}", err);
    assert!(err.contains("Sentence has 19 words (max 15)"), "stderr: {}", err);
}

#[test]
fn test_lint_bullet_with_two_emoji_names_line() {
    let harness = TestHarness::new();
    harness.write_file("digest.md", &snap_body(&["- 📰 Fine.", "- 🔋💡 Two emoji here."]));

    let output = harness.run(&["lint", "digest.md"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("[bullet-emoji]"), "stderr: {}", err);
    assert!(err.contains("- 🔋💡 Two emoji here."), "stderr: {}", err);
}

#[test]
fn test_lint_sixteen_word_bullet_fails() {
    let harness = TestHarness::new();
    harness.write_file(
        "digest.md",
        &snap_body(&["- 📰 one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen"]),
    );

    let output = harness.run(&["lint", "digest.md"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("[bullet-length]"));
}

#[test]
fn test_lint_skips_front_matter_comment_lines() {
    let harness = TestHarness::new();
    let content = format!(
        "---\n# generated by the nightly job\ntitle: \"Digest\"\n---\n\n{}",
        snap_body(&["- 📰 Fine."])
    );
    harness.write_file("digest.md", &content);

    let output = harness.run(&["lint", "digest.md"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_lint_uses_configured_limits() {
    let harness = TestHarness::with_config(
        r#"---
lint:
  max_sentence_words: 20
---
"#,
    );
    let path = fixture_path("long_sentence");

    let output = harness.run(&["lint", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_lint_explicit_config_flag() {
    let harness = TestHarness::new();
    harness.write_file(
        "strict.md",
        "---\nlint:\n  max_sentence_words: 3\n---\n",
    );
    harness.write_file("digest.md", &snap_body(&["Four words right here."]));

    let output = harness.run(&["--config", "strict.md", "lint", "digest.md"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Sentence has 4 words (max 3)"));
}

#[test]
fn test_lint_missing_config_flag_file_errors() {
    let harness = TestHarness::new();
    harness.write_file("digest.md", &snap_body(&[]));

    let output = harness.run(&["--config", "nope.md", "lint", "digest.md"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read config"));
}

#[test]
fn test_lint_missing_file_errors() {
    let harness = TestHarness::new();
    let output = harness.run(&["lint", "missing.md"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read digest"));
}

#[test]
fn test_lint_quiet_prints_nothing_on_success() {
    let harness = TestHarness::new();
    harness.write_file("digest.md", &snap_body(&[]));

    let output = harness.run(&["--quiet", "lint", "digest.md"]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty(), "stdout: {}", stdout(&output));
}

#[test]
fn test_lint_is_repeatable() {
    let harness = TestHarness::new();
    let path = fixture_path("extra_heading");
    let first = harness.run(&["lint", path.to_str().unwrap()]);
    let second = harness.run(&["lint", path.to_str().unwrap()]);
    assert_eq!(first.status.code(), second.status.code());
    assert_eq!(stderr(&first), stderr(&second));
}

// ============================================================================
// INIT COMMAND TESTS
// ============================================================================

#[test]
fn test_init_writes_prompt_and_keeps_existing_config() {
    let harness = TestHarness::new();
    let before = fs::read_to_string(&harness.config_path).unwrap();

    let output = harness.run(&["init"]);

    assert!(output.status.success(), "{}", output_text(&output));
    assert_eq!(fs::read_to_string(&harness.config_path).unwrap(), before);
    let prompt = fs::read_to_string(harness.path().join(".ohmbudsman/prompts/snap.md")).unwrap();
    assert!(prompt.contains("{{ labels"));
    assert!(stderr(&output).contains("--force"));
}

#[test]
fn test_init_force_overwrites_config() {
    let harness = TestHarness::new();

    let output = harness.run(&["init", "--force"]);

    assert!(output.status.success(), "{}", output_text(&output));
    let config = fs::read_to_string(&harness.config_path).unwrap();
    assert!(config.contains("lookback_hours: 24"));
    assert!(config.contains("BUTTONDOWN_TOKEN"));
}

#[test]
fn test_init_in_empty_directory() {
    let harness = TestHarness::new();
    fs::remove_dir_all(harness.path().join(".ohmbudsman")).unwrap();

    let output = harness.run(&["init"]);

    assert!(output.status.success(), "{}", output_text(&output));
    assert!(harness.config_path.exists());
    assert!(harness.path().join(".ohmbudsman/prompts/snap.md").exists());
}

// ============================================================================
// CREDENTIAL CHECKS
// ============================================================================

#[test]
fn test_run_without_tokens_names_variable() {
    let harness = TestHarness::new();
    let output = harness.run(&["run", "--dry-run"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("READWISE_TOKEN environment variable not set"));
}

#[test]
fn test_publish_without_token_names_variable() {
    let harness = TestHarness::new();
    let path = fixture_path("valid_digest");
    let output = harness.run(&["publish", path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("BUTTONDOWN_TOKEN environment variable not set"));
}

#[test]
fn test_publish_lints_before_sending() {
    let harness = TestHarness::new();
    let path = fixture_path("extra_heading");
    let output = harness.run_with_env(
        &["publish", path.to_str().unwrap()],
        &[("BUTTONDOWN_TOKEN", "bd-token")],
    );

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("failed lint; not publishing"), "stderr: {}", err);
}

#[test]
fn test_snippets_without_openai_key() {
    let harness = TestHarness::new();
    let path = fixture_path("valid_digest");
    let output = harness.run(&["snippets", path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("OPENAI_API_KEY environment variable not set"));
}

#[test]
fn test_audio_without_key_names_variable() {
    let harness = TestHarness::new();
    let script = harness.write_file("outputs/podcasts/digest_output_script.txt", "Welcome.");
    let output = harness.run(&["audio", script.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("ELEVENLABS_API_KEY environment variable not set"));
    assert!(!harness.path().join("outputs/podcasts/digest_output_script.mp3").exists());
}

#[test]
fn test_assets_without_openai_key() {
    let harness = TestHarness::new();
    let path = fixture_path("valid_digest");
    let output = harness.run(&["assets", path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("OPENAI_API_KEY environment variable not set"));
    assert!(!harness.path().join("metadata").exists());
}

// ============================================================================
// METADATA COMMAND
// ============================================================================

#[test]
fn test_metadata_appends_rows_under_one_header() {
    let harness = TestHarness::new();
    let digest = harness.write_file("output/digest_output.md", &snap_body(&["- 📰 News."]));

    for _ in 0..2 {
        let output = harness.run(&[
            "metadata",
            digest.to_str().unwrap(),
            "--pdf",
            "pdfs/digest_output.pdf",
            "--social",
            "outputs/social/digest_output.json",
        ]);
        assert!(output.status.success(), "output: {}", output_text(&output));
    }

    let index = fs::read_to_string(harness.path().join("metadata/content_index.csv")).unwrap();
    let lines: Vec<&str> = index.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "date,title,pdf_path,podcast_path,social_path,sha256,version"
    );
    assert_eq!(lines[1], lines[2]);
    assert!(lines[1].contains(",digest_output,pdfs/digest_output.pdf,,outputs/social/digest_output.json,"));
    assert!(lines[1].ends_with(",1.0"));
}

// ============================================================================
// UTILITY COMMANDS
// ============================================================================

#[test]
fn test_version() {
    let harness = TestHarness::new();
    let output = harness.run(&["version"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        format!("ohmbudsman {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_version_verbose_shows_build_info() {
    let harness = TestHarness::new();
    let output = harness.run(&["-v", "version"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("commit: "));
    assert!(out.contains("built: "));
}

#[test]
fn test_completion_bash() {
    let harness = TestHarness::new();
    let output = harness.run(&["completion", "bash"]);

    assert!(output.status.success());
    let script = stdout(&output);
    assert!(script.contains("ohmbudsman"));
    assert!(script.contains("snippets"));
}
