use super::*;
use crate::provider::ProviderType;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_config() {
    let content = r#"---
digest:
  title: Grid Notes
  author: Desk
readwise:
  tag: energy
  lookback_hours: 48
provider:
  kind: ollama
  model: llama3.1
---

# Config
"#;
    let config = Config::parse(content).unwrap();
    assert_eq!(config.digest.title, "Grid Notes");
    assert_eq!(config.digest.author, "Desk");
    assert_eq!(config.digest.license, "CC-BY-NC"); // default
    assert_eq!(config.readwise.tag, "energy");
    assert_eq!(config.readwise.lookback_hours, 48);
    assert_eq!(config.readwise.category, "article");
    assert_eq!(config.provider.kind, ProviderType::Ollama);
    assert_eq!(config.provider.model, "llama3.1");
    assert_eq!(config.provider.prompt, "snap");
}

#[test]
fn test_parse_empty_front_matter_gives_defaults() {
    let config = Config::parse("---\n---\n\n# Notes\n").unwrap();
    assert_eq!(config.digest.output_dir, "output");
    assert_eq!(config.readwise.endpoint, "https://readwise.io/api/v3/list/");
    assert_eq!(config.buttondown.status, "draft");
    assert_eq!(config.lint, LintRules::default());
    assert_eq!(config.http.timeout_secs, 30);
}

#[test]
fn test_parse_requires_front_matter() {
    let err = Config::parse("# Just markdown\n").unwrap_err();
    assert!(err.to_string().contains("frontmatter"));
}

#[test]
fn test_parse_lint_overrides() {
    let content = r#"---
lint:
  max_sentence_words: 20
---
"#;
    let config = Config::parse(content).unwrap();
    assert_eq!(config.lint.max_sentence_words, 20);
    assert_eq!(config.lint.max_bullet_words, 15);
    assert_eq!(config.lint.headings, 9);
}

#[test]
fn test_parse_provider_endpoints() {
    let content = r#"---
providers:
  ollama:
    endpoint: http://gpu-box:11434/v1
---
"#;
    let config = Config::parse(content).unwrap();
    assert_eq!(config.providers.ollama_endpoint(), "http://gpu-box:11434/v1");
    assert_eq!(config.providers.openai_endpoint(), "https://api.openai.com/v1");
}

#[test]
fn test_invalid_endpoint_rejected() {
    let content = r#"---
buttondown:
  endpoint: ftp://example.com
---
"#;
    let err = Config::parse(content).unwrap_err();
    assert!(err.to_string().contains("buttondown.endpoint"));
}

#[test]
fn test_invalid_temperature_rejected() {
    let content = r#"---
provider:
  temperature: 3.5
---
"#;
    let err = Config::parse(content).unwrap_err();
    assert!(err.to_string().contains("temperature"));
}

#[test]
fn test_audio_section() {
    let content = r#"---
audio:
  voice_id: narrator-2
  stability: 0.3
---
"#;
    let config = Config::parse(content).unwrap();
    assert_eq!(config.audio.voice_id, "narrator-2");
    assert_eq!(config.audio.stability, 0.3);
    assert_eq!(config.audio.similarity_boost, 0.75);
    assert_eq!(config.audio.endpoint, "https://api.elevenlabs.io/v1");
}

#[test]
fn test_audio_stability_out_of_range_rejected() {
    let content = r#"---
audio:
  stability: 1.5
---
"#;
    let err = Config::parse(content).unwrap_err();
    assert!(err.to_string().contains("audio.stability"));
}

#[test]
fn test_zero_lookback_rejected() {
    let content = r#"---
readwise:
  lookback_hours: 0
---
"#;
    assert!(Config::parse(content).is_err());
}

#[test]
fn test_zero_word_limit_rejected() {
    let content = r#"---
lint:
  max_bullet_words: 0
---
"#;
    assert!(Config::parse(content).is_err());
}

#[test]
#[serial]
fn test_global_config_path() {
    let original = std::env::var("HOME").ok();
    std::env::set_var("HOME", "/home/testuser");
    let path = global_config_path().unwrap();
    if let Some(home) = original {
        std::env::set_var("HOME", home);
    }
    let expected = std::path::PathBuf::from("/home/testuser")
        .join(".config")
        .join("ohmbudsman")
        .join("config.md");
    assert_eq!(path, expected);
}

#[test]
fn test_load_merged_no_global() {
    let tmp = TempDir::new().unwrap();
    let project_path = tmp.path().join("config.md");
    fs::write(
        &project_path,
        r#"---
readwise:
  tag: project-tag
---
"#,
    )
    .unwrap();

    let config =
        Config::load_merged_from(Some(&tmp.path().join("missing.md")), &project_path, true)
            .unwrap();
    assert_eq!(config.readwise.tag, "project-tag");
}

#[test]
fn test_load_merged_project_section_overrides_global() {
    let tmp = TempDir::new().unwrap();
    let global_path = tmp.path().join("global.md");
    let project_path = tmp.path().join("project.md");

    fs::write(
        &global_path,
        r#"---
provider:
  model: gpt-4o
digest:
  author: Global Author
---
"#,
    )
    .unwrap();
    fs::write(
        &project_path,
        r#"---
provider:
  temperature: 0.1
---
"#,
    )
    .unwrap();

    let config = Config::load_merged_from(Some(&global_path), &project_path, true).unwrap();
    // Sections merge wholesale: the project's provider section replaces the global one
    assert_eq!(config.provider.model, "gpt-4o-mini");
    assert_eq!(config.provider.temperature, 0.1);
    // Sections absent from the project come from global
    assert_eq!(config.digest.author, "Global Author");
}

#[test]
fn test_load_merged_optional_project_missing() {
    let tmp = TempDir::new().unwrap();
    let global_path = tmp.path().join("global.md");
    fs::write(&global_path, "---\nreadwise:\n  tag: global-tag\n---\n").unwrap();

    let config =
        Config::load_merged_from(Some(&global_path), &tmp.path().join("none.md"), false).unwrap();
    assert_eq!(config.readwise.tag, "global-tag");
}

#[test]
fn test_load_merged_required_project_missing() {
    let tmp = TempDir::new().unwrap();
    let err = Config::load_merged_from(None, &tmp.path().join("none.md"), true).unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}

#[test]
fn test_invalid_yaml_names_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.md");
    fs::write(&path, "---\nreadwise: [unclosed\n---\n").unwrap();
    let err = Config::load_merged_from(None, &path, true).unwrap_err();
    assert!(err.to_string().contains("broken.md"));
}

#[test]
fn test_with_tag_override() {
    let config = Config::default().with_tag(Some("weekly".to_string()));
    assert_eq!(config.readwise.tag, "weekly");
    let config = config.with_tag(None);
    assert_eq!(config.readwise.tag, "weekly");
}

#[test]
fn test_output_dir() {
    let mut config = Config::default();
    config.digest.output_dir = "build/digests".to_string();
    assert_eq!(config.output_dir(), std::path::PathBuf::from("build/digests"));
}
