use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables the binary reads; cleared so the host never leaks in.
const ISOLATED_ENV: &[&str] = &[
    "READWISE_TOKEN",
    "OPENAI_API_KEY",
    "BUTTONDOWN_TOKEN",
    "ELEVENLABS_API_KEY",
    "READWISE_TAG",
    "OHMBUDSMAN_QUIET",
    "RUST_LOG",
];

/// TestHarness provides an isolated project directory for driving the binary.
/// Each harness creates a temporary directory with `.ohmbudsman/config.md`
/// and a private HOME so no global config is picked up.
pub struct TestHarness {
    pub dir: TempDir,
    #[allow(dead_code)]
    pub config_path: PathBuf,
    pub home: PathBuf,
    pub binary: PathBuf,
}

impl TestHarness {
    /// Creates a new test harness with the default configuration.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path();

        let config_path = base_path.join(".ohmbudsman/config.md");
        let home = base_path.join("home");
        fs::create_dir_all(base_path.join(".ohmbudsman/prompts")).expect("Failed to create prompts dir");
        fs::create_dir_all(&home).expect("Failed to create home dir");

        let default_config = r#"---
digest:
  output_dir: output
---

# Project Config
"#;
        fs::write(&config_path, default_config).expect("Failed to write config");

        TestHarness {
            dir: temp_dir,
            config_path,
            home,
            binary: PathBuf::from(env!("CARGO_BIN_EXE_ohmbudsman")),
        }
    }

    /// Creates a test harness with custom config content.
    #[allow(dead_code)]
    pub fn with_config(config_content: &str) -> Self {
        let harness = Self::new();
        fs::write(&harness.config_path, config_content).expect("Failed to write custom config");
        harness
    }

    /// Returns the base directory path (the TempDir path).
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `name` inside the harness directory and returns its path.
    #[allow(dead_code)]
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Executes the binary with the given arguments in the harness directory.
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[])
    }

    /// Executes the binary with extra environment variables.
    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut command = Command::new(&self.binary);
        command
            .args(args)
            .current_dir(self.path())
            .env("HOME", &self.home)
            .env("NO_COLOR", "1");
        for key in ISOLATED_ENV {
            command.env_remove(key);
        }
        for (key, value) in env {
            command.env(key, value);
        }
        command.output().expect("Failed to run ohmbudsman binary")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Combined stdout and stderr, for assertions that do not care which stream.
#[allow(dead_code)]
pub fn output_text(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
