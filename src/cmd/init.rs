//! Initialize ohmbudsman in a project directory
//!
//! Creates `.ohmbudsman/config.md` with the default settings spelled out
//! and `.ohmbudsman/prompts/snap.md` holding the built-in digest prompt.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use ohmbudsman::paths::{CONFIG_FILE, PROMPTS_DIR};
use ohmbudsman::prompt::{default_snap_file, SNAP_PROMPT};
use ohmbudsman::ui::{self, colors};

const DEFAULT_CONFIG: &str = r#"---
digest:
  title: Ohmbudsman Digest
  author: Ohmbudsman
  license: CC-BY-NC
  output_dir: output

readwise:
  tag: ohmbudsman
  category: article
  lookback_hours: 24

provider:
  kind: openai
  model: gpt-4o-mini
  temperature: 0.3
  max_chunk_tokens: 50000
  prompt: snap

buttondown:
  status: draft

audio:
  voice_id: 21m00Tcm4TlvDq8ikWAM
  stability: 0.5
  similarity_boost: 0.75

lint:
  headings: 9
  emoji_per_bullet: 1
  max_bullet_words: 15
  max_sentence_words: 15
---

# Ohmbudsman

Tokens are read from the environment (or a `.env` file):

- `READWISE_TOKEN`
- `OPENAI_API_KEY`
- `BUTTONDOWN_TOKEN`
- `ELEVENLABS_API_KEY` (optional, for `ohmbudsman assets` audio)

`READWISE_TAG` overrides `readwise.tag`.
"#;

pub fn cmd_init(force: bool) -> Result<()> {
    write_file(Path::new(CONFIG_FILE), DEFAULT_CONFIG, force)?;
    let prompt_path = Path::new(PROMPTS_DIR).join(format!("{}.md", SNAP_PROMPT));
    write_file(&prompt_path, &default_snap_file(), force)?;

    ui::success("Initialized ohmbudsman");
    ui::step("Next: set READWISE_TOKEN, OPENAI_API_KEY and BUTTONDOWN_TOKEN, then run `ohmbudsman run --dry-run`");
    Ok(())
}

fn write_file(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        ui::warn(&format!(
            "{} exists, leaving it alone (use --force to overwrite)",
            path.display()
        ));
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    ui::success(&format!(
        "Created {}",
        colors::identifier(&path.display().to_string())
    ));
    Ok(())
}
