//! Structural linter for Disguised-SNAP digests.
//!
//! A digest is valid when it has exactly nine top-level headings, every
//! bullet carries exactly one emoji and stays within the word ceiling, and
//! no sentence runs past the word ceiling. Checks run in a fixed order and
//! stop at the first violation:
//!
//! 1. top-level heading count
//! 2. bullets, in document order (emoji count, then length)
//! 3. sentences, in document order
//!
//! The linter is a pure function of its input. Callers that want a full
//! report must fix the reported violation and lint again.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Number of `# ` headings in the nine-part digest template.
pub const SNAP_HEADINGS: usize = 9;
/// Word ceiling for a single bullet.
pub const MAX_BULLET_WORDS: usize = 15;
/// Word ceiling for a single sentence.
pub const MAX_SENTENCE_WORDS: usize = 15;
/// Emoji required on every bullet.
pub const EMOJI_PER_BULLET: usize = 1;

/// Code points treated as emoji (U+1F300 through U+1FAFF).
///
/// Emoji outside this block (e.g. `✔`, `☀`) are not recognised, and
/// non-pictographic symbols inside it are.
pub const EMOJI_RANGE: RangeInclusive<char> = '\u{1F300}'..='\u{1FAFF}';

const HEADING_MARKER: &str = "# ";
const BULLET_MARKER: &str = "- ";
const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Thresholds enforced by the linter. `Default` is the Disguised-SNAP template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintRules {
    /// Exact number of top-level headings (default: 9)
    #[serde(default = "default_headings")]
    pub headings: usize,
    /// Exact number of emoji per bullet (default: 1)
    #[serde(default = "default_emoji_per_bullet")]
    pub emoji_per_bullet: usize,
    /// Max words per bullet (default: 15)
    #[serde(default = "default_max_bullet_words")]
    pub max_bullet_words: usize,
    /// Max words per sentence (default: 15)
    #[serde(default = "default_max_sentence_words")]
    pub max_sentence_words: usize,
}

fn default_headings() -> usize {
    SNAP_HEADINGS
}

fn default_emoji_per_bullet() -> usize {
    EMOJI_PER_BULLET
}

fn default_max_bullet_words() -> usize {
    MAX_BULLET_WORDS
}

fn default_max_sentence_words() -> usize {
    MAX_SENTENCE_WORDS
}

impl Default for LintRules {
    fn default() -> Self {
        Self {
            headings: SNAP_HEADINGS,
            emoji_per_bullet: EMOJI_PER_BULLET,
            max_bullet_words: MAX_BULLET_WORDS,
            max_sentence_words: MAX_SENTENCE_WORDS,
        }
    }
}

/// First rule violation found in a digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintError {
    HeadingCountMismatch {
        expected: usize,
        found: usize,
    },
    BulletEmojiViolation {
        line: String,
        expected: usize,
        found: usize,
    },
    BulletLengthViolation {
        line: String,
        words: usize,
        limit: usize,
    },
    SentenceLengthViolation {
        sentence: String,
        words: usize,
        limit: usize,
    },
}

impl LintError {
    /// Short rule name, stable across releases.
    pub fn rule(&self) -> &'static str {
        match self {
            LintError::HeadingCountMismatch { .. } => "heading-count",
            LintError::BulletEmojiViolation { .. } => "bullet-emoji",
            LintError::BulletLengthViolation { .. } => "bullet-length",
            LintError::SentenceLengthViolation { .. } => "sentence-length",
        }
    }
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintError::HeadingCountMismatch { expected, found } => write!(
                f,
                "Expected {} top-level headings, found {}",
                expected, found
            ),
            LintError::BulletEmojiViolation {
                line,
                expected,
                found,
            } => write!(
                f,
                "Bullet must contain exactly {} emoji, found {}: {}",
                expected, found, line
            ),
            LintError::BulletLengthViolation { line, words, limit } => write!(
                f,
                "Bullet has {} words (max {}): {}",
                words, limit, line
            ),
            LintError::SentenceLengthViolation {
                sentence,
                words,
                limit,
            } => write!(
                f,
                "Sentence has {} words (max {}): {}",
                words, limit, sentence
            ),
        }
    }
}

impl std::error::Error for LintError {}

/// Lint a digest against the default Disguised-SNAP rules.
pub fn lint_snap(document: &str) -> Result<(), LintError> {
    lint_snap_with(document, &LintRules::default())
}

/// Lint a digest against custom thresholds.
pub fn lint_snap_with(document: &str, rules: &LintRules) -> Result<(), LintError> {
    check_headings(document, rules)?;
    check_bullets(document, rules)?;
    check_sentences(document, rules)
}

/// True for a top-level heading line: exactly one `#` then a space.
pub fn is_heading(line: &str) -> bool {
    line.starts_with(HEADING_MARKER)
}

/// True for a bullet line: `- ` at column zero.
pub fn is_bullet(line: &str) -> bool {
    line.starts_with(BULLET_MARKER)
}

/// Count lines that are top-level headings.
pub fn count_headings(document: &str) -> usize {
    document.lines().filter(|line| is_heading(line)).count()
}

/// Count code points inside [`EMOJI_RANGE`].
pub fn count_emoji(text: &str) -> usize {
    text.chars().filter(|c| EMOJI_RANGE.contains(c)).count()
}

/// Count whitespace-delimited words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Text of a line with its block marker (`- ` or a run of `#` and a space) removed.
fn line_content(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix(BULLET_MARKER) {
        return rest;
    }
    let hashes = line.len() - line.trim_start_matches('#').len();
    if hashes > 0 {
        if let Some(rest) = line[hashes..].strip_prefix(' ') {
            return rest;
        }
    }
    line
}

fn check_headings(document: &str, rules: &LintRules) -> Result<(), LintError> {
    let found = count_headings(document);
    if found != rules.headings {
        return Err(LintError::HeadingCountMismatch {
            expected: rules.headings,
            found,
        });
    }
    Ok(())
}

fn check_bullets(document: &str, rules: &LintRules) -> Result<(), LintError> {
    for line in document.lines().filter(|line| is_bullet(line)) {
        let emoji = count_emoji(line);
        if emoji != rules.emoji_per_bullet {
            return Err(LintError::BulletEmojiViolation {
                line: line.to_string(),
                expected: rules.emoji_per_bullet,
                found: emoji,
            });
        }

        let words = word_count(line_content(line));
        if words > rules.max_bullet_words {
            return Err(LintError::BulletLengthViolation {
                line: line.to_string(),
                words,
                limit: rules.max_bullet_words,
            });
        }
    }
    Ok(())
}

fn check_sentences(document: &str, rules: &LintRules) -> Result<(), LintError> {
    // Sentences never cross a line break.
    for line in document.lines() {
        for fragment in line_content(line).split(&SENTENCE_TERMINATORS[..]) {
            let words = word_count(fragment);
            if words > rules.max_sentence_words {
                return Err(LintError::SentenceLengthViolation {
                    sentence: fragment.trim().to_string(),
                    words,
                    limit: rules.max_sentence_words,
                });
            }
        }
    }
    Ok(())
}
