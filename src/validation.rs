//! Pulling structured JSON out of free-form model replies.
//!
//! Models wrap JSON in prose or code fences more often than not, so
//! extraction tries progressively looser strategies.

use serde_json::Value;

/// Extract the first JSON value found in `output`.
///
/// Tried in order:
/// 1. a ```json fenced block
/// 2. any bare fenced block
/// 3. the whole reply
/// 4. the first balanced `{...}` then `[...]` span
pub fn extract_json(output: &str) -> Option<Value> {
    fenced_json(output, Some("json"))
        .or_else(|| fenced_json(output, None))
        .or_else(|| serde_json::from_str(output.trim()).ok())
        .or_else(|| balanced_json(output, '{', '}'))
        .or_else(|| balanced_json(output, '[', ']'))
}

fn fence_matches(fence_lang: &str, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(lang) => fence_lang.is_empty() || fence_lang.eq_ignore_ascii_case(lang),
    }
}

fn fenced_json(output: &str, lang: Option<&str>) -> Option<Value> {
    let mut in_fence = false;
    let mut content = String::new();
    let mut fence_lang = String::new();

    for line in output.lines() {
        if let Some(after) = line.trim_start().strip_prefix("```") {
            if in_fence {
                in_fence = false;
                if fence_matches(&fence_lang, lang) {
                    if let Ok(json) = serde_json::from_str(&content) {
                        return Some(json);
                    }
                }
                content.clear();
            } else {
                in_fence = true;
                fence_lang = after.trim().to_string();
            }
        } else if in_fence {
            if !content.is_empty() {
                content.push('\n');
            }
            content.push_str(line);
        }
    }

    // Unclosed fence: the reply was probably cut off, try what we have
    if in_fence && !content.is_empty() && fence_matches(&fence_lang, lang) {
        return serde_json::from_str(&content).ok();
    }

    None
}

fn balanced_json(text: &str, open: char, close: char) -> Option<Value> {
    let mut depth = 0usize;
    let mut start = None;

    for (idx, ch) in text.char_indices() {
        if ch == open {
            if depth == 0 {
                start = Some(idx);
            }
            depth += 1;
        } else if ch == close && depth > 0 {
            depth -= 1;
            if depth == 0 {
                if let Some(begin) = start.take() {
                    if let Ok(json) = serde_json::from_str(&text[begin..=idx]) {
                        return Some(json);
                    }
                }
            }
        }
    }

    None
}
