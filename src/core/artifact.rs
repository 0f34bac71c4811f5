/// Artifact writer — patches a generated prompt list into a source document.
///
/// The target holds a list literal such as
///
/// ```text
/// JOINT_PROMPTS = [
///     "Orca standing in snowy mountain landscape",
///     ]
/// ```
///
/// and every `NAME = [ ... ]` span is replaced with the new prompts.
use regex::{NoExpand, Regex};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Characters escaped with a backslash inside a quoted entry.
pub const RESERVED_CHARS: &[char] = &['"'];

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid list pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("list '{0}' not found in document")]
    ListNotFound(String),
}

/// Rewrites a named list literal in a document.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    list_name: String,
    pattern: Regex,
}

impl ArtifactWriter {
    pub fn new(list_name: &str) -> Result<Self, ArtifactError> {
        let pattern = Regex::new(&format!(r"(?s){} = \[.*?\]", regex::escape(list_name)))?;
        Ok(Self {
            list_name: list_name.to_string(),
            pattern,
        })
    }

    pub fn list_name(&self) -> &str {
        &self.list_name
    }

    /// Render prompts as a bracketed literal, one quoted entry per line.
    pub fn render_list(&self, prompts: &[String]) -> String {
        let entries: Vec<String> = prompts
            .iter()
            .map(|p| format!("    \"{}\"", escape(p)))
            .collect();
        if entries.is_empty() {
            "[\n    ]".to_string()
        } else {
            format!("[\n{}\n    ]", entries.join(",\n"))
        }
    }

    /// Return `document` with the named list replaced by `prompts`.
    pub fn patch(&self, document: &str, prompts: &[String]) -> Result<String, ArtifactError> {
        if !self.pattern.is_match(document) {
            return Err(ArtifactError::ListNotFound(self.list_name.clone()));
        }
        let replacement = format!("{} = {}", self.list_name, self.render_list(prompts));
        Ok(self
            .pattern
            .replace_all(document, NoExpand(&replacement))
            .into_owned())
    }

    /// Patch the file at `path` in place. Returns the number of prompts written.
    pub fn write_file(&self, path: &Path, prompts: &[String]) -> Result<usize, ArtifactError> {
        let contents = std::fs::read_to_string(path)?;
        let patched = self.patch(&contents, prompts)?;
        std::fs::write(path, patched)?;
        info!(path = %path.display(), count = prompts.len(), "updated prompt list");
        Ok(prompts.len())
    }
}

fn escape(prompt: &str) -> String {
    let mut out = String::with_capacity(prompt.len());
    for c in prompt.chars() {
        if RESERVED_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
