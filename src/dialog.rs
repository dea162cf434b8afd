//! File dialog helpers
//!
//! The open and save dialogs are minibuffer prompts. Tab completes the
//! typed path against the file system, offering only directories and
//! files with the dialog's extension.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Result of completing a partial path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Input extended by the longest common prefix of the candidates
    pub input: String,
    /// Matching names; directories carry a trailing `/`
    pub candidates: Vec<String>,
}

/// Complete `input` against directories and `*.extension` files
pub fn complete(input: &str, extension: &str) -> Result<Completion> {
    let (dir_part, prefix) = match input.rfind('/') {
        Some(idx) => input.split_at(idx + 1),
        None => ("", input),
    };
    let dir = if dir_part.is_empty() {
        Path::new(".")
    } else {
        Path::new(dir_part)
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(prefix) || (name.starts_with('.') && !prefix.starts_with('.')) {
            continue;
        }
        if entry.path().is_dir() {
            candidates.push(format!("{}/", name));
        } else if has_extension(&name, extension) {
            candidates.push(name);
        }
    }
    candidates.sort();

    let input = match common_prefix(&candidates) {
        Some(common) if common.len() > prefix.len() => format!("{}{}", dir_part, common),
        _ => input.to_string(),
    };
    Ok(Completion { input, candidates })
}

/// Check a file name against the dialog filter
pub fn has_extension(name: &str, extension: &str) -> bool {
    Path::new(name).extension().is_some_and(|ext| ext == extension)
}

fn common_prefix(names: &[String]) -> Option<&str> {
    let first = names.first()?;
    let mut end = first.len();
    for name in &names[1..] {
        end = first
            .char_indices()
            .zip(name.chars())
            .find(|((_, a), b)| a != b)
            .map_or(end.min(name.len()), |((i, _), _)| i.min(end));
    }
    Some(&first[..end])
}

/// Interpret a key pressed at a yes/no question
pub fn parse_answer(ch: char) -> Option<bool> {
    match ch.to_ascii_lowercase() {
        'y' => Some(true),
        'n' => Some(false),
        _ => None,
    }
}
