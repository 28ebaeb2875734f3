use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{QuestError, QuestResult};

pub const DEFAULT_LANGUAGE: &str = "English";
const FILE_PREFIX: &str = "Localization.";
const FILE_SUFFIX: &str = ".txt";
const HEADER_KEY: &str = ".";

/// Translated quest strings, per language and key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizationTable {
    pub default_language: String,
    pub languages: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for LocalizationTable {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl LocalizationTable {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
            languages: BTreeMap::new(),
        }
    }

    pub fn insert_language_table(
        &mut self,
        language: impl Into<String>,
        entries: BTreeMap<String, String>,
    ) {
        self.languages.insert(language.into(), entries);
    }

    pub fn set(
        &mut self,
        language: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.languages
            .entry(language.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    pub fn language_codes(&self) -> Vec<String> {
        self.languages.keys().cloned().collect()
    }

    pub fn resolve<'a>(&'a self, language: &str, key: &str) -> Option<&'a str> {
        self.languages
            .get(language)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.languages
                    .get(self.default_language.as_str())
                    .and_then(|table| table.get(key))
            })
            .map(String::as_str)
    }

    /// One ordered line list per language: a `.,<language>` header, then
    /// `key,value` lines sorted by key.
    pub fn serialize_multiple(&self) -> BTreeMap<String, Vec<String>> {
        self.languages
            .iter()
            .map(|(language, table)| {
                let mut lines = Vec::with_capacity(table.len() + 1);
                lines.push(format!("{HEADER_KEY},{language}"));
                lines.extend(
                    table
                        .iter()
                        .map(|(key, value)| format!("{key},{}", escape_value(value))),
                );
                (language.clone(), lines)
            })
            .collect()
    }
}

/// The placeholder quest text uses to reference a localized string.
pub fn text_token(key: &str) -> String {
    format!("{{qst:{key}}}")
}

pub fn language_file_name(language: &str) -> String {
    format!("{FILE_PREFIX}{language}{FILE_SUFFIX}")
}

/// Extracts `<language>` from `Localization.<language>.txt`.
pub fn language_from_file_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_SUFFIX)
        .filter(|language| !language.is_empty())
}

/// Removes lines whose key is never referenced from `reference`.
///
/// The first line is a header and always kept. Walks backwards so removal
/// does not shift the entries still to be visited.
pub fn prune_unused_keys(lines: &mut Vec<String>, reference: &str) {
    for pos in (1..lines.len()).rev() {
        let key = lines[pos].split(',').next().unwrap_or_default();
        if !reference.contains(&text_token(key)) {
            lines.remove(pos);
        }
    }
}

/// Parses the content of one language file.
pub fn parse_language_lines(text: &str) -> BTreeMap<String, String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries = BTreeMap::new();
    for (index, line) in text.lines().enumerate() {
        if index == 0 || line.trim().is_empty() {
            continue;
        }
        match line.split_once(',') {
            Some((key, value)) => {
                entries.insert(key.to_string(), unescape_value(value));
            }
            None => warn!(line = index + 1, "localization line without separator"),
        }
    }
    entries
}

pub fn read_language_file(path: &Path) -> QuestResult<BTreeMap<String, String>> {
    let text = fs::read_to_string(path).map_err(|err| QuestError::io(path, err))?;
    Ok(parse_language_lines(&text))
}

/// Backslashes are doubled before newlines become `\n`, so
/// `unescape_value` can tell the two apart.
fn escape_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

fn unescape_value(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => output.push('\n'),
            Some('\\') => output.push('\\'),
            Some(other) => {
                output.push('\\');
                output.push(other);
            }
            None => output.push('\\'),
        }
    }
    output
}

#[cfg(test)]
#[path = "tests/localization_tests.rs"]
mod tests;
