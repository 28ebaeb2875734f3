//! Minimal line-oriented ini reader and writer.
//!
//! Quest documents are plain UTF-8 text: `[Section]` headers, `name=value`
//! entries, bare lines (used for file lists) and `;`/`#` comment lines.
//! Section and entry order is preserved so that rendering a parsed document
//! reproduces its content.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{QuestError, QuestResult};

const BOM: char = '\u{feff}';

/// One line inside a section. Bare lines have no value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IniEntry {
    pub name: String,
    pub value: Option<String>,
}

impl IniEntry {
    pub fn pair(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

impl fmt::Display for IniEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => write!(f, "{}", self.name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IniSection {
    pub name: String,
    pub entries: Vec<IniEntry>,
}

impl IniSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Value of the first entry called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .and_then(|entry| entry.value.as_deref())
    }

    /// Names of all entries, in file order. Used for file lists.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}

impl fmt::Display for IniSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.name)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    /// Parses `text`. `file` is only used to label errors.
    pub fn parse(text: &str, file: &Path) -> QuestResult<Self> {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut sections: Vec<IniSection> = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .map(str::trim)
                    .ok_or_else(|| QuestError::Parse {
                        file: file.to_path_buf(),
                        line: index + 1,
                        message: format!("unterminated section header '{line}'"),
                    })?;
                if name.is_empty() {
                    return Err(QuestError::Parse {
                        file: file.to_path_buf(),
                        line: index + 1,
                        message: "empty section name".to_string(),
                    });
                }
                if sections.iter().any(|section| section.name == name) {
                    return Err(QuestError::DuplicateSection {
                        file: file.to_path_buf(),
                        section: name.to_string(),
                    });
                }
                sections.push(IniSection::new(name));
                continue;
            }

            let section = sections.last_mut().ok_or_else(|| QuestError::Parse {
                file: file.to_path_buf(),
                line: index + 1,
                message: "entry outside of any section".to_string(),
            })?;
            // Values are kept byte for byte so a save writes back what it read.
            let entry = match raw.trim_start().split_once('=') {
                Some((name, value)) => IniEntry::pair(name.trim_end(), value),
                None => IniEntry::bare(line),
            };
            section.entries.push(entry);
        }

        Ok(Self { sections })
    }

    pub fn read(path: &Path) -> QuestResult<Self> {
        let text = fs::read_to_string(path).map_err(|err| QuestError::io(path, err))?;
        Self::parse(&text, path)
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    pub fn sections(&self) -> &[IniSection] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<IniSection> {
        self.sections
    }
}

#[cfg(test)]
#[path = "tests/ini_tests.rs"]
mod tests;
