//! Quest documents on disk and the data they load into.
//!
//! A quest is a manifest (`quest.ini`) holding a `[Quest]` metadata block,
//! a `[QuestData]` list of component files and an optional `[QuestText]`
//! list of localization files. All listed files are relative to the
//! manifest's directory.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::component::QuestComponent;
use crate::error::{QuestError, QuestResult};
use crate::ini::{IniDocument, IniEntry, IniSection};
use crate::localization::{self, LocalizationTable};

pub const QUEST_SECTION: &str = "Quest";
pub const DATA_SECTION: &str = "QuestData";
pub const TEXT_SECTION: &str = "QuestText";

/// The `[Quest]` block: format, type, hidden flag and so on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestMetadata {
    pub fields: Vec<IniEntry>,
}

impl QuestMetadata {
    pub fn from_section(section: &IniSection) -> Self {
        Self {
            fields: section.entries.clone(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(IniEntry::pair(name, value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|entry| entry.name == name)
            .and_then(|entry| entry.value.as_deref())
    }
}

impl fmt::Display for QuestMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{QUEST_SECTION}]")?;
        for field in &self.fields {
            writeln!(f, "{field}")?;
        }
        Ok(())
    }
}

/// Everything a quest manifest describes, keyed by component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestData {
    path: PathBuf,
    pub quest: QuestMetadata,
    /// Sorted by key so every save walks components in the same order.
    pub components: BTreeMap<String, QuestComponent>,
    pub localization: Option<LocalizationTable>,
}

impl QuestData {
    /// An empty quest that will be written to `path`.
    pub fn new(path: impl Into<PathBuf>, quest: QuestMetadata) -> Self {
        Self {
            path: path.into(),
            quest,
            components: BTreeMap::new(),
            localization: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the manifest and every file it lists.
    pub fn directory(&self) -> QuestResult<&Path> {
        manifest_directory(&self.path)
    }

    /// Inserts a component, rejecting duplicate keys.
    pub fn insert(&mut self, component: QuestComponent) -> QuestResult<()> {
        if self.components.contains_key(component.key()) {
            return Err(QuestError::DuplicateComponent {
                key: component.key().to_string(),
            });
        }
        self.components
            .insert(component.key().to_string(), component);
        Ok(())
    }

    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> QuestResult<Self> {
        let directory = manifest_directory(path)?.to_path_buf();
        let manifest = IniDocument::read(path)?;

        let quest = manifest
            .section(QUEST_SECTION)
            .map(QuestMetadata::from_section)
            .ok_or_else(|| QuestError::MissingSection {
                file: path.to_path_buf(),
                section: QUEST_SECTION.to_string(),
            })?;
        let data_files: Vec<String> = manifest
            .section(DATA_SECTION)
            .map(|section| section.names().map(str::to_string).collect())
            .unwrap_or_default();
        let text_files: Option<Vec<String>> = manifest
            .section(TEXT_SECTION)
            .map(|section| section.names().map(str::to_string).collect());

        let mut data = Self::new(path, quest);
        data.absorb(manifest, path)?;

        for file in &data_files {
            let file_path = directory.join(file);
            if !file_path.exists() {
                warn!(file = %file_path.display(), "listed quest file not found, skipping");
                continue;
            }
            let document = IniDocument::read(&file_path)?;
            data.absorb(document, &file_path)?;
        }

        if let Some(text_files) = text_files {
            let mut table = LocalizationTable::default();
            for file in &text_files {
                let Some(language) = localization::language_from_file_name(file) else {
                    warn!(file = %file, "localization file name has no language code");
                    continue;
                };
                let file_path = directory.join(file);
                if !file_path.exists() {
                    warn!(file = %file_path.display(), "listed localization file not found");
                    continue;
                }
                table.insert_language_table(
                    language,
                    localization::read_language_file(&file_path)?,
                );
            }
            data.localization = Some(table);
        }

        debug!(components = data.components.len(), "quest loaded");
        Ok(data)
    }

    /// Adds every component section of `document`. Manifest-only sections
    /// are ignored, unknown sections are logged.
    fn absorb(&mut self, document: IniDocument, file: &Path) -> QuestResult<()> {
        for section in document.into_sections() {
            if matches!(
                section.name.as_str(),
                QUEST_SECTION | DATA_SECTION | TEXT_SECTION
            ) {
                continue;
            }
            let name = section.name.clone();
            match QuestComponent::from_section(section) {
                Some(component) => self.insert(component)?,
                None => warn!(
                    section = %name,
                    file = %file.display(),
                    "unknown quest component type, skipping"
                ),
            }
        }
        Ok(())
    }
}

pub(crate) fn manifest_directory(path: &Path) -> QuestResult<&Path> {
    path.parent()
        .ok_or_else(|| QuestError::InvalidManifestPath(path.to_path_buf()))
}

#[cfg(test)]
#[path = "tests/quest_tests.rs"]
mod tests;
