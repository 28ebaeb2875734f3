//! Saving and reloading the quest being edited.
//!
//! A save renders the manifest, the seven category files and one text file
//! per language, writes them as a single staged batch and then reloads the
//! quest from disk so the editor always reflects what was written.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use crate::category::{classify, Category, CategoryCounts, Placement};
use crate::config::EditorConfig;
use crate::error::QuestResult;
use crate::localization::{self, LocalizationTable};
use crate::quest::{manifest_directory, QuestData, QuestMetadata, DATA_SECTION, TEXT_SECTION};
use crate::store::QuestStore;
use crate::writer::{self, PendingFile};

pub const VERSION_COMMENT: &str = "; Saved by version: ";

/// Everything a save or reload works on.
#[derive(Clone, Debug)]
pub struct EditorContext {
    pub store: QuestStore,
    pub localization: Option<LocalizationTable>,
    pub config: EditorConfig,
    pub edit_mode: bool,
}

impl EditorContext {
    /// Wraps in-memory quest data. Its localization table moves into the
    /// context.
    pub fn new(mut data: QuestData, config: EditorConfig) -> Self {
        let localization = data.localization.take();
        Self {
            store: QuestStore::new(data),
            localization,
            config,
            edit_mode: false,
        }
    }

    pub fn manifest_path(&self) -> &Path {
        self.store.path()
    }
}

/// The rendered text of every file a save produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestDocuments {
    pub manifest: String,
    pub categories: [String; 7],
    /// Language code to file content.
    pub localization: BTreeMap<String, String>,
    pub counts: CategoryCounts,
}

impl QuestDocuments {
    pub fn category(&self, category: Category) -> &str {
        &self.categories[category.index()]
    }

    /// Localization files first, then the manifest, then category files.
    pub fn into_pending(self, manifest_path: &Path, directory: &Path) -> Vec<PendingFile> {
        let mut files = Vec::with_capacity(self.localization.len() + 8);
        for (language, content) in self.localization {
            files.push(PendingFile::new(
                directory.join(localization::language_file_name(&language)),
                content,
            ));
        }
        files.push(PendingFile::new(manifest_path, self.manifest));
        for (category, content) in Category::ALL.into_iter().zip(self.categories) {
            files.push(PendingFile::new(directory.join(category.file_name()), content));
        }
        files
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveReport {
    pub files: Vec<PathBuf>,
    pub counts: CategoryCounts,
}

/// Starts an editing session on the quest at `manifest_path`.
pub fn begin(
    manifest_path: impl Into<PathBuf>,
    config: EditorConfig,
) -> QuestResult<EditorContext> {
    let data = QuestData::new(manifest_path, QuestMetadata::default());
    let mut ctx = EditorContext::new(data, config);
    ctx.edit_mode = true;
    reload(&mut ctx)?;
    Ok(ctx)
}

fn version_header(version: &str) -> String {
    format!("{VERSION_COMMENT}{version}\n")
}

/// Renders every quest file without touching the disk.
pub fn render_documents(ctx: &EditorContext) -> QuestDocuments {
    let header = version_header(&ctx.config.version);

    let mut manifest = header.clone();
    manifest.push_str(&ctx.store.data().quest.to_string());
    manifest.push('\n');
    manifest.push_str(&format!("[{DATA_SECTION}]\n"));
    for category in Category::ALL {
        manifest.push_str(category.file_name());
        manifest.push('\n');
    }

    let mut categories: [String; 7] = std::array::from_fn(|_| header.clone());
    let mut counts = CategoryCounts::default();
    for component in ctx.store.components().values() {
        let placement = classify(component);
        counts.record(placement);
        if let Placement::File(category) = placement {
            let buffer = &mut categories[category.index()];
            buffer.push('\n');
            buffer.push_str(&component.to_string());
        }
    }

    let mut texts = BTreeMap::new();
    if let Some(table) = &ctx.localization {
        let mut files = table.serialize_multiple();
        if ctx.config.prune_unused_text {
            let reference: String = std::iter::once(manifest.as_str())
                .chain(categories.iter().map(String::as_str))
                .collect();
            for lines in files.values_mut() {
                localization::prune_unused_keys(lines, &reference);
            }
        }

        manifest.push_str(&format!("\n[{TEXT_SECTION}]\n"));
        for (language, lines) in files {
            manifest.push_str(&localization::language_file_name(&language));
            manifest.push('\n');
            texts.insert(language, lines.join("\n"));
        }
    }

    QuestDocuments {
        manifest,
        categories,
        localization: texts,
        counts,
    }
}

/// Writes the quest to disk, then reloads it.
///
/// The reload runs even when writing failed; a write error is returned in
/// preference to a reload error.
#[instrument(skip(ctx), fields(path = %ctx.manifest_path().display()))]
pub fn save(ctx: &mut EditorContext) -> QuestResult<SaveReport> {
    let written = write_documents(ctx);
    if let Err(err) = &written {
        error!(error = %err, "failed to save quest");
    }

    let reloaded = reload(ctx);
    match (written, reloaded) {
        (Ok(report), Ok(())) => {
            info!(files = report.files.len(), "quest saved");
            Ok(report)
        }
        (Ok(_), Err(err)) => Err(err),
        (Err(err), reloaded) => {
            if let Err(reload_err) = reloaded {
                warn!(error = %reload_err, "reload after failed save also failed");
            }
            Err(err)
        }
    }
}

fn write_documents(ctx: &EditorContext) -> QuestResult<SaveReport> {
    let manifest_path = ctx.manifest_path();
    let directory = manifest_directory(manifest_path)?;
    let documents = render_documents(ctx);
    let counts = documents.counts.clone();
    let files = documents.into_pending(manifest_path, directory);

    writer::write_all(&files, ctx.config.keep_backups)?;
    Ok(SaveReport {
        files: files.into_iter().map(|file| file.path).collect(),
        counts,
    })
}

/// Re-reads the quest from the manifest the store was loaded from.
///
/// On failure the store keeps its current content.
#[instrument(skip(ctx), fields(path = %ctx.manifest_path().display()))]
pub fn reload(ctx: &mut EditorContext) -> QuestResult<()> {
    let mut data = QuestData::load(ctx.manifest_path())?;

    ctx.store.remove_all();
    ctx.localization = data.localization.take();
    ctx.store.replace_data(data);

    let keys: Vec<String> = ctx.store.components().keys().cloned().collect();
    for key in &keys {
        ctx.store.add(key);
    }
    ctx.store.change_alpha_all(ctx.config.fade_alpha);

    info!(components = keys.len(), "quest reloaded");
    Ok(())
}

#[cfg(test)]
#[path = "tests/editor_tests.rs"]
mod tests;
