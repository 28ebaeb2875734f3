//! Staged writing of a set of quest files.
//!
//! Every file is first written next to its target with a `.tmp` suffix.
//! Targets are only replaced once all of them staged cleanly. Each replaced
//! target is moved aside to `.bak` first, and if a later replacement fails
//! the targets already replaced are rolled back from those backups, so a
//! failed save leaves the previous files in place.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{QuestError, QuestResult};

/// A file to be written and its final content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingFile {
    pub path: PathBuf,
    pub contents: String,
}

impl PendingFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// A target that now holds new content, and where its old content went.
struct Committed<'a> {
    target: &'a Path,
    backup: Option<PathBuf>,
}

/// Writes all `files`, or none of them.
///
/// Backups are removed after a successful write unless `keep_backups` is set.
pub fn write_all(files: &[PendingFile], keep_backups: bool) -> QuestResult<()> {
    let mut staged: Vec<(&Path, PathBuf)> = Vec::with_capacity(files.len());
    for file in files {
        let tmp = sibling_path(&file.path, "tmp");
        if let Err(err) = fs::write(&tmp, &file.contents) {
            discard(&staged);
            return Err(QuestError::io(tmp, err));
        }
        staged.push((file.path.as_path(), tmp));
    }

    let mut committed: Vec<Committed<'_>> = Vec::with_capacity(staged.len());
    for (index, (target, tmp)) in staged.iter().enumerate() {
        match commit(target, tmp) {
            Ok(backup) => {
                debug!(file = %target.display(), "written");
                committed.push(Committed {
                    target: *target,
                    backup,
                });
            }
            Err(err) => {
                roll_back(&committed);
                discard(&staged[index..]);
                return Err(err);
            }
        }
    }

    if !keep_backups {
        for backup in committed.iter().filter_map(|entry| entry.backup.as_ref()) {
            if let Err(err) = fs::remove_file(backup) {
                warn!(file = %backup.display(), error = %err, "could not remove backup");
            }
        }
    }
    Ok(())
}

/// Moves `target` aside to its `.bak` sibling, then puts `tmp` in its place.
/// On failure `target` is left as it was.
fn commit(target: &Path, tmp: &Path) -> QuestResult<Option<PathBuf>> {
    let backup = if target.exists() {
        let backup = sibling_path(target, "bak");
        fs::rename(target, &backup).map_err(|err| QuestError::io(&backup, err))?;
        Some(backup)
    } else {
        None
    };

    if let Err(err) = fs::rename(tmp, target) {
        if let Some(backup) = &backup {
            if let Err(restore) = fs::rename(backup, target) {
                warn!(
                    file = %target.display(),
                    backup = %backup.display(),
                    error = %restore,
                    "could not restore backup"
                );
            }
        }
        return Err(QuestError::io(target, err));
    }
    Ok(backup)
}

/// Restores already replaced targets, newest first.
fn roll_back(committed: &[Committed<'_>]) {
    for entry in committed.iter().rev() {
        let restored = match &entry.backup {
            Some(backup) => fs::rename(backup, entry.target),
            None => fs::remove_file(entry.target),
        };
        match restored {
            Ok(()) => debug!(file = %entry.target.display(), "rolled back"),
            Err(err) => {
                warn!(file = %entry.target.display(), error = %err, "could not roll back")
            }
        }
    }
}

fn discard(staged: &[(&Path, PathBuf)]) {
    for (_, tmp) in staged {
        if let Err(err) = fs::remove_file(tmp) {
            warn!(file = %tmp.display(), error = %err, "could not remove staged file");
        }
    }
}

/// `tiles.ini` -> `tiles.ini.<suffix>`
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut output: OsString = path.as_os_str().to_os_string();
    output.push(".");
    output.push(suffix);
    PathBuf::from(output)
}
