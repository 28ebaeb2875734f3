use std::fs;

use super::*;
use crate::component::ComponentKind;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write fixture");
}

#[test]
fn load_reads_listed_files_and_inline_components() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(
        dir.path(),
        "quest.ini",
        "; Saved by version: 2.5.0\n[Quest]\nformat=19\n\n[QuestData]\ntiles.ini\nevents.ini\n\n[EventInline]\ndisplay=false\n",
    );
    write(dir.path(), "tiles.ini", "; header\n\n[TileFoyer]\nside=TileFoyerA\n");
    write(dir.path(), "events.ini", "[EventStart]\n\n[DoorCellar]\n");

    let data = QuestData::load(&dir.path().join("quest.ini")).expect("quest should load");
    assert_eq!(data.quest.get("format"), Some("19"));
    let keys: Vec<&str> = data.components.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["DoorCellar", "EventInline", "EventStart", "TileFoyer"]);
    assert_eq!(data.components["DoorCellar"].kind(), ComponentKind::Door);
    assert_eq!(data.components["TileFoyer"].field("side"), Some("TileFoyerA"));
    assert!(data.localization.is_none());
}

#[test]
fn missing_listed_file_is_skipped() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "quest.ini", "[Quest]\n[QuestData]\ntiles.ini\nmonsters.ini\n");
    write(dir.path(), "tiles.ini", "[TileA]\n");

    let data = QuestData::load(&dir.path().join("quest.ini")).expect("quest should load");
    assert_eq!(data.components.len(), 1);
}

#[test]
fn unknown_sections_are_ignored() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "quest.ini", "[Quest]\n[Mystery]\nvalue=1\n[TileA]\n");

    let data = QuestData::load(&dir.path().join("quest.ini")).expect("quest should load");
    assert_eq!(data.components.len(), 1);
    assert!(data.components.contains_key("TileA"));
}

#[test]
fn quest_section_is_required() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "quest.ini", "[QuestData]\ntiles.ini\n");

    let err = QuestData::load(&dir.path().join("quest.ini")).expect_err("no [Quest]");
    assert!(matches!(err, QuestError::MissingSection { ref section, .. } if section == "Quest"));
}

#[test]
fn duplicate_keys_across_files_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "quest.ini", "[Quest]\n[QuestData]\na.ini\nb.ini\n");
    write(dir.path(), "a.ini", "[TileA]\n");
    write(dir.path(), "b.ini", "[TileA]\n");

    let err = QuestData::load(&dir.path().join("quest.ini")).expect_err("duplicate key");
    assert!(matches!(err, QuestError::DuplicateComponent { ref key } if key == "TileA"));
}

#[test]
fn quest_text_files_fill_the_localization_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(
        dir.path(),
        "quest.ini",
        "[Quest]\n[QuestText]\nLocalization.English.txt\nLocalization.German.txt\n",
    );
    write(dir.path(), "Localization.English.txt", ".,English\nquest.name,The Cellar");
    write(dir.path(), "Localization.German.txt", ".,German\nquest.name,Der Keller");

    let data = QuestData::load(&dir.path().join("quest.ini")).expect("quest should load");
    let table = data.localization.expect("text section present");
    assert_eq!(table.resolve("German", "quest.name"), Some("Der Keller"));
    assert_eq!(table.resolve("French", "quest.name"), Some("The Cellar"));
}

#[test]
fn missing_manifest_reports_its_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.ini");
    match QuestData::load(&path).expect_err("no manifest") {
        QuestError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn metadata_display_renders_quest_block() {
    let quest = QuestMetadata::default()
        .with_field("format", "19")
        .with_field("hidden", "false");
    assert_eq!(quest.to_string(), "[Quest]\nformat=19\nhidden=false\n");
}
