use super::*;

fn parse(text: &str) -> QuestResult<IniDocument> {
    IniDocument::parse(text, Path::new("quest.ini"))
}

#[test]
fn parses_sections_entries_and_bare_lines() {
    let doc = parse(
        "; Saved by version: 2.5.0\n\
         [Quest]\n\
         format=19\n\
         type=MoM\n\
         \n\
         [QuestData]\n\
         tiles.ini\n\
         events.ini\n",
    )
    .expect("document should parse");

    assert_eq!(doc.sections().len(), 2);
    let quest = doc.section("Quest").expect("quest section");
    assert_eq!(quest.get("format"), Some("19"));
    assert_eq!(quest.get("type"), Some("MoM"));

    let files: Vec<&str> = doc.section("QuestData").expect("data section").names().collect();
    assert_eq!(files, vec!["tiles.ini", "events.ini"]);
}

#[test]
fn value_keeps_everything_after_first_equals() {
    let doc = parse("[EventStart]\noperations=#monsters,=,0\n").expect("parse");
    let event = doc.section("EventStart").expect("section");
    assert_eq!(event.get("operations"), Some("#monsters,=,0"));
}

#[test]
fn value_whitespace_is_kept_as_written() {
    let text = "[EventStart]\ntext=  padded \n";
    let doc = parse(text).expect("parse");
    let event = doc.section("EventStart").expect("section");
    assert_eq!(event.get("text"), Some("  padded "));
    assert_eq!(event.to_string(), text);

    let spaced = parse("[EventStart]\n  display = false\n").expect("parse");
    let event = spaced.section("EventStart").expect("section");
    assert_eq!(event.get("display"), Some(" false"));
}

#[test]
fn strips_bom_and_skips_comments() {
    let doc = parse("\u{feff}# hash comment\n[TileA]\n; inline note\nside=TileFoyer\n")
        .expect("parse");
    let tile = doc.section("TileA").expect("tile");
    assert_eq!(tile.entries, vec![IniEntry::pair("side", "TileFoyer")]);
}

#[test]
fn rejects_entry_before_first_section() {
    let err = parse("orphan=1\n[Quest]\n").expect_err("orphan entry must fail");
    match err {
        QuestError::Parse { line, .. } => assert_eq!(line, 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_duplicate_and_malformed_sections() {
    let dup = parse("[TileA]\n[TileA]\n").expect_err("duplicate must fail");
    assert!(matches!(dup, QuestError::DuplicateSection { ref section, .. } if section == "TileA"));

    let open = parse("[TileA\n").expect_err("unterminated header must fail");
    assert!(matches!(open, QuestError::Parse { line: 1, .. }));

    let empty = parse("[ ]\n").expect_err("empty header must fail");
    assert!(matches!(empty, QuestError::Parse { .. }));
}

#[test]
fn section_display_matches_source_layout() {
    let mut section = IniSection::new("QuestData");
    section.entries.push(IniEntry::bare("tiles.ini"));
    section.entries.push(IniEntry::pair("hidden", "false"));
    assert_eq!(section.to_string(), "[QuestData]\ntiles.ini\nhidden=false\n");
}
