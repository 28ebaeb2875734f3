//! Quest components: one `[Section]` of a quest file with a known kind.

use std::fmt;

use crate::ini::{IniEntry, IniSection};

/// Component kinds outside the dedicated category files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OtherKind {
    MPlace,
    QItem,
    StartingItem,
    Puzzle,
}

/// Closed set of component kinds.
///
/// `Door` is an event specialization; only `Event` itself counts as a base
/// event when components are bucketed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Tile,
    Event,
    Door,
    Token,
    Spawn,
    CustomMonster,
    Activation,
    Ui,
    Peril,
    Other(OtherKind),
}

/// Section-name prefix of each kind.
const PREFIXES: &[(&str, ComponentKind)] = &[
    ("Tile", ComponentKind::Tile),
    ("Event", ComponentKind::Event),
    ("Door", ComponentKind::Door),
    ("Token", ComponentKind::Token),
    ("Spawn", ComponentKind::Spawn),
    ("CustomMonster", ComponentKind::CustomMonster),
    ("Activation", ComponentKind::Activation),
    ("UI", ComponentKind::Ui),
    ("Peril", ComponentKind::Peril),
    ("MPlace", ComponentKind::Other(OtherKind::MPlace)),
    ("QItem", ComponentKind::Other(OtherKind::QItem)),
    ("StartingItem", ComponentKind::Other(OtherKind::StartingItem)),
    ("Puzzle", ComponentKind::Other(OtherKind::Puzzle)),
];

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [ComponentKind; 13] = [
        ComponentKind::Tile,
        ComponentKind::Event,
        ComponentKind::Door,
        ComponentKind::Token,
        ComponentKind::Spawn,
        ComponentKind::CustomMonster,
        ComponentKind::Activation,
        ComponentKind::Ui,
        ComponentKind::Peril,
        ComponentKind::Other(OtherKind::MPlace),
        ComponentKind::Other(OtherKind::QItem),
        ComponentKind::Other(OtherKind::StartingItem),
        ComponentKind::Other(OtherKind::Puzzle),
    ];

    /// Detects the kind from a section name such as `TileFoyer` or `UIHint`.
    pub fn from_section_name(name: &str) -> Option<Self> {
        PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, kind)| *kind)
    }

    /// The section-name prefix for this kind.
    pub fn prefix(self) -> &'static str {
        PREFIXES
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(prefix, _)| *prefix)
            .unwrap_or("")
    }
}

/// A single quest element. `key` doubles as its section name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestComponent {
    key: String,
    kind: ComponentKind,
    pub fields: Vec<IniEntry>,
}

impl QuestComponent {
    pub fn new(key: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            key: key.into(),
            kind,
            fields: Vec::new(),
        }
    }

    /// Builds a component from a parsed section, detecting its kind.
    /// Returns `None` for sections with an unknown prefix.
    pub fn from_section(section: IniSection) -> Option<Self> {
        let kind = ComponentKind::from_section_name(&section.name)?;
        Some(Self {
            key: section.name,
            kind,
            fields: section.entries,
        })
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(IniEntry::pair(name, value));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|entry| entry.name == name)
            .and_then(|entry| entry.value.as_deref())
    }
}

/// Text form: the section header followed by one line per field.
impl fmt::Display for QuestComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.key)?;
        for field in &self.fields {
            writeln!(f, "{field}")?;
        }
        Ok(())
    }
}
