//! Category files and component classification.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::component::{ComponentKind, QuestComponent};

/// One of the seven category files a quest is split into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tiles,
    Events,
    Tokens,
    Spawns,
    Monsters,
    Ui,
    Other,
}

impl Category {
    /// Manifest order.
    pub const ALL: [Category; 7] = [
        Category::Tiles,
        Category::Events,
        Category::Tokens,
        Category::Spawns,
        Category::Monsters,
        Category::Ui,
        Category::Other,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Category::Tiles => "tiles.ini",
            Category::Events => "events.ini",
            Category::Tokens => "tokens.ini",
            Category::Spawns => "spawns.ini",
            Category::Monsters => "monsters.ini",
            Category::Ui => "ui.ini",
            Category::Other => "other.ini",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.file_name();
        f.write_str(name.strip_suffix(".ini").unwrap_or(name))
    }
}

/// Where a component ends up on save.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    File(Category),
    /// Perils belong to content packs, not to the quest.
    Skipped,
}

/// Picks the category file for a component kind.
pub fn classify_kind(kind: ComponentKind) -> Placement {
    match kind {
        ComponentKind::Tile => Placement::File(Category::Tiles),
        ComponentKind::Event => Placement::File(Category::Events),
        ComponentKind::Token => Placement::File(Category::Tokens),
        ComponentKind::Spawn => Placement::File(Category::Spawns),
        ComponentKind::CustomMonster | ComponentKind::Activation => {
            Placement::File(Category::Monsters)
        }
        ComponentKind::Ui => Placement::File(Category::Ui),
        ComponentKind::Peril => Placement::Skipped,
        ComponentKind::Door | ComponentKind::Other(_) => Placement::File(Category::Other),
    }
}

pub fn classify(component: &QuestComponent) -> Placement {
    classify_kind(component.kind())
}

/// How many components land in each category file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub files: BTreeMap<Category, usize>,
    pub skipped: usize,
}

impl Default for CategoryCounts {
    fn default() -> Self {
        Self {
            files: Category::ALL.iter().map(|category| (*category, 0)).collect(),
            skipped: 0,
        }
    }
}

impl CategoryCounts {
    pub fn tally<'a, I>(components: I) -> Self
    where
        I: IntoIterator<Item = &'a QuestComponent>,
    {
        let mut counts = Self::default();
        for component in components {
            counts.record(classify(component));
        }
        counts
    }

    pub fn record(&mut self, placement: Placement) {
        match placement {
            Placement::File(category) => *self.files.entry(category).or_default() += 1,
            Placement::Skipped => self.skipped += 1,
        }
    }

    pub fn get(&self, category: Category) -> usize {
        self.files.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.files.values().sum::<usize>() + self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_manifest_order() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "tiles.ini",
                "events.ini",
                "tokens.ini",
                "spawns.ini",
                "monsters.ini",
                "ui.ini",
                "other.ini"
            ]
        );
        for (position, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), position);
        }
    }

    #[test]
    fn only_base_events_land_in_events() {
        assert_eq!(
            classify_kind(ComponentKind::Event),
            Placement::File(Category::Events)
        );
        assert_eq!(
            classify_kind(ComponentKind::Door),
            Placement::File(Category::Other)
        );
    }

    #[test]
    fn every_kind_has_exactly_one_placement() {
        let mut skipped = 0;
        let mut per_category = [0usize; 7];
        for kind in ComponentKind::ALL {
            match classify_kind(kind) {
                Placement::File(category) => per_category[category.index()] += 1,
                Placement::Skipped => skipped += 1,
            }
        }
        assert_eq!(skipped, 1);
        assert_eq!(per_category, [1, 1, 1, 1, 2, 1, 5]);
        assert_eq!(
            per_category.iter().sum::<usize>() + skipped,
            ComponentKind::ALL.len()
        );
    }

    #[test]
    fn tally_counts_every_component_once() {
        let components = [
            QuestComponent::new("TileA", ComponentKind::Tile),
            QuestComponent::new("EventA", ComponentKind::Event),
            QuestComponent::new("DoorA", ComponentKind::Door),
            QuestComponent::new("ActivationA", ComponentKind::Activation),
            QuestComponent::new("CustomMonsterA", ComponentKind::CustomMonster),
            QuestComponent::new("PerilA", ComponentKind::Peril),
        ];
        let counts = CategoryCounts::tally(&components);
        assert_eq!(counts.get(Category::Tiles), 1);
        assert_eq!(counts.get(Category::Events), 1);
        assert_eq!(counts.get(Category::Other), 1);
        assert_eq!(counts.get(Category::Monsters), 2);
        assert_eq!(counts.get(Category::Ui), 0);
        assert_eq!(counts.skipped, 1);
        assert_eq!(counts.total(), components.len());
        assert_eq!(counts.files.len(), 7);
    }

    #[test]
    fn display_drops_extension() {
        assert_eq!(Category::Monsters.to_string(), "monsters");
        assert_eq!(Category::Ui.to_string(), "ui");
    }
}
