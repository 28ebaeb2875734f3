//! The editor's live set of quest components.

use std::collections::BTreeMap;
use std::path::Path;

use crate::component::QuestComponent;
use crate::quest::QuestData;

/// Presentation state of one component in the editor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComponentView {
    pub alpha: f32,
}

impl Default for ComponentView {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

/// Owns the loaded quest data and which of its components are shown.
#[derive(Clone, Debug)]
pub struct QuestStore {
    data: QuestData,
    views: BTreeMap<String, ComponentView>,
}

impl QuestStore {
    pub fn new(data: QuestData) -> Self {
        Self {
            data,
            views: BTreeMap::new(),
        }
    }

    pub fn data(&self) -> &QuestData {
        &self.data
    }

    /// The manifest this store was loaded from and will save to.
    pub fn path(&self) -> &Path {
        self.data.path()
    }

    pub fn components(&self) -> &BTreeMap<String, QuestComponent> {
        &self.data.components
    }

    /// Replaces the quest data. Views are not touched.
    pub fn replace_data(&mut self, data: QuestData) {
        self.data = data;
    }

    pub fn remove_all(&mut self) {
        self.views.clear();
    }

    /// Shows the component called `key`. Returns `false` if the quest has no
    /// such component.
    pub fn add(&mut self, key: &str) -> bool {
        if !self.data.components.contains_key(key) {
            return false;
        }
        self.views.insert(key.to_string(), ComponentView::default());
        true
    }

    pub fn change_alpha_all(&mut self, alpha: f32) {
        for view in self.views.values_mut() {
            view.alpha = alpha;
        }
    }

    pub fn view(&self, key: &str) -> Option<&ComponentView> {
        self.views.get(key)
    }

    pub fn shown_count(&self) -> usize {
        self.views.len()
    }
}
