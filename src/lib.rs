pub mod category;
pub mod component;
pub mod config;
pub mod editor;
mod error;
pub mod ini;
pub mod localization;
pub mod quest;
pub mod store;
pub mod writer;

pub use category::{classify, Category, CategoryCounts, Placement};
pub use component::{ComponentKind, OtherKind, QuestComponent};
pub use config::EditorConfig;
pub use editor::{
    begin, reload, render_documents, save, EditorContext, QuestDocuments, SaveReport,
};
pub use error::{QuestError, QuestResult};
pub use localization::{prune_unused_keys, LocalizationTable};
pub use quest::{QuestData, QuestMetadata};
pub use store::{ComponentView, QuestStore};
