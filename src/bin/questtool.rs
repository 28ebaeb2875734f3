use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::Level;

use quest_editor::{begin, save, Category, CategoryCounts, EditorConfig, QuestData};

#[derive(Parser)]
#[command(author, version, about = "Quest file maintenance tool")]
struct Cli {
    /// Log debug output.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show how a quest's components are split across category files.
    Inspect {
        manifest: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Load a quest and write it back in canonical form.
    Resave {
        manifest: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        version_tag: Option<String>,
        #[arg(long, default_value_t = false)]
        prune_text: bool,
    },
}

#[derive(Tabled)]
struct CountRow {
    file: String,
    components: usize,
}

#[derive(Serialize)]
struct InspectReport<'a> {
    manifest: &'a Path,
    languages: Vec<String>,
    counts: CategoryCounts,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Command::Inspect { manifest, json } => inspect(&manifest, json),
        Command::Resave {
            manifest,
            config,
            version_tag,
            prune_text,
        } => resave(manifest, config.as_deref(), version_tag, prune_text),
    }
}

fn inspect(manifest: &Path, json: bool) -> Result<()> {
    let data =
        QuestData::load(manifest).with_context(|| format!("load {}", manifest.display()))?;
    let counts = CategoryCounts::tally(data.components.values());
    let languages = data
        .localization
        .as_ref()
        .map(|table| table.language_codes())
        .unwrap_or_default();

    if json {
        let report = InspectReport {
            manifest,
            languages,
            counts,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut rows: Vec<CountRow> = Category::ALL
        .iter()
        .map(|category| CountRow {
            file: category.file_name().to_string(),
            components: counts.get(*category),
        })
        .collect();
    rows.push(CountRow {
        file: "(skipped perils)".to_string(),
        components: counts.skipped,
    });
    let table = Table::new(rows).with(Style::markdown()).to_string();
    println!("{table}");
    if !languages.is_empty() {
        println!("languages: {}", languages.join(", "));
    }
    Ok(())
}

fn resave(
    manifest: PathBuf,
    config_path: Option<&Path>,
    version_tag: Option<String>,
    prune_text: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            EditorConfig::load(path).with_context(|| format!("read {}", path.display()))?
        }
        None => EditorConfig::default(),
    };
    if let Some(tag) = version_tag {
        config.version = tag;
    }
    config.prune_unused_text |= prune_text;

    let mut ctx = begin(manifest, config).context("load quest")?;
    let report = save(&mut ctx).context("save quest")?;
    for file in &report.files {
        println!("wrote {}", file.display());
    }
    Ok(())
}
