use std::path::PathBuf;
use std::process;

use celeste_core::core_api::{Engine, StatsSnapshot};
use celeste_render::{
    FieldSelection, JsonStyle, TextRenderOptions, render_json_full, render_json_selected,
    render_selected_pairs, render_text,
};
use clap::Parser;
use log::debug;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "SAVE.celeste")]
    path: PathBuf,
    #[arg(long)]
    name: bool,
    #[arg(long)]
    time: bool,
    #[arg(long)]
    deaths: bool,
    #[arg(long)]
    strawberries: bool,
    #[arg(long = "golden-strawberries")]
    golden_strawberries: bool,
    #[arg(long)]
    jumps: bool,
    #[arg(long = "wall-jumps")]
    wall_jumps: bool,
    #[arg(long)]
    dashes: bool,
    #[arg(long)]
    chapters: bool,
    /// Only show chapters with this area id (repeatable).
    #[arg(long = "chapter", value_name = "ID", allow_hyphen_values = true)]
    chapter_ids: Vec<i32>,
    #[arg(long)]
    json: bool,
    /// Print chapter headings without their side details.
    #[arg(long)]
    collapsed: bool,
    /// Log extraction progress to stderr (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn field_selection(&self) -> FieldSelection {
        FieldSelection {
            name: self.name,
            time: self.time,
            deaths: self.deaths,
            strawberries: self.strawberries,
            golden_strawberries: self.golden_strawberries,
            jumps: self.jumps,
            wall_jumps: self.wall_jumps,
            dashes: self.dashes,
            chapters: self.chapters,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let fields = cli.field_selection();

    if cli.collapsed && (fields.is_any_selected() || cli.json) {
        eprintln!("--collapsed only applies to the text sheet");
        process::exit(2);
    }

    let session = Engine::new().open_path(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error opening save file: {}", cli.path.display());
        eprintln!("  {}", e);
        process::exit(1);
    });
    for issue in session.issues() {
        debug!("defaulted {}: {issue}", issue.field());
    }

    let snapshot = if cli.chapter_ids.is_empty() {
        session.into_snapshot()
    } else {
        filter_chapters(session.snapshot(), &cli.chapter_ids).unwrap_or_else(|missing| {
            eprintln!("No chapter with id {missing} in {}", cli.path.display());
            process::exit(1);
        })
    };

    if cli.json {
        let json = if fields.is_any_selected() {
            render_json_selected(&snapshot, &fields, JsonStyle::CanonicalV1)
        } else {
            render_json_full(&snapshot, JsonStyle::CanonicalV1)
        };
        let rendered = serde_json::to_string_pretty(&json).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    if fields.is_any_selected() {
        for (key, value) in render_selected_pairs(&snapshot, &fields) {
            println!("{key}={value}");
        }
        return;
    }

    print!(
        "{}",
        render_text(
            &snapshot,
            TextRenderOptions {
                collapsed: cli.collapsed
            }
        )
    );
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Keep only the requested chapters, in document order. Returns the first id
/// that matches no chapter.
fn filter_chapters(snapshot: &StatsSnapshot, ids: &[i32]) -> Result<StatsSnapshot, i32> {
    if let Some(&missing) = ids.iter().find(|&&id| snapshot.chapter(id).is_none()) {
        return Err(missing);
    }

    Ok(StatsSnapshot {
        character: snapshot.character.clone(),
        chapters: snapshot
            .chapters
            .iter()
            .filter(|chapter| ids.contains(&chapter.id))
            .cloned()
            .collect(),
    })
}
