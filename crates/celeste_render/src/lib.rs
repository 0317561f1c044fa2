use std::fmt::Write as _;

use celeste_core::chapter_name::is_single_side;
use celeste_core::core_api::{
    CharacterField, CharacterStats, ChapterStats, Side, SideStats, StatsSnapshot,
};
use serde_json::{Map as JsonMap, Value as JsonValue};

const SHEET_WIDTH: usize = 76;
const TOTALS_COL_WIDTH: usize = 36;
const SIDE_COL_WIDTH: usize = 28;

/// Heart gem colours in the order the stats page shows them.
const HEART_COLOURS: [(Side, &str); 3] = [(Side::B, "red"), (Side::A, "blue"), (Side::C, "gold")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    /// Print chapter headings only, without their side blocks.
    pub collapsed: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub name: bool,
    pub time: bool,
    pub deaths: bool,
    pub strawberries: bool,
    pub golden_strawberries: bool,
    pub jumps: bool,
    pub wall_jumps: bool,
    pub dashes: bool,
    pub chapters: bool,
}

impl FieldSelection {
    pub fn is_any_selected(&self) -> bool {
        self.chapters || !self.character_fields().is_empty()
    }

    /// Selected character counters in canonical order.
    pub fn character_fields(&self) -> Vec<CharacterField> {
        CharacterField::ALL
            .into_iter()
            .filter(|field| match field {
                CharacterField::Name => self.name,
                CharacterField::Time => self.time,
                CharacterField::TotalDeaths => self.deaths,
                CharacterField::TotalStrawberries => self.strawberries,
                CharacterField::TotalGoldenStrawberries => self.golden_strawberries,
                CharacterField::TotalJumps => self.jumps,
                CharacterField::TotalWallJumps => self.wall_jumps,
                CharacterField::TotalDashes => self.dashes,
            })
            .collect()
    }
}

/// A consumer of finished snapshots.
pub trait StatsRenderer {
    type Output;

    fn render(&self, snapshot: &StatsSnapshot) -> Self::Output;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub style: JsonStyle,
}

impl StatsRenderer for JsonRenderer {
    type Output = JsonValue;

    fn render(&self, snapshot: &StatsSnapshot) -> JsonValue {
        render_json_full(snapshot, self.style)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    pub options: TextRenderOptions,
}

impl StatsRenderer for TextRenderer {
    type Output = String;

    fn render(&self, snapshot: &StatsSnapshot) -> String {
        render_text(snapshot, self.options)
    }
}

pub fn render_json_full(snapshot: &StatsSnapshot, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(default_json(snapshot)),
    }
}

pub fn render_json_selected(
    snapshot: &StatsSnapshot,
    fields: &FieldSelection,
    style: JsonStyle,
) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(selected_json(snapshot, fields)),
    }
}

/// `key=value` pairs for the selected fields, one per chapter for `chapters`.
pub fn render_selected_pairs(
    snapshot: &StatsSnapshot,
    fields: &FieldSelection,
) -> Vec<(&'static str, String)> {
    let mut out: Vec<(&'static str, String)> = fields
        .character_fields()
        .into_iter()
        .map(|field| (field.key(), snapshot.character.value(field).to_string()))
        .collect();

    if fields.chapters {
        for chapter in &snapshot.chapters {
            out.push((
                "chapter",
                format!(
                    "{}: A={} B={} C={}",
                    chapter.display_name, chapter.a.completed, chapter.b.completed, chapter.c.completed
                ),
            ));
        }
    }

    out
}

pub fn render_sheet(snapshot: &StatsSnapshot) -> String {
    render_text(snapshot, TextRenderOptions::default())
}

pub fn render_text(snapshot: &StatsSnapshot, options: TextRenderOptions) -> String {
    let mut out = String::new();
    writeln!(&mut out).expect("writing to String cannot fail");
    writeln!(&mut out, "{}", centered_no_trailing("CELESTE", SHEET_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(
        &mut out,
        "{}",
        centered_no_trailing("TOTAL STATISTICS", SHEET_WIDTH)
    )
    .expect("writing to String cannot fail");
    writeln!(&mut out).expect("writing to String cannot fail");

    write_totals_grid(&mut out, &snapshot.character);

    for chapter in &snapshot.chapters {
        writeln!(&mut out).expect("writing to String cannot fail");
        write_chapter(&mut out, chapter, options);
    }
    writeln!(&mut out).expect("writing to String cannot fail");

    out
}

fn default_json(snapshot: &StatsSnapshot) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();
    out.insert(
        "character".to_string(),
        character_to_json(&snapshot.character),
    );
    out.insert("chapters".to_string(), chapters_to_json(&snapshot.chapters));
    out
}

fn selected_json(snapshot: &StatsSnapshot, fields: &FieldSelection) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();
    for field in fields.character_fields() {
        out.insert(
            field.key().to_string(),
            JsonValue::String(snapshot.character.value(field).to_string()),
        );
    }
    if fields.chapters {
        out.insert("chapters".to_string(), chapters_to_json(&snapshot.chapters));
    }
    out
}

fn character_to_json(character: &CharacterStats) -> JsonValue {
    let mut m = JsonMap::new();
    for (label, value) in character.entries() {
        m.insert(label, JsonValue::String(value.to_string()));
    }
    JsonValue::Object(m)
}

fn chapters_to_json(chapters: &[ChapterStats]) -> JsonValue {
    JsonValue::Array(
        chapters
            .iter()
            .map(|chapter| {
                let mut m = JsonMap::new();
                m.insert("id".to_string(), JsonValue::from(chapter.id));
                m.insert(
                    "name".to_string(),
                    JsonValue::String(chapter.display_name.clone()),
                );
                m.insert(
                    "cassette".to_string(),
                    JsonValue::String(chapter.cassette.clone()),
                );
                m.insert("a".to_string(), side_to_json(&chapter.a));
                m.insert("b".to_string(), side_to_json(&chapter.b));
                m.insert("c".to_string(), side_to_json(&chapter.c));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn side_to_json(side: &SideStats) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "strawberries".to_string(),
        JsonValue::String(side.strawberries.clone()),
    );
    m.insert(
        "completed".to_string(),
        JsonValue::String(side.completed.clone()),
    );
    m.insert("deaths".to_string(), JsonValue::String(side.deaths.clone()));
    m.insert("time".to_string(), JsonValue::String(side.time.clone()));
    m.insert(
        "best_time".to_string(),
        JsonValue::String(side.best_time.clone()),
    );
    m.insert(
        "best_dashes".to_string(),
        JsonValue::String(side.best_dashes.clone()),
    );
    m.insert(
        "best_deaths".to_string(),
        JsonValue::String(side.best_deaths.clone()),
    );
    m.insert(
        "heart_gem".to_string(),
        JsonValue::String(side.heart_gem.clone()),
    );
    JsonValue::Object(m)
}

fn write_totals_grid(out: &mut String, character: &CharacterStats) {
    let cells: Vec<String> = character
        .entries()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect();

    for pair in cells.chunks(2) {
        let left = pair.first().map(String::as_str).unwrap_or("");
        let right = pair.get(1).map(String::as_str).unwrap_or("");
        let line = format!(
            "  {:<a$}{}",
            fit_column(left, TOTALS_COL_WIDTH),
            right,
            a = TOTALS_COL_WIDTH
        );
        writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
    }
}

fn write_chapter(out: &mut String, chapter: &ChapterStats, options: TextRenderOptions) {
    writeln!(out, " ::: {} :::", chapter.display_name).expect("writing to String cannot fail");
    if options.collapsed {
        return;
    }

    let hearts: Vec<&str> = HEART_COLOURS
        .iter()
        .filter(|(side, _)| chapter.side(*side).has_heart_gem())
        .map(|(_, colour)| *colour)
        .collect();
    if !hearts.is_empty() {
        writeln!(out, "  Hearts: {}", hearts.join(", ")).expect("writing to String cannot fail");
    }
    if !chapter.cassette.is_empty() {
        writeln!(out, "  Cassette: {}", chapter.cassette).expect("writing to String cannot fail");
    }

    if !chapter.a.is_completed() {
        writeln!(out, "  {} not complete.", chapter.display_name)
            .expect("writing to String cannot fail");
        return;
    }

    if is_single_side(&chapter.display_name) {
        write_side(out, &chapter.display_name, &chapter.a);
        return;
    }

    for (side, stats) in chapter.sides() {
        if side == Side::A || stats.is_completed() {
            write_side(out, side.title(), stats);
        }
    }
}

fn write_side(out: &mut String, title: &str, side: &SideStats) {
    writeln!(out, "   {title}").expect("writing to String cannot fail");

    let current = [
        format!("Deaths: {}", side.deaths),
        format!("Heart Crystal?: {}", side.heart_gem),
        format!("Strawberries: {}", side.strawberries),
        format!("Time: {}", side.time),
    ];
    let best = [
        format!("Best Deaths: {}", side.best_deaths),
        format!("Best Time: {}", side.best_time),
        format!("Best Dashes: {}", side.best_dashes),
    ];

    for (row, left) in current.iter().enumerate() {
        let right = best.get(row).map(String::as_str).unwrap_or("");
        let line = format!(
            "     {:<a$}{}",
            fit_column(left, SIDE_COL_WIDTH),
            right,
            a = SIDE_COL_WIDTH
        );
        writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
    }
}

fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() < width {
        return value.to_string();
    }
    if width <= 4 {
        return value.chars().take(width).collect();
    }

    // keep one column of gap before the next cell
    let mut out = String::with_capacity(width);
    for ch in value.chars().take(width - 4) {
        out.push(ch);
    }
    out.push_str("...");
    out
}

fn centered_no_trailing(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }

    let left_padding = (width - len) / 2;
    format!("{}{}", " ".repeat(left_padding), value)
}
