//! Output formatting utilities for the shell
//!
//! Listings render either as fixed-width text tables or as JSON. Table
//! columns are left-justified and padded/truncated to a fixed width: 24
//! characters for ids, 20 for everything else.

use anyhow::{anyhow, Result};
use colored::*;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::{self, Display};
use std::str::FromStr;
use trello_core::{Action, Board, Card, List};

use tabled::Tabled;

/// Width of the leading id column
pub const ID_WIDTH: usize = 24;

/// Width of every other column
pub const COLUMN_WIDTH: usize = 20;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width table output
    #[default]
    Table,
    /// JSON output
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow!("unknown output format '{}', expected table or json", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        })
    }
}

#[derive(Tabled)]
struct BoardRow {
    id: String,
    name: String,
    #[tabled(rename = "shorturl")]
    short_url: String,
}

#[derive(Tabled)]
struct NamedRow {
    id: String,
    name: String,
}

#[derive(Tabled)]
struct ActionRow {
    id: String,
    #[tabled(rename = "type")]
    kind: String,
    text: String,
}

/// Format boards: id, name, short URL
pub fn format_boards(boards: &[Board], format: &OutputFormat) -> Result<String> {
    format_listing(boards, format, |b| BoardRow {
        id: b.id.clone(),
        name: b.name.clone(),
        short_url: b.short_url.clone(),
    })
}

/// Format lists: id, name
pub fn format_lists(lists: &[List], format: &OutputFormat) -> Result<String> {
    format_listing(lists, format, |l| NamedRow {
        id: l.id.clone(),
        name: l.name.clone(),
    })
}

/// Format cards: id, name
pub fn format_cards(cards: &[Card], format: &OutputFormat) -> Result<String> {
    format_listing(cards, format, |c| NamedRow {
        id: c.id.clone(),
        name: c.name.clone(),
    })
}

/// Format actions: id, type, text body
pub fn format_actions(actions: &[Action], format: &OutputFormat) -> Result<String> {
    format_listing(actions, format, |a| ActionRow {
        id: a.id.clone(),
        kind: a.kind.clone(),
        text: a.text().to_string(),
    })
}

fn format_listing<E, R, F>(entities: &[E], format: &OutputFormat, to_row: F) -> Result<String>
where
    E: Serialize,
    R: Tabled,
    F: Fn(&E) -> R,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entities)?),
        OutputFormat::Table => {
            let rows: Vec<R> = entities.iter().map(to_row).collect();
            Ok(fixed_width_table(&rows))
        }
    }
}

/// Header line followed by one line per row, in input order
fn fixed_width_table<R: Tabled>(rows: &[R]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(fixed_width_line(&R::headers()));
    for row in rows {
        lines.push(fixed_width_line(&row.fields()));
    }
    lines.join("\n")
}

fn fixed_width_line(cells: &[Cow<'_, str>]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let width = if i == 0 { ID_WIDTH } else { COLUMN_WIDTH };
            // Keep multi-line comment bodies on one row
            let cell = cell.replace(['\n', '\r', '\t'], " ");
            format!("{:<width$.width$}", cell, width = width)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a failed remote call as `<context> error: <message>`
pub fn format_error(context: &str, err: &dyn Display) -> String {
    format!("{} error: {}", context, err).red().to_string()
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}
