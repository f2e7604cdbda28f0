//
//  exonet-api
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Builds terminal tables with `comfy_table`, using UTF-8 box drawing and a
//! layout that adapts to the terminal width.
//!
//! ## Example
//!
//! ```rust,ignore
//! use exonet_api::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["ID", "Name", "TTL"])
//!     .row(["Yd4Ew9q2dPrZ", "www", "3600"])
//!     .print();
//! ```

use comfy_table::{
    presets::UTF8_FULL, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
};

/// An empty table with the default preset. Styling is stripped when `color`
/// is off so piped output stays plain.
pub fn create_table(color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if !color {
        table.force_no_tty();
    }
    table
}

/// Builds a table one row of [`Cell`]s at a time.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new(color: bool) -> Self {
        Self {
            table: create_table(color),
            color,
        }
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let color = self.color;
        self.table.set_header(headers.into_iter().map(|header| {
            let cell = Cell::new(header.into());
            if color {
                cell.fg(Color::Cyan).add_attribute(Attribute::Bold)
            } else {
                cell
            }
        }));
        self
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.table.add_row(cells);
        self
    }

    /// Adds a row of plain text cells.
    pub fn text_row<I, S>(self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells = cells.into_iter().map(|text| value_cell(text.as_ref())).collect();
        self.row(cells)
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

/// A cell for an attribute value. Numbers (TTLs, priorities, counts) are
/// right aligned.
pub fn value_cell(value: &str) -> Cell {
    let cell = Cell::new(value);
    if !value.is_empty() && value.parse::<f64>().is_ok() {
        cell.set_alignment(CellAlignment::Right)
    } else {
        cell
    }
}

fn status_color(status: &str) -> Option<Color> {
    match status.to_lowercase().as_str() {
        "open" | "active" | "in_progress" => Some(Color::Green),
        "closed" | "resolved" => Some(Color::Blue),
        "cancelled" | "failed" | "error" => Some(Color::Red),
        "pending" | "waiting" | "awaiting_reply" => Some(Color::Yellow),
        _ => None,
    }
}

/// A cell for a ticket or resource status, colored by meaning.
pub fn status_cell(status: &str, color: bool) -> Cell {
    let cell = Cell::new(status);
    match status_color(status) {
        Some(fg) if color => cell.fg(fg),
        _ => cell,
    }
}

/// A status colored for line output (outside tables).
pub fn format_status(status: &str, color: bool) -> String {
    use console::style;

    if !color {
        return status.to_string();
    }
    match status_color(status) {
        Some(Color::Green) => style(status).green().to_string(),
        Some(Color::Blue) => style(status).blue().to_string(),
        Some(Color::Red) => style(status).red().to_string(),
        Some(Color::Yellow) => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_contains_rows() {
        let table = TableBuilder::new(false)
            .headers(["ID", "Name", "TTL"])
            .text_row(["abc", "example.com", "3600"])
            .build();
        let rendered = table.to_string();
        assert!(rendered.contains("example.com"));
        assert!(rendered.contains("TTL"));
    }

    #[test]
    fn test_numbers_are_right_aligned() {
        let rendered = TableBuilder::new(false)
            .headers(["Content", "TTL"])
            .text_row(["www", "60"])
            .text_row(["mail", "86400"])
            .build()
            .to_string();
        assert!(rendered.contains("    60 "));
    }

    #[test]
    fn test_status_color() {
        assert_eq!(status_color("Open"), Some(Color::Green));
        assert_eq!(status_color("awaiting_reply"), Some(Color::Yellow));
        assert_eq!(status_color("unknown"), None);
    }

    #[test]
    fn test_format_status_without_color() {
        assert_eq!(format_status("open", false), "open");
    }
}
