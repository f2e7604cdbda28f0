//
//  exonet-api
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `exonet` command-line tool:
//!
//! - **Table format**: Human-readable tables and field lists for the terminal
//! - **JSON format**: Pretty-printed JSON (`--json`) for scripting
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: The available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableOutput`]: Trait for values that can be rendered as a table
//! - [`ResourceTable`] / [`ResourceDetail`]: Views of sets and single resources
//!
//! ## Example
//!
//! ```rust,ignore
//! use exonet_api::output::{Column, OutputWriter, ResourceTable};
//!
//! let writer = OutputWriter::new(OutputFormat::Table);
//! writer.write(&ResourceTable::new(&zones, vec![Column::new("Name", "name")]))?;
//! writer.write_success("Zone deleted");
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use comfy_table::Cell;
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::structures::{Entry, Resource, ResourceSet};
use crate::util::{display_value, truncate};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Picks JSON when `json` is set, tables otherwise.
    pub fn from_flag(json: bool) -> Self {
        Self::new(if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    pub fn write_error(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Values that can print themselves as a table.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

/// A table column showing one attribute.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub attribute: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, attribute: &str) -> Self {
        Self {
            header: header.to_string(),
            attribute: attribute.to_string(),
            width: 50,
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    fn cell(&self, entry: &Entry, color: bool) -> Cell {
        let value = entry
            .attribute(&self.attribute)
            .map(display_value)
            .unwrap_or_else(|_| "-".to_string());
        let value = truncate(&value, self.width);
        if self.attribute == "status" {
            status_cell(&value, color)
        } else {
            value_cell(&value)
        }
    }
}

/// A resource set shown as a table: an `ID` column followed by `columns`.
///
/// Without columns, every attribute of the first resource becomes a column.
pub struct ResourceTable<'a> {
    set: &'a ResourceSet,
    columns: Vec<Column>,
}

impl<'a> ResourceTable<'a> {
    pub fn new(set: &'a ResourceSet, columns: Vec<Column>) -> Self {
        let columns = if columns.is_empty() {
            set.resources()
                .next()
                .map(|first| {
                    first
                        .attributes()
                        .keys()
                        .map(|name| Column::new(name, name).width(30))
                        .collect()
                })
                .unwrap_or_default()
        } else {
            columns
        };
        Self { set, columns }
    }
}

impl TableOutput for ResourceTable<'_> {
    fn print_table(&self, color: bool) {
        if self.set.is_empty() {
            println!("No resources found");
            return;
        }

        let mut builder = TableBuilder::new(color)
            .headers(std::iter::once("ID".to_string()).chain(self.columns.iter().map(|c| c.header.clone())));

        for entry in self.set {
            let id = Cell::new(entry.id().unwrap_or("-"));
            builder = builder.row(
                std::iter::once(id)
                    .chain(self.columns.iter().map(|c| c.cell(entry, color)))
                    .collect(),
            );
        }
        builder.print();

        if let Some(total) = self.set.total() {
            println!("Showing {} of {}", self.set.len(), total);
        }
    }
}

impl Serialize for ResourceTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries: Vec<Value> = self.set.iter().map(entry_json).collect();
        entries.serialize(serializer)
    }
}

/// A single resource shown as a list of fields.
pub struct ResourceDetail<'a> {
    resource: &'a Resource,
    fields: Vec<(String, String)>,
}

impl<'a> ResourceDetail<'a> {
    /// Shows `fields` as `(label, attribute)` pairs, or every attribute when
    /// `fields` is empty.
    pub fn new(resource: &'a Resource, fields: &[(&str, &str)]) -> Self {
        let fields = if fields.is_empty() {
            resource
                .attributes()
                .keys()
                .map(|name| (name.clone(), name.clone()))
                .collect()
        } else {
            fields
                .iter()
                .map(|(label, attribute)| (label.to_string(), attribute.to_string()))
                .collect()
        };
        Self { resource, fields }
    }
}

impl TableOutput for ResourceDetail<'_> {
    fn print_table(&self, color: bool) {
        print_header(&format!(
            "{} {}",
            self.resource.resource_type(),
            self.resource.id().unwrap_or_default()
        ));
        for (label, attribute) in &self.fields {
            let value = self
                .resource
                .attribute(attribute)
                .map(display_value)
                .unwrap_or_else(|_| "-".to_string());
            let value = if attribute == "status" {
                format_status(&value, color)
            } else {
                value
            };
            print_field(label, &value, color);
        }
    }
}

impl Serialize for ResourceDetail<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        entry_json(&Entry::Resource(self.resource.clone())).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::structures::Document;

    fn zones() -> ResourceSet {
        Document::from_value(&json!({"data": [
            {"type": "dns_zones", "id": "a", "attributes": {"name": "example.com", "ttl": 3600}},
            {"type": "dns_zones", "id": "b", "attributes": {"name": "example.org", "ttl": 60}}
        ]}))
        .unwrap()
        .into_set()
        .unwrap()
    }

    #[test]
    fn test_table_defaults_to_first_resource_attributes() {
        let zones = zones();
        let table = ResourceTable::new(&zones, Vec::new());
        let headers: Vec<_> = table.columns.iter().map(|c| c.attribute.as_str()).collect();
        assert_eq!(headers, ["name", "ttl"]);
    }

    #[test]
    fn test_table_serializes_entries() {
        let zones = zones();
        let table = ResourceTable::new(&zones, vec![Column::new("Name", "name")]);
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value[1]["attributes"]["name"], "example.org");
    }

    #[test]
    fn test_column_cell_for_missing_attribute() {
        let zones = zones();
        let column = Column::new("Owner", "owner");
        assert_eq!(column.cell(&zones[0], false).content(), "-");
        assert_eq!(Column::new("TTL", "ttl").cell(&zones[0], false).content(), "3600");
    }

    #[test]
    fn test_output_writer_from_flag() {
        assert!(OutputWriter::from_flag(true).is_json());
        assert_eq!(OutputWriter::from_flag(false).format(), OutputFormat::Table);
    }
}
