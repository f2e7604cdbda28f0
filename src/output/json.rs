//
//  exonet-api
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Pretty-printed JSON for `--json`, meant for piping into `jq` and scripts.
//!
//! Resources are written as `{"type", "id", "attributes", "relationships"}`
//! objects, with relationships reduced to their linkage.

use std::io::Write;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::structures::Entry;

pub fn write_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// The JSON shape of one set entry.
pub fn entry_json(entry: &Entry) -> Value {
    let identifier = entry.identifier();
    let relationships: Map<String, Value> = identifier
        .relationships()
        .iter()
        .map(|(name, relationship)| {
            (
                name.clone(),
                relationship.to_linkage().unwrap_or(Value::Null),
            )
        })
        .collect();

    let mut object = json!({
        "type": entry.resource_type(),
        "id": entry.id(),
    });
    if let Some(resource) = entry.as_resource() {
        object["attributes"] = Value::Object(resource.attributes().clone());
    }
    if !relationships.is_empty() {
        object["relationships"] = Value::Object(relationships);
    }
    object
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::{Resource, ResourceIdentifier};

    #[test]
    fn test_write_json_to() {
        let mut buffer = Vec::new();
        write_json_to(&mut buffer, &json!({"name": "test"})).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "{\n  \"name\": \"test\"\n}\n");
    }

    #[test]
    fn test_entry_json() {
        let mut zone = Resource::with_id("dns_zones", "abc");
        zone.set_attribute("name", "example.com");
        zone.set_relationship("customer", ResourceIdentifier::new("customers", "c1"));

        assert_eq!(
            entry_json(&Entry::from(zone)),
            json!({
                "type": "dns_zones",
                "id": "abc",
                "attributes": {"name": "example.com"},
                "relationships": {"customer": {"type": "customers", "id": "c1"}}
            })
        );
    }

    #[test]
    fn test_identifier_entry_json() {
        let entry = Entry::from(ResourceIdentifier::new("tickets", "t1"));
        assert_eq!(entry_json(&entry), json!({"type": "tickets", "id": "t1"}));
    }
}
