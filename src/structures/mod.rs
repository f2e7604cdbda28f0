//
//  exonet-api
//  structures/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON:API Structures
//!
//! This module maps JSON:API documents returned by the Exonet API to typed
//! values, and builds request bodies from them.
//!
//! ## Mapping
//!
//! | Top-level `data` | Becomes |
//! |------------------|---------|
//! | An array | [`Document::Set`] |
//! | An object with `attributes` | [`Document::Resource`] |
//! | An object without `attributes` | [`Document::Identifier`] |
//! | Missing or `null` | A [`MalformedDocument`](crate::Error::MalformedDocument) error |
//!
//! ## Module Structure
//!
//! - [`identifier`]: [`ResourceIdentifier`], a resource by type and id
//! - [`resource`]: [`Resource`], with attributes and change tracking
//! - [`relationship`]: [`Relation`] and [`Relationship`]
//! - [`set`]: [`ResourceSet`] with pagination

pub mod identifier;
pub mod relationship;
pub mod resource;
pub mod set;

pub use identifier::ResourceIdentifier;
pub use relationship::{Linkage, Relation, Relationship, RelationshipLinks};
pub use resource::{PayloadScope, Resource};
pub use set::{Entry, PaginationLinks, ResourceSet};

use serde_json::Value;

use crate::api::{Error, Result};

/// A mapped JSON:API response document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Resource(Resource),
    Identifier(ResourceIdentifier),
    Set(ResourceSet),
}

impl Document {
    /// Parses and maps a response body.
    ///
    /// # Example
    ///
    /// ```rust
    /// use exonet_api::Document;
    ///
    /// let body = r#"{"data": {"type": "dns_zones", "id": "abc", "attributes": {"name": "example.com"}}}"#;
    /// let zone = Document::from_json(body).unwrap().into_resource().unwrap();
    ///
    /// assert_eq!(zone.id(), Some("abc"));
    /// assert_eq!(zone.attribute("name").unwrap(), "example.com");
    /// ```
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(&value)
    }

    /// Maps an already parsed document.
    pub fn from_value(value: &Value) -> Result<Self> {
        let document = value
            .as_object()
            .ok_or_else(|| Error::MalformedDocument("document is not an object".to_string()))?;

        match document.get("data") {
            Some(Value::Array(_)) => ResourceSet::from_document(document).map(Self::Set),
            Some(Value::Object(object)) if object.contains_key("attributes") => {
                Resource::from_object(object).map(Self::Resource)
            }
            Some(Value::Object(object)) => {
                let mut identifier = ResourceIdentifier::from_object(object)?;
                relationship::read_relationships(
                    &mut identifier,
                    object.get("relationships").and_then(Value::as_object),
                )?;
                Ok(Self::Identifier(identifier))
            }
            _ => Err(Error::MalformedDocument(
                "document has no `data` member".to_string(),
            )),
        }
    }

    /// The single resource.
    ///
    /// # Errors
    ///
    /// Fails with a malformed-document error for identifiers and sets.
    pub fn into_resource(self) -> Result<Resource> {
        match self {
            Self::Resource(resource) => Ok(resource),
            other => Err(unexpected("a resource", &other)),
        }
    }

    /// The collection.
    ///
    /// # Errors
    ///
    /// Fails with a malformed-document error for single resources and
    /// identifiers.
    pub fn into_set(self) -> Result<ResourceSet> {
        match self {
            Self::Set(set) => Ok(set),
            other => Err(unexpected("a collection", &other)),
        }
    }

    /// The identifier of a single resource or identifier document.
    pub fn into_identifier(self) -> Result<ResourceIdentifier> {
        match self {
            Self::Identifier(identifier) => Ok(identifier),
            Self::Resource(resource) => Ok(resource.identifier().clone()),
            other => Err(unexpected("a single resource", &other)),
        }
    }
}

fn unexpected(expected: &str, document: &Document) -> Error {
    let found = match document {
        Document::Resource(_) => "a resource",
        Document::Identifier(_) => "an identifier",
        Document::Set(_) => "a collection",
    };
    Error::MalformedDocument(format!("expected {}, found {}", expected, found))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_array_becomes_set() {
        let document = Document::from_value(&json!({"data": []})).unwrap();
        assert!(document.into_set().unwrap().is_empty());
    }

    #[test]
    fn test_object_without_attributes_is_identifier() {
        let document = Document::from_value(&json!({"data": {"type": "dns_zones", "id": 7}})).unwrap();
        let identifier = document.into_identifier().unwrap();
        assert_eq!(identifier.id(), Some("7"));
    }

    #[test]
    fn test_missing_or_null_data_is_malformed() {
        for value in [json!({}), json!({"data": null}), json!([]), json!({"data": "x"})] {
            assert!(matches!(
                Document::from_value(&value),
                Err(Error::MalformedDocument(_))
            ));
        }
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        assert!(matches!(Document::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_wrong_shape_conversion() {
        let document = Document::from_value(&json!({"data": []})).unwrap();
        let error = document.into_resource().unwrap_err();
        assert_eq!(error.to_string(), "Malformed document: expected a resource, found a collection");
    }

    #[test]
    fn test_resource_relationships_are_mapped() {
        let document = Document::from_value(&json!({"data": {
            "type": "dns_zones",
            "id": "abc",
            "attributes": {"name": "example.com"},
            "relationships": {"records": {
                "links": {"related": "https://api.exonet.nl/dns_zones/abc/records"},
                "data": [{"type": "dns_records", "id": "r1"}]
            }}
        }}))
        .unwrap();

        let zone = document.into_resource().unwrap();
        let records = zone.relationship("records").unwrap();
        assert_eq!(records.relation().owner_id(), Some("abc"));
        assert_eq!(records.links().related.as_deref(), Some("https://api.exonet.nl/dns_zones/abc/records"));
        assert_eq!(records.linkage().unwrap().as_many().unwrap().len(), 1);
    }
}
