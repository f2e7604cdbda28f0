//
//  exonet-api
//  structures/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resources
//!
//! A [`Resource`] is a full JSON:API resource: an identifier plus attributes
//! and relationships. Attribute and relationship changes are tracked, so that
//! [`Resource::patch`] only sends what was changed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use exonet_api::{Client, PersonalAccessToken, Resource, ResourceIdentifier};
//!
//! # async fn example() -> exonet_api::Result<()> {
//! let client = Client::new(PersonalAccessToken::new("your-token"))?;
//!
//! let mut record = Resource::new("dns_records");
//! record
//!     .set_attribute("type", "A")
//!     .set_attribute("name", "www")
//!     .set_attribute("content", "192.0.2.1")
//!     .set_attribute("ttl", 3600)
//!     .set_relationship("zone", ResourceIdentifier::new("dns_zones", "VX09kwR3KxNo"));
//!
//! let created = record.post(&client).await?.into_resource()?;
//! println!("created {}", created.id().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use super::identifier::ResourceIdentifier;
use super::relationship::{read_relationships, Linkage, Relation, Relationship};
use super::Document;
use crate::api::request::join_path;
use crate::api::{Client, Error, Result};

/// Which parts of a resource [`Resource::to_payload`] includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadScope {
    /// All attributes and every relationship with linkage.
    Full,
    /// Only changed attributes, and no relationships.
    ChangedAttributes,
    /// No attributes, and only changed relationships.
    ChangedRelationships,
}

/// A full JSON:API resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    identifier: ResourceIdentifier,
    attributes: Map<String, Value>,
    changed_attributes: Vec<String>,
}

impl Resource {
    /// A new, unsaved resource of `resource_type`.
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            identifier: ResourceIdentifier::unsaved(resource_type),
            attributes: Map::new(),
            changed_attributes: Vec::new(),
        }
    }

    /// An existing resource, known by id, with no attributes loaded.
    pub fn with_id(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            identifier: ResourceIdentifier::new(resource_type, id),
            attributes: Map::new(),
            changed_attributes: Vec::new(),
        }
    }

    /// Reads a resource object (`type`, `id`, `attributes`, `relationships`).
    pub(crate) fn from_object(object: &Map<String, Value>) -> Result<Self> {
        let mut identifier = ResourceIdentifier::from_object(object)?;

        let attributes = match object.get("attributes") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(attributes)) => attributes.clone(),
            // The API sends `[]` for a resource without attributes.
            Some(Value::Array(items)) if items.is_empty() => Map::new(),
            Some(other) => {
                return Err(Error::MalformedDocument(format!(
                    "resource attributes must be an object, got {}",
                    other
                )))
            }
        };

        read_relationships(
            &mut identifier,
            object.get("relationships").and_then(Value::as_object),
        )?;

        Ok(Self {
            identifier,
            attributes,
            changed_attributes: Vec::new(),
        })
    }

    pub fn resource_type(&self) -> &str {
        self.identifier.resource_type()
    }

    pub fn id(&self) -> Option<&str> {
        self.identifier.id()
    }

    /// The identifier of this resource, relationships included.
    pub fn identifier(&self) -> &ResourceIdentifier {
        &self.identifier
    }

    /// Reads an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedAttribute`] when the resource has no attribute
    /// called `name`.
    pub fn attribute(&self, name: &str) -> Result<&Value> {
        self.attributes
            .get(name)
            .ok_or_else(|| Error::UndefinedAttribute(name.to_string()))
    }

    /// Whether the resource has an attribute called `name`.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Sets an attribute and marks it as changed.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.attributes.insert(name.to_string(), value.into());
        if !self.changed_attributes.iter().any(|n| n == name) {
            self.changed_attributes.push(name.to_string());
        }
        self
    }

    /// Names of the attributes changed since the last reset.
    pub fn changed_attributes(&self) -> &[String] {
        &self.changed_attributes
    }

    /// Forgets which attributes were changed. The values are kept.
    pub fn reset_changed_attributes(&mut self) {
        self.changed_attributes.clear();
    }

    pub fn related(&self, name: &str) -> Relation {
        self.identifier.related(name)
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.identifier.relationship(name)
    }

    pub fn relationship_mut(&mut self, name: &str) -> &mut Relationship {
        self.identifier.relationship_mut(name)
    }

    pub fn relationships(&self) -> &BTreeMap<String, Relationship> {
        self.identifier.relationships()
    }

    /// Replaces a relationship's linkage and marks it as changed.
    pub fn set_relationship(&mut self, name: &str, linkage: impl Into<Linkage>) -> &mut Self {
        self.identifier.set_relationship(name, linkage);
        self
    }

    pub fn changed_relationships(&self) -> &[String] {
        self.identifier.changed_relationships()
    }

    pub fn reset_changed_relationships(&mut self) {
        self.identifier.reset_changed_relationships();
    }

    /// Builds the JSON:API request body for this resource.
    ///
    /// The body is always `{"data": {"type", "id"?, "attributes", "relationships"?}}`.
    /// `attributes` is present even when empty; `relationships` only when at
    /// least one relationship with linkage is included.
    ///
    /// # Example
    ///
    /// ```rust
    /// use exonet_api::{PayloadScope, Resource};
    /// use serde_json::json;
    ///
    /// let mut zone = Resource::with_id("dns_zones", "abc");
    /// zone.set_attribute("name", "example.com");
    ///
    /// assert_eq!(
    ///     zone.to_payload(PayloadScope::ChangedAttributes),
    ///     json!({"data": {"type": "dns_zones", "id": "abc", "attributes": {"name": "example.com"}}})
    /// );
    /// ```
    pub fn to_payload(&self, scope: PayloadScope) -> Value {
        let mut data = Map::new();
        data.insert("type".to_string(), json!(self.resource_type()));
        if let Some(id) = self.id() {
            data.insert("id".to_string(), json!(id));
        }

        let attributes: Map<String, Value> = match scope {
            PayloadScope::Full => self.attributes.clone(),
            PayloadScope::ChangedAttributes => self
                .attributes
                .iter()
                .filter(|(name, _)| self.changed_attributes.contains(name))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            PayloadScope::ChangedRelationships => Map::new(),
        };
        data.insert("attributes".to_string(), Value::Object(attributes));

        if scope != PayloadScope::ChangedAttributes {
            let changed = self.changed_relationships();
            let relationships: Map<String, Value> = self
                .relationships()
                .iter()
                .filter(|(name, _)| scope == PayloadScope::Full || changed.contains(name))
                .filter_map(|(name, relationship)| {
                    relationship
                        .to_linkage()
                        .map(|linkage| (name.clone(), json!({ "data": linkage })))
                })
                .collect();

            if !relationships.is_empty() {
                data.insert("relationships".to_string(), Value::Object(relationships));
            }
        }

        json!({ "data": data })
    }

    /// Creates the resource with a `POST <type>` of the full payload and
    /// returns the created resource as the API echoes it.
    pub async fn post(&self, client: &Client) -> Result<Document> {
        self.identifier
            .request(client)
            .post(&self.to_payload(PayloadScope::Full), None)
            .await
    }

    /// Saves changes to an existing resource.
    ///
    /// Changed attributes are sent in one `PATCH <type>/<id>`; every changed
    /// relationship is sent to `PATCH <type>/<id>/relationships/<name>`. With
    /// nothing changed no request is made. Change tracking is not reset.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-request error when the resource has no id.
    pub async fn patch(&self, client: &Client) -> Result<bool> {
        let id = self.identifier.require_id()?;
        let request = self.identifier.request(client);

        if !self.changed_attributes.is_empty() {
            request
                .patch(id, &self.to_payload(PayloadScope::ChangedAttributes))
                .await?;
        }

        for (name, payload) in self.identifier.changed_relationship_payloads() {
            let path = join_path([id, "relationships", name.as_str()]);
            request.patch(&path, &payload).await?;
        }

        Ok(true)
    }

    /// Deletes the resource, or only its changed relationships. See
    /// [`ResourceIdentifier::delete`].
    pub async fn delete(&self, client: &Client) -> Result<bool> {
        self.identifier.delete(client).await
    }

    /// Links every changed relationship. See
    /// [`ResourceIdentifier::post_relationships`].
    pub async fn post_relationships(&self, client: &Client) -> Result<bool> {
        self.identifier.post_relationships(client).await
    }

    /// Fetches a fresh copy of this resource.
    pub async fn get(&self, client: &Client) -> Result<Document> {
        self.identifier.get(client).await
    }
}
