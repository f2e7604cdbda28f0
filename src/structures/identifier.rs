//
//  exonet-api
//  structures/identifier.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Identifiers
//!
//! A [`ResourceIdentifier`] is a reference to a resource by `type` and `id`,
//! without its attributes. Identifiers show up as relationship linkage and as
//! the handle for operations that need no attributes: fetching, deleting and
//! linking resources.
//!
//! ## Example
//!
//! ```rust,no_run
//! use exonet_api::{Client, PersonalAccessToken, ResourceIdentifier};
//!
//! # async fn example() -> exonet_api::Result<()> {
//! let client = Client::new(PersonalAccessToken::new("your-token"))?;
//!
//! // Unlink a record from its zone
//! let mut zone = ResourceIdentifier::new("dns_zones", "VX09kwR3KxNo");
//! zone.set_relationship("records", ResourceIdentifier::new("dns_records", "Yd4Ew9q2dPrZ"));
//! zone.delete(&client).await?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use super::relationship::{Linkage, Relation, Relationship};
use super::Document;
use crate::api::request::join_path;
use crate::api::{ApiError, Client, Error, Request, Result};

/// A reference to a resource by type and id.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceIdentifier {
    resource_type: String,
    id: Option<String>,
    relationships: BTreeMap<String, Relationship>,
    changed_relationships: Vec<String>,
}

impl ResourceIdentifier {
    /// References the resource of `resource_type` with `id`.
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: Some(id.into()),
            relationships: BTreeMap::new(),
            changed_relationships: Vec::new(),
        }
    }

    /// An identifier for a resource that does not exist yet.
    pub fn unsaved(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: None,
            relationships: BTreeMap::new(),
            changed_relationships: Vec::new(),
        }
    }

    /// Reads `type` and `id` from a JSON:API resource object. Numeric ids are
    /// converted to strings. Relationships are not read.
    pub(crate) fn from_object(object: &Map<String, Value>) -> Result<Self> {
        let resource_type = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedDocument("resource object has no `type`".to_string()))?;

        let id = match object.get("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            Some(other) => {
                return Err(Error::MalformedDocument(format!(
                    "resource id must be a string, got {}",
                    other
                )))
            }
        };

        Ok(Self {
            resource_type: resource_type.to_string(),
            id,
            relationships: BTreeMap::new(),
            changed_relationships: Vec::new(),
        })
    }

    /// The resource type, for example `dns_zones`.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The resource id, or `None` for a resource that was not saved yet.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub(crate) fn require_id(&self) -> Result<&str> {
        self.id.as_deref().ok_or_else(|| {
            ApiError::invalid_request(format!(
                "A '{}' resource without an id cannot be used in this request.",
                self.resource_type
            ))
            .into()
        })
    }

    /// A copy of this identifier with only `type` and `id`.
    pub fn bare(&self) -> Self {
        Self {
            resource_type: self.resource_type.clone(),
            id: self.id.clone(),
            relationships: BTreeMap::new(),
            changed_relationships: Vec::new(),
        }
    }

    /// The `{"type": ..., "id": ...}` linkage object for this resource.
    pub fn to_linkage(&self) -> Value {
        json!({
            "type": self.resource_type,
            "id": self.id,
        })
    }

    /// A request for this identifier's resource type.
    pub fn request(&self, client: &Client) -> Request {
        client.resource(&self.resource_type)
    }

    /// Fetches the full resource, or the whole collection for an identifier
    /// without an id.
    pub async fn get(&self, client: &Client) -> Result<Document> {
        let request = self.request(client);
        match self.id() {
            Some(id) => request.find(id).await,
            None => request.get().await,
        }
    }

    /// Deletes the resource, or only its changed relationships.
    ///
    /// Without changed relationships this is a single `DELETE <type>/<id>`.
    /// Otherwise every changed relationship is unlinked with
    /// `DELETE <type>/<id>/relationships/<name>` carrying the linkage to remove,
    /// and the resource itself is kept.
    pub async fn delete(&self, client: &Client) -> Result<bool> {
        let id = self.require_id()?;
        let request = self.request(client);

        if self.changed_relationships.is_empty() {
            return request.delete(id, None).await;
        }

        for (name, payload) in self.changed_relationship_payloads() {
            let path = join_path([id, "relationships", name.as_str()]);
            request.delete(&path, Some(&payload)).await?;
        }

        Ok(true)
    }

    /// Links every changed relationship with
    /// `POST <type>/<id>/relationships/<name>`.
    pub async fn post_relationships(&self, client: &Client) -> Result<bool> {
        let id = self.require_id()?;
        let request = self.request(client);

        for (name, payload) in self.changed_relationship_payloads() {
            let path = join_path([id, "relationships", name.as_str()]);
            request.post_relationship(&path, &payload).await?;
        }

        Ok(true)
    }

    /// A lazy handle on the related resources called `name`.
    pub fn related(&self, name: &str) -> Relation {
        Relation::new(name, &self.resource_type, self.id.clone())
    }

    /// The relationship called `name`, if it is known.
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.get(name)
    }

    /// The relationship called `name`, created empty when it is not known yet.
    pub fn relationship_mut(&mut self, name: &str) -> &mut Relationship {
        let resource_type = &self.resource_type;
        let id = &self.id;
        self.relationships
            .entry(name.to_string())
            .or_insert_with(|| Relationship::new(name, resource_type, id.clone()))
    }

    /// Replaces the linkage of the relationship called `name` and marks it as
    /// changed.
    pub fn set_relationship(&mut self, name: &str, linkage: impl Into<Linkage>) -> &mut Self {
        self.relationship_mut(name).set_linkage(linkage);
        if !self.changed_relationships.iter().any(|n| n == name) {
            self.changed_relationships.push(name.to_string());
        }
        self
    }

    pub(crate) fn insert_relationship(&mut self, relationship: Relationship) {
        self.relationships
            .insert(relationship.name().to_string(), relationship);
    }

    /// Every known relationship, by name.
    pub fn relationships(&self) -> &BTreeMap<String, Relationship> {
        &self.relationships
    }

    /// Names of the relationships changed since the last reset.
    pub fn changed_relationships(&self) -> &[String] {
        &self.changed_relationships
    }

    /// Forgets which relationships were changed.
    pub fn reset_changed_relationships(&mut self) {
        self.changed_relationships.clear();
    }

    /// `{"data": <linkage>}` bodies for every changed relationship.
    pub(crate) fn changed_relationship_payloads(&self) -> Vec<(String, Value)> {
        self.changed_relationships
            .iter()
            .map(|name| {
                let data = self
                    .relationships
                    .get(name)
                    .and_then(Relationship::to_linkage)
                    .unwrap_or(Value::Null);
                (name.clone(), json!({ "data": data }))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_becomes_string() {
        let object = json!({"type": "tickets", "id": 42});
        let identifier = ResourceIdentifier::from_object(object.as_object().unwrap()).unwrap();
        assert_eq!(identifier.id(), Some("42"));
    }

    #[test]
    fn test_missing_type_is_malformed() {
        let object = json!({"id": "abc"});
        let error = ResourceIdentifier::from_object(object.as_object().unwrap()).unwrap_err();
        assert!(matches!(error, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_set_relationship_marks_changed_once() {
        let mut identifier = ResourceIdentifier::new("dns_zones", "abc");
        identifier.set_relationship("records", ResourceIdentifier::new("dns_records", "1"));
        identifier.set_relationship("records", ResourceIdentifier::new("dns_records", "2"));

        assert_eq!(identifier.changed_relationships(), ["records".to_string()]);
        let payloads = identifier.changed_relationship_payloads();
        assert_eq!(
            payloads[0].1,
            json!({"data": {"type": "dns_records", "id": "2"}})
        );

        identifier.reset_changed_relationships();
        assert!(identifier.changed_relationships().is_empty());
        assert!(identifier.relationship("records").is_some());
    }

    #[test]
    fn test_related_builds_relation() {
        let identifier = ResourceIdentifier::new("dns_zones", "abc");
        let relation = identifier.related("records");
        assert_eq!(relation.name(), "records");
        assert_eq!(relation.owner_type(), "dns_zones");
        assert_eq!(relation.owner_id(), Some("abc"));
    }

    #[test]
    fn test_unsaved_has_no_id() {
        let identifier = ResourceIdentifier::unsaved("dns_records");
        assert_eq!(identifier.id(), None);
        assert_eq!(identifier.to_linkage(), json!({"type": "dns_records", "id": null}));
        assert!(identifier.require_id().is_err());
    }
}
