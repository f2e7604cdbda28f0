//
//  exonet-api
//  structures/relationship.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Relations and Relationships
//!
//! Two handles exist for the resources connected to another resource:
//!
//! | Type | Targets | Used for |
//! |------|---------|----------|
//! | [`Relation`] | `<type>/<id>/<name>` | Fetching the related resources themselves |
//! | [`Relationship`] | `<type>/<id>/relationships/<name>` | Reading and changing the linkage |
//!
//! A relationship additionally holds the linkage the API returned (one
//! identifier or a set of them) and its `self`/`related` links.

use serde_json::{Map, Value};

use super::identifier::ResourceIdentifier;
use super::resource::Resource;
use super::set::{Entry, ResourceSet};
use super::Document;
use crate::api::request::join_path;
use crate::api::{ApiError, Client, Request, Result};

/// A lazy handle on the resources related to an owner under `name`.
///
/// # Example
///
/// ```rust,no_run
/// use exonet_api::{Client, PersonalAccessToken, ResourceIdentifier};
///
/// # async fn example() -> exonet_api::Result<()> {
/// let client = Client::new(PersonalAccessToken::new("your-token"))?;
/// let zone = ResourceIdentifier::new("dns_zones", "VX09kwR3KxNo");
///
/// // GET dns_zones/VX09kwR3KxNo/records?page%5Bsize%5D=50
/// let records = zone.related("records").request(&client)?.size(50).get().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    name: String,
    owner_type: String,
    owner_id: Option<String>,
}

impl Relation {
    pub fn new(name: &str, owner_type: &str, owner_id: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            owner_type: owner_type.to_string(),
            owner_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner_type(&self) -> &str {
        &self.owner_type
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    fn require_owner_id(&self) -> Result<&str> {
        self.owner_id.as_deref().ok_or_else(|| {
            ApiError::invalid_request(format!(
                "The '{}' relation of a '{}' resource without an id cannot be requested.",
                self.name, self.owner_type
            ))
            .into()
        })
    }

    /// A request for `<owner_type>/<owner_id>/<name>`.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-request error when the owner has no id.
    pub fn request(&self, client: &Client) -> Result<Request> {
        let owner_id = self.require_owner_id()?;
        let path = join_path([self.owner_type.as_str(), owner_id, self.name.as_str()]);
        Ok(client.resource(&path))
    }

    /// GETs the related resources.
    pub async fn get(&self, client: &Client) -> Result<Document> {
        self.request(client)?.get().await
    }
}

/// The `links` object of a relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipLinks {
    pub self_link: Option<String>,
    pub related: Option<String>,
}

impl RelationshipLinks {
    fn from_value(value: Option<&Value>) -> Self {
        let link = |name: &str| {
            value
                .and_then(|links| links.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            self_link: link("self"),
            related: link("related"),
        }
    }
}

/// Relationship linkage: a single identifier or a set of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Linkage {
    One(ResourceIdentifier),
    Many(ResourceSet),
}

impl Linkage {
    /// The linkage as it is sent in a `data` member.
    pub fn to_json(&self) -> Value {
        match self {
            Self::One(identifier) => identifier.to_linkage(),
            Self::Many(set) => Value::Array(set.iter().map(Entry::to_linkage).collect()),
        }
    }

    /// The single identifier, if this is a to-one linkage.
    pub fn as_one(&self) -> Option<&ResourceIdentifier> {
        match self {
            Self::One(identifier) => Some(identifier),
            Self::Many(_) => None,
        }
    }

    /// The set of identifiers, if this is a to-many linkage.
    pub fn as_many(&self) -> Option<&ResourceSet> {
        match self {
            Self::One(_) => None,
            Self::Many(set) => Some(set),
        }
    }
}

impl From<ResourceIdentifier> for Linkage {
    fn from(identifier: ResourceIdentifier) -> Self {
        Self::One(identifier.bare())
    }
}

impl From<&Resource> for Linkage {
    fn from(resource: &Resource) -> Self {
        Self::One(resource.identifier().bare())
    }
}

impl From<Vec<ResourceIdentifier>> for Linkage {
    fn from(identifiers: Vec<ResourceIdentifier>) -> Self {
        Self::Many(identifiers.into_iter().map(|i| Entry::Identifier(i.bare())).collect())
    }
}

impl From<ResourceSet> for Linkage {
    fn from(set: ResourceSet) -> Self {
        Self::Many(set)
    }
}

/// A named relationship of an owner resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    relation: Relation,
    links: RelationshipLinks,
    linkage: Option<Linkage>,
}

impl Relationship {
    /// An empty relationship called `name` on the given owner.
    pub fn new(name: &str, owner_type: &str, owner_id: Option<String>) -> Self {
        Self {
            relation: Relation::new(name, owner_type, owner_id),
            links: RelationshipLinks::default(),
            linkage: None,
        }
    }

    /// Reads a relationship object from a document.
    ///
    /// A `data` object becomes a to-one linkage and a non-empty `data` array a
    /// to-many linkage. A missing, `null` or empty `data` leaves the linkage
    /// unset.
    pub(crate) fn from_document(
        name: &str,
        owner: &ResourceIdentifier,
        value: &Value,
    ) -> Result<Self> {
        let mut relationship = Self::new(name, owner.resource_type(), owner.id().map(str::to_string));
        relationship.links = RelationshipLinks::from_value(value.get("links"));

        relationship.linkage = match value.get("data") {
            Some(Value::Object(object)) if object.contains_key("type") => {
                Some(Linkage::One(ResourceIdentifier::from_object(object)?))
            }
            Some(Value::Array(items)) if !items.is_empty() => {
                let entries = items
                    .iter()
                    .map(Entry::from_value)
                    .collect::<Result<Vec<_>>>()?;
                Some(Linkage::Many(ResourceSet::from_entries(entries)))
            }
            _ => None,
        };

        Ok(relationship)
    }

    pub fn name(&self) -> &str {
        self.relation.name()
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn links(&self) -> &RelationshipLinks {
        &self.links
    }

    pub fn linkage(&self) -> Option<&Linkage> {
        self.linkage.as_ref()
    }

    pub fn set_linkage(&mut self, linkage: impl Into<Linkage>) {
        self.linkage = Some(linkage.into());
    }

    pub fn clear_linkage(&mut self) {
        self.linkage = None;
    }

    /// The linkage as JSON, or `None` when it is unset.
    pub fn to_linkage(&self) -> Option<Value> {
        self.linkage.as_ref().map(Linkage::to_json)
    }

    /// A request for the relationship endpoint: the `self` link when the API
    /// sent one, `<type>/<id>/relationships/<name>` otherwise.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-request error when the owner has no id.
    pub fn request(&self, client: &Client) -> Result<Request> {
        let owner_id = self.relation.require_owner_id()?;
        match &self.links.self_link {
            Some(link) => Ok(client.resource(link)),
            None => {
                let path = join_path([
                    self.relation.owner_type(),
                    owner_id,
                    "relationships",
                    self.relation.name(),
                ]);
                Ok(client.resource(&path))
            }
        }
    }

    /// A request for the related resources: the `related` link when the API
    /// sent one, `<type>/<id>/<name>` otherwise.
    pub fn related_request(&self, client: &Client) -> Result<Request> {
        let request = self.relation.request(client)?;
        match &self.links.related {
            Some(link) => Ok(client.resource(link)),
            None => Ok(request),
        }
    }

    /// GETs the linkage from the relationship endpoint.
    pub async fn get(&self, client: &Client) -> Result<Document> {
        self.request(client)?.get().await
    }
}

/// Reads every relationship of a resource object into `owner`.
pub(crate) fn read_relationships(
    owner: &mut ResourceIdentifier,
    relationships: Option<&Map<String, Value>>,
) -> Result<()> {
    for (name, value) in relationships.into_iter().flatten() {
        let relationship = Relationship::from_document(name, owner, value)?;
        owner.insert_relationship(relationship);
    }
    Ok(())
}
