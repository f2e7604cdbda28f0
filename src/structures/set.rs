//
//  exonet-api
//  structures/set.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Sets
//!
//! A [`ResourceSet`] is an ordered collection returned for a `data` array,
//! together with the document's `meta` and pagination `links`. Entries are
//! either full resources or bare identifiers.
//!
//! ## Pagination
//!
//! | Method | Follows |
//! |--------|---------|
//! | [`ResourceSet::next_page`] | `links.next` |
//! | [`ResourceSet::previous_page`] | `links.prev` |
//! | [`ResourceSet::first_page`] | `links.first` |
//! | [`ResourceSet::last_page`] | `links.last` |
//!
//! Each returns `Ok(None)` without making a request when the link is absent.
//!
//! ## Example
//!
//! ```rust,no_run
//! use exonet_api::{Client, PersonalAccessToken};
//!
//! # async fn example() -> exonet_api::Result<()> {
//! let client = Client::new(PersonalAccessToken::new("your-token"))?;
//! let mut page = client.resource("dns_zones").size(20).get().await?.into_set()?;
//!
//! loop {
//!     for zone in page.resources() {
//!         println!("{}", zone.attribute("name")?);
//!     }
//!     match page.next_page(&client).await? {
//!         Some(next) => page = next.into_set()?,
//!         None => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::ops::Index;

use serde_json::{Map, Value};

use super::identifier::ResourceIdentifier;
use super::resource::Resource;
use super::Document;
use crate::api::{Client, Error, Result};

/// One entry of a [`ResourceSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Resource(Resource),
    Identifier(ResourceIdentifier),
}

impl Entry {
    /// Reads a resource object: objects with `attributes` become resources,
    /// others identifiers.
    pub(crate) fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::MalformedDocument(format!("expected a resource object, got {}", value))
        })?;

        if object.contains_key("attributes") {
            Resource::from_object(object).map(Self::Resource)
        } else {
            let mut identifier = ResourceIdentifier::from_object(object)?;
            super::relationship::read_relationships(
                &mut identifier,
                object.get("relationships").and_then(Value::as_object),
            )?;
            Ok(Self::Identifier(identifier))
        }
    }

    pub fn resource_type(&self) -> &str {
        match self {
            Self::Resource(resource) => resource.resource_type(),
            Self::Identifier(identifier) => identifier.resource_type(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Resource(resource) => resource.id(),
            Self::Identifier(identifier) => identifier.id(),
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(resource) => Some(resource),
            Self::Identifier(_) => None,
        }
    }

    /// Reads an attribute. Identifiers have no attributes.
    pub fn attribute(&self, name: &str) -> Result<&Value> {
        match self {
            Self::Resource(resource) => resource.attribute(name),
            Self::Identifier(_) => Err(Error::UndefinedAttribute(name.to_string())),
        }
    }

    pub fn identifier(&self) -> &ResourceIdentifier {
        match self {
            Self::Resource(resource) => resource.identifier(),
            Self::Identifier(identifier) => identifier,
        }
    }

    /// The `{"type", "id"}` linkage object for this entry.
    pub fn to_linkage(&self) -> Value {
        self.identifier().to_linkage()
    }
}

impl From<Resource> for Entry {
    fn from(resource: Resource) -> Self {
        Self::Resource(resource)
    }
}

impl From<ResourceIdentifier> for Entry {
    fn from(identifier: ResourceIdentifier) -> Self {
        Self::Identifier(identifier)
    }
}

/// The pagination `links` of a collection document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationLinks {
    pub self_link: Option<String>,
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

impl PaginationLinks {
    fn from_value(value: Option<&Value>) -> Self {
        let link = |name: &str| {
            value
                .and_then(|links| links.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            self_link: link("self"),
            first: link("first"),
            prev: link("prev"),
            next: link("next"),
            last: link("last"),
        }
    }
}

/// An ordered collection of resources with `meta` and pagination links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSet {
    entries: Vec<Entry>,
    meta: Map<String, Value>,
    links: PaginationLinks,
}

impl ResourceSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Reads a collection document (`data` array, `meta`, `links`).
    pub(crate) fn from_document(document: &Map<String, Value>) -> Result<Self> {
        let items = document
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::MalformedDocument("`data` is not an array".to_string()))?;

        let entries = items
            .iter()
            .map(Entry::from_value)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entries,
            meta: document
                .get("meta")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            links: PaginationLinks::from_value(document.get("links")),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Only the entries that are full resources.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.entries.iter().filter_map(Entry::as_resource)
    }

    pub fn push(&mut self, entry: impl Into<Entry>) {
        self.entries.push(entry.into());
    }

    /// Removes and returns the entry at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Appends the entries of `page`, taking over its `meta` and `links`.
    pub fn append(&mut self, page: ResourceSet) {
        self.entries.extend(page.entries);
        self.meta = page.meta;
        self.links = page.links;
    }

    /// The document's `meta` object (empty when absent).
    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    /// The total number of resources across all pages, read from
    /// `meta.resources.total`.
    pub fn total(&self) -> Option<u64> {
        self.meta
            .get("resources")
            .and_then(|resources| resources.get("total"))
            .and_then(Value::as_u64)
    }

    pub fn links(&self) -> &PaginationLinks {
        &self.links
    }

    pub async fn next_page(&self, client: &Client) -> Result<Option<Document>> {
        navigate(client, self.links.next.as_deref()).await
    }

    pub async fn previous_page(&self, client: &Client) -> Result<Option<Document>> {
        navigate(client, self.links.prev.as_deref()).await
    }

    pub async fn first_page(&self, client: &Client) -> Result<Option<Document>> {
        navigate(client, self.links.first.as_deref()).await
    }

    pub async fn last_page(&self, client: &Client) -> Result<Option<Document>> {
        navigate(client, self.links.last.as_deref()).await
    }
}

async fn navigate(client: &Client, link: Option<&str>) -> Result<Option<Document>> {
    match link {
        Some(link) => client.get(client.relative_path(link)).await.map(Some),
        None => Ok(None),
    }
}

impl Index<usize> for ResourceSet {
    type Output = Entry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl FromIterator<Entry> for ResourceSet {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

impl IntoIterator for ResourceSet {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResourceSet {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
