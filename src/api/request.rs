//
//  exonet-api
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Builder
//!
//! A [`Request`] targets one resource type (for example `dns_zones`) and
//! accumulates the query parameters the Exonet API understands before the call
//! is made:
//!
//! | Parameter | Builder method |
//! |-----------|----------------|
//! | `page[size]` | [`Request::size`] |
//! | `page[number]` | [`Request::page`] |
//! | `filter[<name>]` | [`Request::filter`], [`Request::filter_value`] |
//!
//! Query strings are form-encoded with nested keys, so
//! `filter("open")` ends up on the wire as `filter%5Bopen%5D=1`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use exonet_api::{Client, PersonalAccessToken};
//!
//! # async fn example() -> exonet_api::Result<()> {
//! let client = Client::new(PersonalAccessToken::new("your-token"))?;
//!
//! let tickets = client
//!     .resource("tickets")
//!     .size(10)
//!     .filter("open")
//!     .get()
//!     .await?
//!     .into_set()?;
//!
//! println!("{} open tickets", tickets.len());
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

use super::client::Client;
use super::error::Result;
use crate::structures::{Document, ResourceSet};

/// The value of a `filter[<name>]` query parameter.
///
/// Lists are joined with commas and booleans become `1` or `0`, which is what
/// the API expects.
///
/// # Example
///
/// ```rust
/// use exonet_api::FilterValue;
///
/// assert_eq!(FilterValue::from(true).as_str(), "1");
/// assert_eq!(FilterValue::from(vec!["a", "b", "c"]).as_str(), "a,b,c");
/// assert_eq!(FilterValue::from(42).as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterValue(String);

impl FilterValue {
    /// The encoded (but not yet percent-encoded) value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self(if value { "1" } else { "0" }.to_string())
    }
}

macro_rules! filter_value_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FilterValue {
                fn from(value: $t) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

filter_value_from_number!(i32, i64, u32, u64, usize);

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        let joined = values
            .into_iter()
            .map(|v| v.into().0)
            .collect::<Vec<_>>()
            .join(",");
        Self(joined)
    }
}

impl<T: Into<FilterValue>, const N: usize> From<[T; N]> for FilterValue {
    fn from(values: [T; N]) -> Self {
        Self::from(Vec::from(values))
    }
}

/// Joins path segments with `/`, trimming slashes from every segment and
/// dropping the ones that end up empty.
pub(crate) fn join_path<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    segments
        .into_iter()
        .map(|segment| segment.trim_matches('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// A request against a single resource type.
///
/// Builder methods consume and return `self`, so a request reads as one chain.
/// A request can be executed more than once; every execution is a single,
/// independent HTTP round trip.
#[derive(Debug, Clone)]
pub struct Request {
    client: Client,
    resource: String,
    page_size: Option<u32>,
    page_number: Option<u32>,
    filters: Vec<(String, FilterValue)>,
}

impl Request {
    /// Creates a request for `resource` using `client`.
    ///
    /// `resource` may be a plain type name (`dns_zones`), a nested path
    /// (`dns_zones/VX09kwR3KxNo/records`) or a full URL below the client's base
    /// URL, in which case the base URL is stripped.
    pub fn new(client: Client, resource: &str) -> Self {
        let resource = join_path([client.relative_path(resource)]);
        Self {
            client,
            resource,
            page_size: None,
            page_number: None,
            filters: Vec::new(),
        }
    }

    /// The normalized resource path this request targets.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Sets `page[size]`, the maximum number of resources per response.
    ///
    /// Page sizes are positive; `0` is raised to `1`.
    pub fn size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    /// Sets `page[number]`. Pages are numbered from `1`; `0` is raised to `1`.
    pub fn page(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number.max(1));
        self
    }

    /// Adds a boolean filter, encoded as `filter[<name>]=1`.
    pub fn filter(self, name: &str) -> Self {
        self.filter_value(name, true)
    }

    /// Adds a filter with an explicit value.
    ///
    /// Setting a filter that already exists replaces its value but keeps its
    /// position in the query string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use exonet_api::Client;
    ///
    /// let client = Client::builder().build().unwrap();
    /// let request = client
    ///     .resource("dns_records")
    ///     .filter_value("type", ["A", "AAAA"]);
    ///
    /// assert_eq!(request.query_string(), "filter%5Btype%5D=A%2CAAAA");
    /// ```
    pub fn filter_value(mut self, name: &str, value: impl Into<FilterValue>) -> Self {
        let value = value.into();
        match self.filters.iter_mut().find(|(existing, _)| existing == name) {
            Some(slot) => slot.1 = value,
            None => self.filters.push((name.to_string(), value)),
        }
        self
    }

    /// The encoded query string, without a leading `?`.
    ///
    /// Parameters appear in a fixed order: page size, page number, then filters
    /// in the order they were added. Unset parameters are left out.
    pub fn query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());

        if let Some(size) = self.page_size {
            serializer.append_pair("page[size]", &size.to_string());
        }
        if let Some(number) = self.page_number {
            serializer.append_pair("page[number]", &number.to_string());
        }
        for (name, value) in &self.filters {
            serializer.append_pair(&format!("filter[{}]", name), value.as_str());
        }

        serializer.finish()
    }

    /// The path (relative to the API URL) a GET for `id` would use, including
    /// the query string.
    pub fn path(&self, id: Option<&str>) -> String {
        let path = join_path([self.resource.as_str(), id.unwrap_or_default()]);
        let query = self.query_string();

        if query.is_empty() {
            path
        } else {
            format!("{}?{}", path, query)
        }
    }

    /// GETs the whole collection (or whatever the resource path points at).
    pub async fn get(&self) -> Result<Document> {
        self.client.get(&self.path(None)).await
    }

    /// GETs the resource with the given id.
    pub async fn find(&self, id: &str) -> Result<Document> {
        self.client.get(&self.path(Some(id))).await
    }

    /// GETs the collection and follows `links.next` until it runs out,
    /// returning every entry in a single set.
    ///
    /// The returned set carries the `meta` and `links` of the last page.
    ///
    /// # Errors
    ///
    /// Besides the usual request errors, fails with a malformed-document error
    /// when a page is not a collection.
    pub async fn get_all(&self) -> Result<ResourceSet> {
        let mut set = self.get().await?.into_set()?;
        let mut next = set.links().next.clone();

        while let Some(link) = next {
            tracing::debug!(link = %link, "Following next page");
            let page = self.client.get(self.client.relative_path(&link)).await?.into_set()?;
            next = page.links().next.clone();
            set.append(page);
        }

        Ok(set)
    }

    /// POSTs `payload` to the resource path, optionally extended with
    /// `append_path`, and maps the response.
    pub async fn post(&self, payload: &Value, append_path: Option<&str>) -> Result<Document> {
        let path = join_path([self.resource.as_str(), append_path.unwrap_or_default()]);
        self.client.post(&path, payload).await
    }

    /// POSTs relationship linkage to `append_path` below the resource path.
    ///
    /// Returns `None` when the API answered without a body.
    pub async fn post_relationship(
        &self,
        append_path: &str,
        payload: &Value,
    ) -> Result<Option<Document>> {
        let path = join_path([self.resource.as_str(), append_path]);
        self.client.post_relationship(&path, payload).await
    }

    /// PATCHes the resource with the given id. Returns `true` or an error.
    pub async fn patch(&self, id: &str, payload: &Value) -> Result<bool> {
        let path = join_path([self.resource.as_str(), id]);
        self.client.patch(&path, payload).await
    }

    /// DELETEs the resource with the given id, optionally sending a body.
    /// Returns `true` or an error.
    pub async fn delete(&self, id: &str, body: Option<&Value>) -> Result<bool> {
        let path = join_path([self.resource.as_str(), id]);
        self.client.delete(&path, body).await
    }
}
