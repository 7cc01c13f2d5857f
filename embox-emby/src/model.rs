//! Emby wire types, limited to the fields the proxy reads.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Response of `POST /Users/AuthenticateByName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResult {
    pub user: User,
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub item_type: String,
    #[serde(default)]
    pub production_year: Option<i32>,
    #[serde(default)]
    pub community_rating: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
}

/// Paged item listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResult {
    #[serde(default)]
    pub items: Vec<BaseItem>,
    #[serde(default)]
    pub total_record_count: u64,
}

/// A library view such as "Movies" or "TV Shows".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Collection {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub collection_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CollectionList {
    #[serde(default)]
    pub items: Vec<Collection>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "Ascending",
            SortOrder::Descending => "Descending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Primary,
    Backdrop,
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageType::Primary => "Primary",
            ImageType::Backdrop => "Backdrop",
        })
    }
}

/// Parameters of an item query. Empty lists and `None` values are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsQuery {
    pub parent_id: Option<String>,
    pub include_item_types: Vec<String>,
    pub recursive: bool,
    pub fields: Vec<String>,
    pub sort_by: Vec<String>,
    pub sort_order: Option<SortOrder>,
    pub start_index: Option<u64>,
    pub limit: Option<u64>,
}

impl ItemsQuery {
    /// Query string pairs in Emby's parameter names.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(parent_id) = &self.parent_id {
            pairs.push(("ParentId", parent_id.clone()));
        }
        if !self.include_item_types.is_empty() {
            pairs.push(("IncludeItemTypes", self.include_item_types.join(",")));
        }
        if self.recursive {
            pairs.push(("Recursive", "true".to_owned()));
        }
        if !self.fields.is_empty() {
            pairs.push(("Fields", self.fields.join(",")));
        }
        if !self.sort_by.is_empty() {
            pairs.push(("SortBy", self.sort_by.join(",")));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("SortOrder", order.as_str().to_owned()));
        }
        if let Some(start) = self.start_index {
            pairs.push(("StartIndex", start.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("Limit", limit.to_string()));
        }
        pairs
    }
}
