//! JSON bodies returned by the endpoints.

use embox_emby::{BaseItem, Collection};
use serde::{Deserialize, Serialize};

/// Collection types exposed by the views endpoint.
pub const VISIBLE_COLLECTION_TYPES: [&str; 2] = ["movies", "tvshows"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// `Movie` maps to [`MediaType::Movie`]; every other Emby type is TV.
    pub fn from_item_type(item_type: &str) -> Self {
        if item_type == "Movie" {
            MediaType::Movie
        } else {
            MediaType::Tv
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: String,
    pub title: String,
    pub poster: String,
    pub year: String,
    pub rating: f64,
    pub media_type: MediaType,
}

impl ItemView {
    pub fn new(item: BaseItem, poster: String) -> Self {
        Self {
            media_type: MediaType::from_item_type(&item.item_type),
            year: item
                .production_year
                .map(|year| year.to_string())
                .unwrap_or_default(),
            rating: item.community_rating.unwrap_or(0.0),
            title: item.name,
            id: item.id,
            poster,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl CollectionView {
    /// Keeps movie and TV show libraries, drops everything else.
    pub fn visible(collection: Collection) -> Option<Self> {
        let kind = collection
            .collection_type
            .filter(|kind| VISIBLE_COLLECTION_TYPES.contains(&kind.as_str()))?;
        Some(Self {
            id: collection.id,
            name: collection.name,
            kind,
        })
    }
}

/// Body of `GET /list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub list: Vec<ItemView>,
    pub total_pages: u64,
    pub current_page: u32,
    pub total: u64,
}

impl ListResponse {
    pub fn success(list: Vec<ItemView>, total: u64, page: u32, page_size: u32) -> Self {
        Self {
            success: Some(true),
            error: None,
            list,
            total_pages: total_pages(total, page_size),
            current_page: page,
            total,
        }
    }

    pub fn failure(page: u32, message: impl Into<String>) -> Self {
        Self {
            success: None,
            error: Some(message.into()),
            list: Vec::new(),
            total_pages: 0,
            current_page: page,
            total: 0,
        }
    }
}

/// Body of `GET /views`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub views: Vec<CollectionView>,
}

impl ViewsResponse {
    pub fn success(views: Vec<CollectionView>) -> Self {
        Self {
            success: Some(true),
            error: None,
            views,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: None,
            error: Some(message.into()),
            views: Vec::new(),
        }
    }
}

/// `ceil(total / page_size)`; zero when `page_size` is zero.
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    match u64::from(page_size) {
        0 => 0,
        size => total.div_ceil(size),
    }
}
