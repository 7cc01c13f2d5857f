use embox_core::Raw;
use embox_emby::{ImageType, ItemsQuery, SortOrder};

use super::LIST_CONTEXT;
use crate::cache::list_key;
use crate::response::{ItemView, ListResponse};
use crate::{EmbyService, Error};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Query parameters of the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub page_size: u32,
    pub parent_id: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            parent_id: None,
        }
    }
}

impl ListParams {
    /// Parses a raw query string leniently.
    ///
    /// The first occurrence of a parameter wins. `page` and `pageSize` fall
    /// back to their defaults unless they are positive integers; an empty
    /// `parentId` means no parent.
    ///
    /// ```
    /// use embox::ListParams;
    ///
    /// let params = ListParams::from_query(Some("page=3&pageSize=abc&parentId="));
    /// assert_eq!(params.page, 3);
    /// assert_eq!(params.page_size, 20);
    /// assert_eq!(params.parent_id, None);
    /// ```
    pub fn from_query(query: Option<&str>) -> Self {
        let mut page = None;
        let mut page_size = None;
        let mut parent_id = None;

        for (name, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match name.as_ref() {
                "page" if page.is_none() => page = Some(value.into_owned()),
                "pageSize" if page_size.is_none() => page_size = Some(value.into_owned()),
                "parentId" if parent_id.is_none() => parent_id = Some(value.into_owned()),
                _ => {}
            }
        }

        Self {
            page: positive(page.as_deref()).unwrap_or(DEFAULT_PAGE),
            page_size: positive(page_size.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE),
            parent_id: parent_id.filter(|id| !id.is_empty()),
        }
    }

    /// Zero-based index of the first item on this page.
    pub fn start_index(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

fn positive(value: Option<&str>) -> Option<u32> {
    value?.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

impl EmbyService {
    /// Serves one page of movies and series as a JSON body.
    #[tracing::instrument(
        name = "emby.list",
        skip(self, params),
        fields(page = params.page, page_size = params.page_size, parent_id = ?params.parent_id)
    )]
    pub async fn list(&self, params: &ListParams) -> Raw {
        self.respond(
            &list_key(params),
            LIST_CONTEXT,
            self.fetch_list(params),
            |message| ListResponse::failure(params.page, message),
        )
        .await
    }

    async fn fetch_list(&self, params: &ListParams) -> Result<ListResponse, Error> {
        let session = self.session().await?;

        let query = ItemsQuery {
            parent_id: params.parent_id.clone(),
            include_item_types: vec!["Movie".into(), "Series".into()],
            recursive: true,
            fields: vec!["Overview".into(), "ProductionYear".into()],
            sort_by: vec!["SortName".into()],
            sort_order: Some(SortOrder::Ascending),
            start_index: Some(params.start_index()),
            limit: Some(u64::from(params.page_size)),
        };
        let result = self.upstream().items(&session, &query).await?;

        let list = result
            .items
            .into_iter()
            .map(|item| {
                let poster = self
                    .upstream()
                    .image_url(&session, &item.id, ImageType::Primary);
                ItemView::new(item, poster)
            })
            .collect();

        Ok(ListResponse::success(
            list,
            result.total_record_count,
            params.page,
            params.page_size,
        ))
    }
}
