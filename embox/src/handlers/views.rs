use embox_core::Raw;

use super::VIEWS_CONTEXT;
use crate::cache::views_key;
use crate::response::{CollectionView, ViewsResponse};
use crate::{EmbyService, Error};

impl EmbyService {
    /// Serves the movie and TV show libraries as a JSON body.
    #[tracing::instrument(name = "emby.views", skip(self))]
    pub async fn views(&self) -> Raw {
        self.respond(
            &views_key(),
            VIEWS_CONTEXT,
            self.fetch_views(),
            ViewsResponse::failure,
        )
        .await
    }

    async fn fetch_views(&self) -> Result<ViewsResponse, Error> {
        let session = self.session().await?;
        let collections = self.upstream().user_views(&session).await?;

        let views = collections
            .into_iter()
            .filter_map(CollectionView::visible)
            .collect();

        Ok(ViewsResponse::success(views))
    }
}
