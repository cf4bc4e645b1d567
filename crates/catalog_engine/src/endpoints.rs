use catalog_core::EntityId;
use url::Url;

use crate::{Collection, FetchError};

/// URL builder for the fixed catalog endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|err| FetchError::invalid_url(err.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(FetchError::invalid_url(format!(
                "{trimmed} cannot be used as a base url"
            )));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{collection}?page={page}[&name={query}]`
    pub fn page(
        &self,
        collection: Collection,
        page: u32,
        query: Option<&str>,
    ) -> Result<Url, FetchError> {
        if page == 0 {
            return Err(FetchError::invalid_url("page numbers start at 1"));
        }
        let mut url = self.join(collection.path())?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            if let Some(query) = query.filter(|q| !q.is_empty()) {
                pairs.append_pair("name", query);
            }
        }
        Ok(url)
    }

    /// `{base}/{collection}/{id}`
    pub fn entity(&self, collection: Collection, id: EntityId) -> Result<Url, FetchError> {
        self.join(&format!("{}/{id}", collection.path()))
    }

    /// `{base}/{collection}/{id1},{id2},...`
    pub fn batch(&self, collection: Collection, ids: &[EntityId]) -> Result<Url, FetchError> {
        self.join(&batch_path(collection, ids))
    }

    fn join(&self, path: &str) -> Result<Url, FetchError> {
        Url::parse(&format!("{}/{path}", self.base_url))
            .map_err(|err| FetchError::invalid_url(err.to_string()))
    }
}

/// Endpoint name used in errors for a batched fetch.
pub(crate) fn batch_path(collection: Collection, ids: &[EntityId]) -> String {
    let joined = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{}/{joined}", collection.path())
}
