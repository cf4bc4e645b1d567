use std::sync::Arc;

use catalog_core::{Character, EntityId, Episode, PageEnvelope};

use crate::{
    detail, paginate, resolve, Endpoints, FetchError, ReqwestTransport, Transport,
    TransportSettings,
};

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    pub transport: TransportSettings,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: TransportSettings::default(),
        }
    }
}

/// Entry point for every catalog read. Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct CatalogClient {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
}

impl CatalogClient {
    pub fn new(settings: CatalogSettings) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(settings.transport)?;
        Self::with_transport(&settings.base_url, Arc::new(transport))
    }

    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            transport,
            endpoints: Endpoints::new(base_url)?,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub async fn fetch_page(
        &self,
        page: u32,
        query: Option<&str>,
    ) -> Result<PageEnvelope<Character>, FetchError> {
        paginate::fetch_page(self.transport.as_ref(), &self.endpoints, page, query).await
    }

    pub async fn fetch_character(&self, id: EntityId) -> Result<Character, FetchError> {
        detail::fetch_entity(self.transport.as_ref(), &self.endpoints, id).await
    }

    pub async fn fetch_episode(&self, id: EntityId) -> Result<Episode, FetchError> {
        detail::fetch_entity(self.transport.as_ref(), &self.endpoints, id).await
    }

    pub async fn resolve_characters<S: AsRef<str> + Sync>(
        &self,
        references: &[S],
    ) -> Result<Vec<Character>, FetchError> {
        resolve::resolve_references(self.transport.as_ref(), &self.endpoints, references).await
    }

    pub async fn resolve_episodes<S: AsRef<str> + Sync>(
        &self,
        references: &[S],
    ) -> Result<Vec<Episode>, FetchError> {
        resolve::resolve_references(self.transport.as_ref(), &self.endpoints, references).await
    }
}
