use catalog_core::{Character, EntityId, Episode};
use catalog_logging::catalog_warn;

use crate::{decode_record, CatalogClient, CatalogEntity, Endpoints, FetchError, Transport};

/// A character together with the episodes it appears in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDetail {
    pub character: Character,
    pub episodes: Vec<Episode>,
}

/// An episode together with its cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeDetail {
    pub episode: Episode,
    pub characters: Vec<Character>,
}

/// Fetch a single entity by id. Any non-2xx status, 404 included, is an error.
pub async fn fetch_entity<T: CatalogEntity>(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    id: EntityId,
) -> Result<T, FetchError> {
    let url = endpoints.entity(T::COLLECTION, id)?;
    let response = transport.get(url.as_str()).await?;
    if !response.is_success() {
        let endpoint = format!("{}/{id}", T::COLLECTION);
        catalog_warn!("{} failed with status {}", endpoint, response.status);
        return Err(FetchError::http_status(endpoint, response.status));
    }
    decode_record(&response.body).map_err(|err| {
        catalog_warn!("{} record rejected: {}", T::COLLECTION, err);
        FetchError::from(err)
    })
}

impl CatalogClient {
    /// Character lookup followed by one batched fetch of its episodes.
    pub async fn character_detail(&self, id: EntityId) -> Result<CharacterDetail, FetchError> {
        let character = self.fetch_character(id).await?;
        let episodes = self.resolve_episodes(character.episode_refs()).await?;
        Ok(CharacterDetail {
            character,
            episodes,
        })
    }

    /// Episode lookup followed by one batched fetch of its characters.
    pub async fn episode_detail(&self, id: EntityId) -> Result<EpisodeDetail, FetchError> {
        let episode = self.fetch_episode(id).await?;
        let characters = self.resolve_characters(episode.character_refs()).await?;
        Ok(EpisodeDetail {
            episode,
            characters,
        })
    }
}
