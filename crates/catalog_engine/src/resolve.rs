use catalog_core::{reference_id, unique_reference_ids};
use catalog_logging::{catalog_debug, catalog_warn};

use crate::endpoints::batch_path;
use crate::{decode_batch, CatalogEntity, Endpoints, FetchError, Transport};

/// Resolve cross-reference URLs into entities with a single batched request.
///
/// Identifiers are the trailing path segment of each URL, deduplicated in
/// first-occurrence order. The returned order is whatever the server sends;
/// match results by id, not by position.
pub async fn resolve_references<T, S>(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    references: &[S],
) -> Result<Vec<T>, FetchError>
where
    T: CatalogEntity,
    S: AsRef<str> + Sync,
{
    if references.is_empty() {
        return Ok(Vec::new());
    }

    let ids = unique_reference_ids(references);
    let unusable = references
        .iter()
        .map(|reference| reference.as_ref())
        .filter(|reference| reference_id(reference).is_none())
        .count();
    if unusable > 0 {
        catalog_warn!(
            "skipping {} {} reference(s) without a numeric id",
            unusable,
            T::COLLECTION
        );
    }
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let url = endpoints.batch(T::COLLECTION, &ids)?;
    catalog_debug!(
        "resolving {} reference(s) as {} {} id(s)",
        references.len(),
        ids.len(),
        T::COLLECTION
    );
    let response = transport.get(url.as_str()).await?;

    if !response.is_success() {
        let endpoint = batch_path(T::COLLECTION, &ids);
        catalog_warn!("{} failed with status {}", endpoint, response.status);
        return Err(FetchError::http_status(endpoint, response.status));
    }

    decode_batch(&response.body).map_err(|err| {
        catalog_warn!("{} batch body rejected: {}", T::COLLECTION, err);
        FetchError::from(err)
    })
}
