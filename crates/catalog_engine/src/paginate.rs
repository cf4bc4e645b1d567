use catalog_core::PageEnvelope;
use catalog_logging::{catalog_debug, catalog_warn};

use crate::{CatalogEntity, Endpoints, FetchError, Transport};

/// Fetch one page of `T`'s list endpoint, optionally filtered by name.
///
/// A 404 is the server's "no more / no matches" answer and yields
/// [`PageEnvelope::empty`]. No retries.
pub async fn fetch_page<T: CatalogEntity>(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    page: u32,
    query: Option<&str>,
) -> Result<PageEnvelope<T>, FetchError> {
    let url = endpoints.page(T::COLLECTION, page, query)?;
    let response = transport.get(url.as_str()).await?;

    if response.is_success() {
        return decode(&response.body, T::COLLECTION.path());
    }
    if response.status == 404 {
        catalog_debug!("{} page {} query {:?}: no results", T::COLLECTION, page, query);
        return Ok(PageEnvelope::empty());
    }

    catalog_warn!(
        "{} page {} failed with status {}",
        T::COLLECTION,
        page,
        response.status
    );
    Err(FetchError::http_status(T::COLLECTION.path(), response.status))
}

fn decode<T: CatalogEntity>(body: &str, endpoint: &str) -> Result<PageEnvelope<T>, FetchError> {
    crate::decode_page(body).map_err(|err| {
        catalog_warn!("{} page body rejected: {}", endpoint, err);
        FetchError::from(err)
    })
}
