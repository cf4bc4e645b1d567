use std::collections::HashSet;

use url::Url;

use crate::EntityId;

/// Extract the identifier from a cross-reference URL such as
/// `https://host/api/episode/28`.
///
/// The trailing path segment is used; a trailing slash is ignored. Returns
/// `None` when that segment is not a number.
pub fn reference_id(reference: &str) -> Option<EntityId> {
    let trimmed = reference.trim();
    let segment = match Url::parse(trimmed) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.rev().find(|s| !s.is_empty()))
            .map(ToOwned::to_owned),
        // Relative references fall back to plain splitting.
        Err(_) => trimmed
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .map(ToOwned::to_owned),
    }?;
    segment.parse().ok()
}

/// Identifiers of `references`, deduplicated in first-occurrence order.
/// References without a numeric trailing segment are skipped.
pub fn unique_reference_ids<S: AsRef<str>>(references: &[S]) -> Vec<EntityId> {
    let mut seen = HashSet::with_capacity(references.len());
    references
        .iter()
        .filter_map(|reference| reference_id(reference.as_ref()))
        .filter(|id| seen.insert(*id))
        .collect()
}
