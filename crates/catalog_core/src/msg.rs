use crate::{Character, PageEnvelope, RequestId};

/// Outcome of a page fetch as seen by the session. Failures arrive already
/// rendered as a human-readable message.
pub type PageResult = Result<PageEnvelope<Character>, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Reset the list and load page 1 for `query` (used verbatim).
    LoadFirstPage { query: String },
    /// Reset the list and load page 1 for a user-typed query (trimmed).
    Search(String),
    /// Reload page 1 of the active query.
    Refresh,
    /// Append the next page if there is one and none is in flight.
    LoadNextPage,
    /// Engine completion for a page fetch.
    PageLoaded {
        request_id: RequestId,
        result: PageResult,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
