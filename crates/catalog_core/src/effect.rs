use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch `page` of the list endpoint, filtered by name when `query` is set.
    FetchPage {
        request_id: RequestId,
        page: u32,
        query: Option<String>,
    },
    /// Abandon an outstanding fetch; its result will be ignored anyway.
    CancelFetch { request_id: RequestId },
}
