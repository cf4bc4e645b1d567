/// Pagination metadata from a list response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// One page of a list endpoint: optional `info` plus results in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEnvelope<T> {
    pub info: Option<PageInfo>,
    pub results: Vec<T>,
}

impl<T> PageEnvelope<T> {
    /// The envelope a 404 maps to: no info, no results.
    pub fn empty() -> Self {
        Self {
            info: None,
            results: Vec::new(),
        }
    }

    /// Next-page cursor, if the server reported one.
    pub fn next(&self) -> Option<&str> {
        self.info.as_ref().and_then(|info| info.next.as_deref())
    }

    pub fn has_more(&self) -> bool {
        self.next().is_some()
    }
}

impl<T> Default for PageEnvelope<T> {
    fn default() -> Self {
        Self::empty()
    }
}
