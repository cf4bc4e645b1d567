use crate::view_model::SessionView;
use crate::{Character, Effect, PageEnvelope};

/// Identifies one page fetch issued by a session. Monotonic per session.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Error,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    FirstPage,
    NextPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingFetch {
    request_id: RequestId,
    kind: FetchKind,
    page: u32,
}

/// State of one list session.
///
/// At most one page fetch is outstanding. A first-page load replaces
/// whatever was pending, so only the most recently issued request can
/// settle into the state; anything else is stale and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    page: u32,
    query: String,
    results: Vec<Character>,
    next_cursor: Option<String>,
    status: Status,
    error_message: Option<String>,
    pending: Option<PendingFetch>,
    last_request_id: RequestId,
    dirty: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            page: 1,
            query: String::new(),
            results: Vec::new(),
            next_cursor: None,
            status: Status::Idle,
            error_message: None,
            pending: None,
            last_request_id: 0,
            dirty: false,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            status: self.status,
            query: self.query.clone(),
            page: self.page,
            results: self.results.clone(),
            error_message: self.error_message.clone(),
            has_more: self.next_cursor.is_some(),
            loading_more: self.is_loading_more(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Character] {
        &self.results
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// The in-flight guard: true exactly while a next-page fetch is outstanding.
    pub fn is_loading_more(&self) -> bool {
        matches!(
            self.pending,
            Some(PendingFetch {
                kind: FetchKind::NextPage,
                ..
            })
        )
    }

    /// Returns whether observable state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_first_page(&mut self, query: String) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if let Some(superseded) = self.pending.take() {
            effects.push(Effect::CancelFetch {
                request_id: superseded.request_id,
            });
        }

        self.page = 1;
        self.query = query;
        self.results.clear();
        self.next_cursor = None;
        self.error_message = None;
        self.status = Status::Loading;
        self.dirty = true;

        let request_id = self.issue(FetchKind::FirstPage, 1);
        effects.push(Effect::FetchPage {
            request_id,
            page: 1,
            query: self.query_filter(),
        });
        effects
    }

    pub(crate) fn begin_next_page(&mut self) -> Vec<Effect> {
        if self.next_cursor.is_none() || self.is_loading_more() {
            return Vec::new();
        }

        let page = self.page + 1;
        let request_id = self.issue(FetchKind::NextPage, page);
        self.dirty = true;
        vec![Effect::FetchPage {
            request_id,
            page,
            query: self.query_filter(),
        }]
    }

    /// Settle the pending fetch. Results for any other request id are stale
    /// and leave the state untouched.
    pub(crate) fn apply_page(
        &mut self,
        request_id: RequestId,
        result: Result<PageEnvelope<Character>, String>,
    ) -> bool {
        let pending = match self.pending {
            Some(pending) if pending.request_id == request_id => pending,
            _ => return false,
        };
        self.pending = None;

        match (pending.kind, result) {
            (FetchKind::FirstPage, Ok(envelope)) => {
                self.next_cursor = envelope.next().map(ToOwned::to_owned);
                self.results = envelope.results;
                self.error_message = None;
                self.status = self.settled_status();
            }
            (FetchKind::FirstPage, Err(message)) => {
                self.results.clear();
                self.next_cursor = None;
                self.error_message = Some(message);
                self.status = Status::Error;
            }
            (FetchKind::NextPage, Ok(envelope)) => {
                self.next_cursor = envelope.next().map(ToOwned::to_owned);
                self.results.extend(envelope.results);
                self.page = pending.page;
                self.error_message = None;
                self.status = self.settled_status();
            }
            (FetchKind::NextPage, Err(message)) => {
                // Earlier pages and the cursor stay so the caller can retry.
                self.error_message = Some(message);
                self.status = Status::Error;
            }
        }
        self.dirty = true;
        true
    }

    fn issue(&mut self, kind: FetchKind, page: u32) -> RequestId {
        self.last_request_id += 1;
        self.pending = Some(PendingFetch {
            request_id: self.last_request_id,
            kind,
            page,
        });
        self.last_request_id
    }

    fn query_filter(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.clone())
        }
    }

    fn settled_status(&self) -> Status {
        if self.results.is_empty() {
            Status::Empty
        } else {
            Status::Idle
        }
    }
}
